//! Spindle CLI — translate and execute tape programs.
//!
//! Exit codes:
//! - 0: Success
//! - 1: Input/parse/translation error
//! - 3: Runtime abort

mod commands;

use std::process;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let result = match args[1].as_str() {
        "run" => commands::run(&args[2..]),
        "translate" => commands::translate(&args[2..]),
        "--help" | "-h" | "help" => {
            print_usage();
            process::exit(0);
        }
        other => {
            eprintln!("error: unknown command '{other}'");
            eprintln!();
            print_usage();
            process::exit(1);
        }
    };

    if let Err(code) = result {
        process::exit(code);
    }
}

fn print_usage() {
    eprintln!("Usage: spindle <command> [args]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  run <program> [--lang digits|minimal|nucleotide] [--input CSV]");
    eprintln!("                [--tape-size N] [--seed N]        Execute a program");
    eprintln!("  translate <program> --lang minimal|nucleotide   Print numeric tokens");
}
