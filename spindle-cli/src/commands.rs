//! CLI command implementations.

use std::fs;

use spindle_common::{Cell, Program};
use spindle_vm::{Machine, SeededSource, DEFAULT_TAPE_SIZE};

/// Source language of a program file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lang {
    /// Flat 3-digit token text, the engine's native form.
    Digits,
    /// The minimal tape language (`> < + - . , [ ]`).
    Minimal,
    /// The nucleotide language (`G C A T .` plus ambiguity codes).
    Nucleotide,
}

impl Lang {
    fn from_arg(arg: &str) -> Option<Lang> {
        match arg {
            "digits" => Some(Lang::Digits),
            "minimal" => Some(Lang::Minimal),
            "nucleotide" => Some(Lang::Nucleotide),
            _ => None,
        }
    }
}

/// Options for the `run` command.
struct RunOptions {
    lang: Lang,
    input: Vec<Cell>,
    tape_size: usize,
    seed: Option<u64>,
}

impl RunOptions {
    fn parse(args: &[String]) -> Result<Self, i32> {
        let mut options = RunOptions {
            lang: Lang::Digits,
            input: Vec::new(),
            tape_size: DEFAULT_TAPE_SIZE,
            seed: None,
        };

        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "--lang" => {
                    let value = flag_value(args, i)?;
                    options.lang = Lang::from_arg(value).ok_or_else(|| {
                        eprintln!("error: unknown language '{value}'");
                        1
                    })?;
                }
                "--input" => {
                    let value = flag_value(args, i)?;
                    options.input = parse_csv(value).map_err(|e| {
                        eprintln!("error: {e}");
                        1
                    })?;
                }
                "--tape-size" => {
                    let value = flag_value(args, i)?;
                    options.tape_size = value.parse().map_err(|_| {
                        eprintln!("error: invalid tape size '{value}'");
                        1
                    })?;
                }
                "--seed" => {
                    let value = flag_value(args, i)?;
                    options.seed = Some(value.parse().map_err(|_| {
                        eprintln!("error: invalid seed '{value}'");
                        1
                    })?);
                }
                other => {
                    eprintln!("error: unexpected argument '{other}'");
                    return Err(1);
                }
            }
            i += 2;
        }

        Ok(options)
    }
}

/// Execute a program file and print the output buffer, one value per line.
pub fn run(args: &[String]) -> Result<(), i32> {
    if args.is_empty() {
        eprintln!("error: run requires a program file");
        eprintln!("Usage: spindle run <program> [--lang L] [--input CSV] [--tape-size N] [--seed N]");
        return Err(1);
    }

    let path = &args[0];
    let options = RunOptions::parse(&args[1..])?;
    let text = read_program_text(path)?;
    let program = parse_program(&text, options.lang)?;

    let mut machine = Machine::with_tape(program, options.input, None, options.tape_size);
    if let Some(seed) = options.seed {
        machine = machine.with_random(Box::new(SeededSource::new(seed)));
    }

    match machine.run() {
        Ok(state) => {
            for value in &state.output {
                println!("{value}");
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("runtime error: {e}");
            Err(3)
        }
    }
}

/// Translate a mnemonic program file into numeric token text.
pub fn translate(args: &[String]) -> Result<(), i32> {
    if args.is_empty() {
        eprintln!("error: translate requires a program file");
        eprintln!("Usage: spindle translate <program> --lang minimal|nucleotide");
        return Err(1);
    }

    let path = &args[0];
    let lang = parse_translate_lang(&args[1..])?;
    let text = read_program_text(path)?;
    let program = parse_program(&text, lang)?;

    println!("{program}");
    Ok(())
}

// --- Helpers ---

fn read_program_text(path: &str) -> Result<String, i32> {
    fs::read_to_string(path).map_err(|e| {
        eprintln!("error: cannot read '{path}': {e}");
        1
    })
}

fn parse_program(text: &str, lang: Lang) -> Result<Program, i32> {
    let result = match lang {
        Lang::Digits => text.trim().parse().map_err(|e| format!("{e}")),
        Lang::Minimal => spindle_assembler::assemble_minimal(text).map_err(|e| format!("{e}")),
        Lang::Nucleotide => {
            spindle_assembler::assemble_nucleotide(text).map_err(|e| format!("{e}"))
        }
    };
    result.map_err(|e| {
        eprintln!("error: {e}");
        1
    })
}

/// Parse the `--lang` flag for translate, which has no digit default.
fn parse_translate_lang(args: &[String]) -> Result<Lang, i32> {
    let mut i = 0;
    while i < args.len() {
        if args[i] == "--lang" {
            let value = flag_value(args, i)?;
            return match Lang::from_arg(value) {
                Some(Lang::Digits) | None => {
                    eprintln!("error: translate expects --lang minimal or nucleotide");
                    Err(1)
                }
                Some(lang) => Ok(lang),
            };
        }
        i += 1;
    }
    eprintln!("error: --lang is required");
    eprintln!("Usage: spindle translate <program> --lang minimal|nucleotide");
    Err(1)
}

/// The value following a flag at `index`, or exit code 1 when missing.
fn flag_value(args: &[String], index: usize) -> Result<&str, i32> {
    args.get(index + 1).map(String::as_str).ok_or_else(|| {
        eprintln!("error: {} requires a value", args[index]);
        1
    })
}

/// Parse a comma-separated list of numbers. Empty text means no input.
fn parse_csv(text: &str) -> Result<Vec<Cell>, String> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }
    text.split(',')
        .map(|item| {
            let item = item.trim();
            item.parse()
                .map_err(|_| format!("invalid input value '{item}'"))
        })
        .collect()
}
