//! Spindle common types and program encoding.
//!
//! This crate provides the foundational data structures for the Spindle
//! tape machine:
//!
//! - [`Opcode`] — the instruction roster, decoded totally from numeric tokens
//! - [`Program`] — a fixed-length token sequence with text parse/render
//! - [`Cell`] — the numeric cell type shared by tape, input, and output
//! - [`ParseError`] — errors from parsing program text
//!
//! # Dependencies
//!
//! This crate uses `thiserror` (compile-time proc-macro, zero runtime cost)
//! and has no other dependencies.

pub mod error;
pub mod opcode;
pub mod program;

// Re-export commonly used types at the crate root.
pub use error::ParseError;
pub use opcode::Opcode;
pub use program::Program;
pub use program::TOKEN_WIDTH;

/// The numeric cell type. Integers and floats share this representation;
/// instructions that need an integer truncate toward zero.
pub type Cell = f64;
