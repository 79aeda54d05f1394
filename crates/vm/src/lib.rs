//! Spindle virtual machine — executes numeric token programs against a
//! circular, resizable memory tape.
//!
//! The machine is a single mutable state bundle:
//! - A [`Tape`] of numeric cells with a cursor (circular or clamped
//!   addressing, depending on the instruction)
//! - A [`Program`](spindle_common::Program) of fixed-width tokens with a
//!   program counter
//! - An input queue and a dual-ended output buffer
//! - An injectable [`RandomSource`] for the non-deterministic instructions
//!
//! Execution is single-threaded and synchronous: one instruction at a time,
//! to completion, with the whole state owned by one [`Machine`] for the
//! run's duration.
//!
//! # Usage
//!
//! ```
//! use spindle_common::Program;
//! use spindle_vm::run;
//!
//! // increment, increment, move forward, increment
//! let program: Program = "008008000008".parse().unwrap();
//! let state = run(program, vec![], None, 3).unwrap();
//!
//! assert_eq!(state.tape, vec![2.0, 1.0, 0.0]);
//! assert_eq!(state.tape_pointer, 1);
//! ```

pub mod error;
pub mod execute;
pub mod machine;
pub mod rng;
pub mod tape;

pub use error::{Abort, AbortKind};
pub use machine::{run, Machine, MachineState, Status, DEFAULT_TAPE_SIZE};
pub use rng::{RandomSource, ScriptedSource, SeededSource};
pub use tape::Tape;
