//! Fatal errors for the Spindle machine.
//!
//! Only malformed programs abort a run: an unmatched loop token means the
//! program cannot be safely continued. Recoverable conditions (domain
//! arithmetic errors, empty-resource reads, out-of-range addressing) never
//! leave the instruction handler that encountered them.

use thiserror::Error;

use crate::machine::MachineState;

/// The reason a run aborted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AbortKind {
    /// A loop entry with no matching exit before the end of the program.
    #[error("unmatched loop entry at token {at}")]
    UnmatchedLoopEntry { at: usize },

    /// A loop exit with no matching entry before the start of the program.
    #[error("unmatched loop exit at token {at}")]
    UnmatchedLoopExit { at: usize },
}

/// A fatal abort, carrying the machine state at the point of failure to
/// aid debugging.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind}")]
pub struct Abort {
    /// What went wrong.
    pub kind: AbortKind,
    /// The full machine state when the failure was detected.
    pub state: Box<MachineState>,
}
