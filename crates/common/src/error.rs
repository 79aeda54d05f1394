//! Parse errors for Spindle program text.

use thiserror::Error;

/// Errors that occur while parsing program text into tokens.
///
/// These are construction-time errors raised by the caller assembling a
/// program; the execution engine itself never sees malformed tokens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Program text length is not a multiple of the token width.
    #[error("program text length {0} is not a multiple of 3")]
    InvalidLength(usize),

    /// A token slice contained something other than three decimal digits.
    #[error("invalid token '{token}' at token index {index}")]
    InvalidToken { index: usize, token: String },
}
