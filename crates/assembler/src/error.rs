//! Error types for the Spindle mnemonic translators.

use thiserror::Error;

/// Errors produced while translating between mnemonic text and tokens.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AsmError {
    /// A character with no token mapping in the selected language.
    #[error("unknown mnemonic '{ch}' at position {position}")]
    UnknownMnemonic { position: usize, ch: char },

    /// A token with no mnemonic in the selected language, hit while
    /// rendering a program back to text.
    #[error("token {token:03} at index {index} has no mnemonic")]
    Unrepresentable { index: usize, token: u16 },
}
