//! Program representation for Spindle token streams.
//!
//! A program is a fixed-length sequence of numeric tokens, written in text
//! as a flat string of non-overlapping 3-digit slices (`"008008020"`).
//! The length never changes after construction, but the content can: the
//! reversal instruction rewrites the token order in place.

use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;

/// Width of one token in program text, in characters.
pub const TOKEN_WIDTH: usize = 3;

/// A Spindle program: a fixed-length, content-mutable sequence of tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    tokens: Vec<u16>,
}

impl Program {
    /// Create a program from a vector of tokens.
    ///
    /// Tokens outside `0..=999` are representable but decode to the no-op
    /// handler like any other unassigned token.
    pub fn new(tokens: Vec<u16>) -> Self {
        Self { tokens }
    }

    /// The token at `index`, or `None` past the end.
    pub fn get(&self, index: usize) -> Option<u16> {
        self.tokens.get(index).copied()
    }

    /// Number of tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns true if the program has no tokens.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Reverse the token order in place. The length is unchanged.
    pub fn reverse(&mut self) {
        self.tokens.reverse();
    }

    /// The raw token slice.
    pub fn tokens(&self) -> &[u16] {
        &self.tokens
    }

    /// Render the program as its canonical text form: each token as three
    /// zero-padded decimal digits, concatenated.
    pub fn render(&self) -> String {
        let mut text = String::with_capacity(self.tokens.len() * TOKEN_WIDTH);
        for token in &self.tokens {
            text.push_str(&format!("{token:03}"));
        }
        text
    }
}

impl FromStr for Program {
    type Err = ParseError;

    /// Parse program text. The text length must be a multiple of three and
    /// every slice must be three ASCII decimal digits.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        if !text.len().is_multiple_of(TOKEN_WIDTH) {
            return Err(ParseError::InvalidLength(text.len()));
        }

        let mut tokens = Vec::with_capacity(text.len() / TOKEN_WIDTH);
        for (index, chunk) in text.as_bytes().chunks_exact(TOKEN_WIDTH).enumerate() {
            if !chunk.iter().all(|b| b.is_ascii_digit()) {
                return Err(ParseError::InvalidToken {
                    index,
                    token: String::from_utf8_lossy(chunk).into_owned(),
                });
            }
            let token = chunk
                .iter()
                .fold(0u16, |acc, b| acc * 10 + u16::from(b - b'0'));
            tokens.push(token);
        }

        Ok(Self { tokens })
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
