//! Shared translation machinery for the character-to-token languages.

use spindle_common::Program;

use crate::error::AsmError;

/// Translate mnemonic text through a (character, token) table.
///
/// ASCII whitespace is skipped; any other unmapped character is an error
/// carrying its character position.
pub(crate) fn assemble_with(table: &[(char, u16)], text: &str) -> Result<Program, AsmError> {
    let mut tokens = Vec::new();
    for (position, ch) in text.chars().enumerate() {
        if ch.is_ascii_whitespace() {
            continue;
        }
        let token = table
            .iter()
            .find(|(c, _)| *c == ch)
            .map(|(_, t)| *t)
            .ok_or(AsmError::UnknownMnemonic { position, ch })?;
        tokens.push(token);
    }
    Ok(Program::new(tokens))
}

/// Render a token program back to mnemonic text through the same table.
///
/// Fails on the first token the language cannot express.
pub(crate) fn disassemble_with(table: &[(char, u16)], program: &Program) -> Result<String, AsmError> {
    let mut text = String::with_capacity(program.len());
    for (index, &token) in program.tokens().iter().enumerate() {
        let ch = table
            .iter()
            .find(|(_, t)| *t == token)
            .map(|(c, _)| *c)
            .ok_or(AsmError::Unrepresentable { index, token })?;
        text.push(ch);
    }
    Ok(text)
}
