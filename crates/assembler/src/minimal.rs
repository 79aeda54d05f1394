//! The minimal tape language: eight single-character mnemonics.

/// Character-to-token mapping.
pub(crate) const TABLE: &[(char, u16)] = &[
    ('>', 0),  // move forward
    ('<', 4),  // move backward
    ('+', 8),  // increment
    ('-', 11), // decrement
    ('.', 20), // output current cell
    (',', 63), // read input into current cell
    ('[', 14), // loop entry
    (']', 15), // loop exit
];
