//! Code 39 encoding.
//!
//! Each character is nine elements (five bars, four spaces) of which three
//! are wide. With wide elements three modules across, a symbol is 15 modules.
//! Symbols are separated by one narrow space and the whole code is wrapped
//! in `*` delimiters.

use labelforge_core::{LabelError, LabelResult};

use crate::pattern::BarPattern;

/// Encodable characters, in checksum value order (0 to 42).
const CHARSET: &str = "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ-. $/+%";

/// Module patterns in [`CHARSET`] order.
const PATTERNS: [&str; 43] = [
    "101000111011101", // 0
    "111010001010111", // 1
    "101110001010111", // 2
    "111011100010101", // 3
    "101000111010111", // 4
    "111010001110101", // 5
    "101110001110101", // 6
    "101000101110111", // 7
    "111010001011101", // 8
    "101110001011101", // 9
    "111010100010111", // A
    "101110100010111", // B
    "111011101000101", // C
    "101011100010111", // D
    "111010111000101", // E
    "101110111000101", // F
    "101010001110111", // G
    "111010100011101", // H
    "101110100011101", // I
    "101011100011101", // J
    "111010101000111", // K
    "101110101000111", // L
    "111011101010001", // M
    "101011101000111", // N
    "111010111010001", // O
    "101110111010001", // P
    "101010111000111", // Q
    "111010101110001", // R
    "101110101110001", // S
    "101011101110001", // T
    "111000101010111", // U
    "100011101010111", // V
    "111000111010101", // W
    "100010111010111", // X
    "111000101110101", // Y
    "100011101110101", // Z
    "100010101110111", // -
    "111000101011101", // .
    "100011101011101", // space
    "100010001000101", // $
    "100010001010001", // /
    "100010100010001", // +
    "101000100010001", // %
];

/// Start/stop delimiter (`*`). Not a data character.
const EDGE: &str = "100010111011101";

const GAP: &str = "0";

fn char_value(c: char) -> LabelResult<usize> {
    CHARSET.find(c).ok_or_else(|| {
        LabelError::invalid_payload(format!("character '{c}' is not in the Code 39 charset"))
    })
}

/// Modulo-43 check character over the payload's character values.
pub(crate) fn check_char(payload: &str) -> LabelResult<char> {
    let mut sum = 0usize;
    for c in payload.chars() {
        sum += char_value(c)?;
    }
    Ok(char::from(CHARSET.as_bytes()[sum % 43]))
}

/// Encode a Code 39 payload, optionally appending the modulo-43 check
/// character. The returned text includes the check character when one was
/// added; the `*` delimiters are never part of the text.
pub(crate) fn encode(payload: &str, add_checksum: bool) -> LabelResult<(BarPattern, String)> {
    if payload.is_empty() {
        return Err(LabelError::invalid_payload("empty Code 39 payload"));
    }
    let mut text = payload.to_owned();
    if add_checksum {
        text.push(check_char(payload)?);
    }

    let mut pattern = BarPattern::new();
    pattern.push_bits(EDGE);
    for c in text.chars() {
        pattern.push_bits(GAP);
        pattern.push_bits(PATTERNS[char_value(c)?]);
    }
    pattern.push_bits(GAP);
    pattern.push_bits(EDGE);
    Ok((pattern, text))
}
