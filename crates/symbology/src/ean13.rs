//! EAN-13 encoding.
//!
//! An EAN-13 symbol is 95 modules: a start guard, six left digits encoded
//! with a parity mix selected by the leading digit, a centre guard, six
//! right digits, and an end guard. The thirteenth digit is a modulo-10
//! check digit computed over the first twelve.

use labelforge_core::{LabelError, LabelResult};

use crate::pattern::BarPattern;

/// Left-hand odd parity codes, indexed by digit.
const L_CODES: [&str; 10] = [
    "0001101", "0011001", "0010011", "0111101", "0100011", "0110001", "0101111", "0111011",
    "0110111", "0001011",
];

/// Left-hand even parity codes.
const G_CODES: [&str; 10] = [
    "0100111", "0110011", "0011011", "0100001", "0011101", "0111001", "0000101", "0010001",
    "0001001", "0010111",
];

/// Right-hand codes.
const R_CODES: [&str; 10] = [
    "1110010", "1100110", "1101100", "1000010", "1011100", "1001110", "1010000", "1000100",
    "1001000", "1110100",
];

/// Parity pattern of the six left digits, indexed by the first digit of the
/// number. `true` selects odd parity (L), `false` even parity (G).
const PARITY: [[bool; 6]; 10] = [
    [true, true, true, true, true, true],
    [true, true, false, true, false, false],
    [true, true, false, false, true, false],
    [true, true, false, false, false, true],
    [true, false, true, true, false, false],
    [true, false, false, true, true, false],
    [true, false, false, false, true, true],
    [true, false, true, false, true, false],
    [true, false, true, false, false, true],
    [true, false, false, true, false, true],
];

const SIDE_GUARD: &str = "101";
const CENTRE_GUARD: &str = "01010";

/// Parse a payload into decimal digit values, rejecting anything else.
pub(crate) fn parse_digits(payload: &str) -> LabelResult<Vec<u8>> {
    payload
        .chars()
        .map(|c| {
            c.to_digit(10)
                .map(|d| d as u8)
                .ok_or_else(|| LabelError::invalid_payload(format!("non-digit character '{c}'")))
        })
        .collect()
}

/// EAN check digit over the digits preceding it. Weights alternate 1 and 3
/// from the left; for EAN-13 the leftmost digit carries weight 1.
pub(crate) fn check_digit(digits: &[u8]) -> u8 {
    let sum: u32 = digits
        .iter()
        .enumerate()
        .map(|(i, &d)| {
            let weight = if i % 2 == 0 { 1 } else { 3 };
            u32::from(d) * weight
        })
        .sum();
    ((10 - (sum % 10)) % 10) as u8
}

/// Lay out the 95-module pattern for thirteen digits (check digit included).
pub(crate) fn build_pattern(digits: &[u8; 13]) -> BarPattern {
    let parity = &PARITY[digits[0] as usize];
    let mut pattern = BarPattern::new();
    pattern.push_bits(SIDE_GUARD);
    for (i, &digit) in digits[1..7].iter().enumerate() {
        let codes = if parity[i] { &L_CODES } else { &G_CODES };
        pattern.push_bits(codes[digit as usize]);
    }
    pattern.push_bits(CENTRE_GUARD);
    for &digit in &digits[7..13] {
        pattern.push_bits(R_CODES[digit as usize]);
    }
    pattern.push_bits(SIDE_GUARD);
    pattern
}

/// Encode an EAN-13 payload.
///
/// Accepts twelve digits (the check digit is appended) or thirteen (the
/// trailing check digit is verified). Returns the pattern together with the
/// full thirteen-digit text.
pub(crate) fn encode(payload: &str) -> LabelResult<(BarPattern, String)> {
    let digits = parse_digits(payload)?;
    let full: Vec<u8> = match digits.len() {
        12 => {
            let mut full = digits;
            full.push(check_digit(&full));
            full
        }
        13 => {
            let expected = check_digit(&digits[..12]);
            let actual = digits[12];
            if actual != expected {
                return Err(LabelError::checksum_mismatch(
                    char::from(b'0' + expected),
                    char::from(b'0' + actual),
                ));
            }
            digits
        }
        n => {
            return Err(LabelError::invalid_payload(format!(
                "EAN-13 needs 12 or 13 digits, got {n}"
            )));
        }
    };
    let mut fixed = [0u8; 13];
    fixed.copy_from_slice(&full);
    let text: String = full.iter().map(|&d| char::from(b'0' + d)).collect();
    Ok((build_pattern(&fixed), text))
}
