//! UPC-A encoding.
//!
//! UPC-A is the twelve-digit subset of EAN-13: prefixing a zero yields the
//! equivalent EAN-13 symbol, so the layout work is shared with that module.

use labelforge_core::{LabelError, LabelResult};

use crate::ean13;
use crate::pattern::BarPattern;

/// Encode a UPC-A payload.
///
/// Accepts eleven digits (the check digit is appended) or twelve (the
/// trailing check digit is verified).
pub(crate) fn encode(payload: &str) -> LabelResult<(BarPattern, String)> {
    let digits = ean13::parse_digits(payload)?;
    let full: Vec<u8> = match digits.len() {
        11 => {
            let mut with_prefix = vec![0u8];
            with_prefix.extend_from_slice(&digits);
            let check = ean13::check_digit(&with_prefix);
            let mut full = digits;
            full.push(check);
            full
        }
        12 => {
            let mut with_prefix = vec![0u8];
            with_prefix.extend_from_slice(&digits[..11]);
            let expected = ean13::check_digit(&with_prefix);
            let actual = digits[11];
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
                "UPC-A needs 11 or 12 digits, got {n}"
            )));
        }
    };
    let mut ean = [0u8; 13];
    ean[1..].copy_from_slice(&full);
    let text: String = full.iter().map(|&d| char::from(b'0' + d)).collect();
    Ok((ean13::build_pattern(&ean), text))
}
