//! Code 128 encoding.
//!
//! Symbols are eleven modules wide, written here as six element widths
//! (three bars, three spaces). Code sets A, B and C share the table; set
//! selection is greedy with digit runs compressed into set C. A modulo-103
//! check symbol precedes the thirteen-module stop pattern.

use labelforge_core::{LabelError, LabelResult};

use crate::pattern::BarPattern;

/// Element widths for symbol values 0 through 105. Values 103 to 105 are
/// the start symbols; 99 to 101 switch code sets.
const SYMBOL_WIDTHS: [&str; 106] = [
    "212222", "222122", "222221", "121223", "121322", // 0
    "131222", "122213", "122312", "132212", "221213", // 5
    "221312", "231212", "112232", "122132", "122231", // 10
    "113222", "123122", "123221", "223211", "221132", // 15
    "221231", "213212", "223112", "312131", "311222", // 20
    "321122", "321221", "312212", "322112", "322211", // 25
    "212123", "212321", "232121", "111323", "131123", // 30
    "131321", "112313", "132113", "132311", "211313", // 35
    "231113", "231311", "112133", "112331", "132131", // 40
    "113123", "113321", "133121", "313121", "211331", // 45
    "231131", "213113", "213311", "213131", "311123", // 50
    "311321", "331121", "312113", "312311", "332111", // 55
    "314111", "221411", "431111", "111224", "111422", // 60
    "121124", "121421", "141122", "141221", "112214", // 65
    "112412", "122114", "122411", "142112", "142211", // 70
    "241211", "221114", "413111", "241112", "134111", // 75
    "111242", "121142", "121241", "114212", "124112", // 80
    "124211", "411212", "421112", "421211", "212141", // 85
    "214121", "412121", "111143", "111341", "131141", // 90
    "114113", "114311", "411113", "411311", "113141", // 95
    "114131", "311141", "411131", "211412", "211214", // 100
    "211232", // 105
];

/// Stop pattern, thirteen modules.
const STOP_WIDTHS: &str = "2331112";

const CODE_C: u8 = 99;
const CODE_B: u8 = 100;
const CODE_A: u8 = 101;
const START_A: u8 = 103;
const START_B: u8 = 104;
const START_C: u8 = 105;

#[derive(Clone, Copy, PartialEq, Eq)]
enum CodeSet {
    A,
    B,
    C,
}

fn value_in_a(byte: u8) -> u8 {
    if byte < 0x20 { byte + 64 } else { byte - 32 }
}

fn value_in_b(byte: u8) -> u8 {
    byte - 32
}

/// Length of the run of ASCII digits starting at `from`.
fn digit_run(bytes: &[u8], from: usize) -> usize {
    bytes[from..]
        .iter()
        .take_while(|b| b.is_ascii_digit())
        .count()
}

/// Pick the start symbol and code set for a payload.
fn start_set(bytes: &[u8]) -> CodeSet {
    let leading_digits = digit_run(bytes, 0);
    if bytes.len() == 2 && leading_digits == 2 {
        CodeSet::C
    } else if leading_digits >= 4 {
        CodeSet::C
    } else if bytes[0] < 0x20 {
        CodeSet::A
    } else {
        CodeSet::B
    }
}

/// Translate a payload into symbol values: start symbol, data and code-set
/// switches, without the check symbol.
///
/// Digit runs of six or more (or four or more closing the payload) are
/// compressed into set C two digits per symbol; an odd run length spends
/// one digit in the current set first so the remainder pairs up.
fn symbol_values(payload: &str) -> LabelResult<Vec<u8>> {
    if payload.is_empty() {
        return Err(LabelError::invalid_payload("empty Code 128 payload"));
    }
    if let Some(c) = payload.chars().find(|c| !c.is_ascii()) {
        return Err(LabelError::invalid_payload(format!(
            "Code 128 accepts ASCII only, found '{c}'"
        )));
    }

    let bytes = payload.as_bytes();
    let mut set = start_set(bytes);
    let mut values = vec![match set {
        CodeSet::A => START_A,
        CodeSet::B => START_B,
        CodeSet::C => START_C,
    }];

    let mut i = 0;
    while i < bytes.len() {
        match set {
            CodeSet::C => {
                if digit_run(bytes, i) >= 2 {
                    values.push((bytes[i] - b'0') * 10 + (bytes[i + 1] - b'0'));
                    i += 2;
                } else if bytes[i] < 0x20 {
                    values.push(CODE_A);
                    set = CodeSet::A;
                } else {
                    values.push(CODE_B);
                    set = CodeSet::B;
                }
            }
            CodeSet::B => {
                let run = digit_run(bytes, i);
                if run >= 6 || (run >= 4 && i + run == bytes.len()) {
                    if run % 2 == 1 {
                        values.push(value_in_b(bytes[i]));
                        i += 1;
                    }
                    values.push(CODE_C);
                    set = CodeSet::C;
                } else if bytes[i] < 0x20 {
                    values.push(CODE_A);
                    set = CodeSet::A;
                } else {
                    values.push(value_in_b(bytes[i]));
                    i += 1;
                }
            }
            CodeSet::A => {
                let run = digit_run(bytes, i);
                if run >= 6 || (run >= 4 && i + run == bytes.len()) {
                    if run % 2 == 1 {
                        values.push(value_in_a(bytes[i]));
                        i += 1;
                    }
                    values.push(CODE_C);
                    set = CodeSet::C;
                } else if bytes[i] > 0x5F {
                    values.push(CODE_B);
                    set = CodeSet::B;
                } else {
                    values.push(value_in_a(bytes[i]));
                    i += 1;
                }
            }
        }
    }
    Ok(values)
}

/// Modulo-103 check symbol: start value plus position-weighted data values.
fn check_symbol(values: &[u8]) -> u8 {
    let sum: u32 = values
        .iter()
        .enumerate()
        .map(|(i, &v)| u32::from(v) * (i as u32).max(1))
        .sum();
    (sum % 103) as u8
}

fn push_widths(pattern: &mut BarPattern, widths: &str) {
    for (i, c) in widths.bytes().enumerate() {
        pattern.push_run(i % 2 == 0, usize::from(c - b'0'));
    }
}

/// Encode a Code 128 payload. The human-readable text is the payload
/// itself; start, switch, check and stop symbols stay invisible.
pub(crate) fn encode(payload: &str) -> LabelResult<(BarPattern, String)> {
    let values = symbol_values(payload)?;
    let check = check_symbol(&values);

    let mut pattern = BarPattern::new();
    for &value in &values {
        push_widths(&mut pattern, SYMBOL_WIDTHS[value as usize]);
    }
    push_widths(&mut pattern, SYMBOL_WIDTHS[check as usize]);
    push_widths(&mut pattern, STOP_WIDTHS);
    Ok((pattern, payload.to_owned()))
}
