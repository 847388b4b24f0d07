//! `labelforge-symbology` — barcode encoders.
//!
//! This crate turns payload strings into printable module patterns,
//! implemented purely as deterministic logic (no IO, no rasterization).
//! Each supported symbology enforces its own digit/length constraints and
//! computes its own check digit or check character.

pub mod code39;
pub mod code128;
pub mod ean13;
pub mod pattern;
pub mod upc;

use serde::{Deserialize, Serialize};

use labelforge_core::LabelResult;

use crate::pattern::BarPattern;

/// A barcode symbology supported by the label pipeline.
///
/// `Code39`'s check character is optional in the standard, so the choice
/// travels with the symbology rather than with render options: it changes
/// the encoded data, not its appearance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "symbology", rename_all = "lowercase")]
pub enum Symbology {
    UpcA,
    Ean13,
    Code39 { add_checksum: bool },
    Code128,
}

impl Symbology {
    /// Stable name used in manifests and logs (the conventional type keys).
    pub fn name(self) -> &'static str {
        match self {
            Symbology::UpcA => "upca",
            Symbology::Ean13 => "ean13",
            Symbology::Code39 { .. } => "code39",
            Symbology::Code128 => "code128",
        }
    }

    /// Encode `payload` under this symbology.
    pub fn encode(self, payload: &str) -> LabelResult<Barcode> {
        let (pattern, text) = match self {
            Symbology::UpcA => upc::encode(payload)?,
            Symbology::Ean13 => ean13::encode(payload)?,
            Symbology::Code39 { add_checksum } => code39::encode(payload, add_checksum)?,
            Symbology::Code128 => code128::encode(payload)?,
        };
        Ok(Barcode::new(self, pattern, text))
    }
}

impl core::fmt::Display for Symbology {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// A fully encoded barcode: the module pattern to print plus the
/// human-readable text line that belongs underneath it.
///
/// The text is the canonical full code (check digit / check character
/// included where one was computed), which is what a scanner reports back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Barcode {
    symbology: Symbology,
    pattern: BarPattern,
    text: String,
}

impl Barcode {
    pub(crate) fn new(symbology: Symbology, pattern: BarPattern, text: String) -> Self {
        Self {
            symbology,
            pattern,
            text,
        }
    }

    pub fn symbology(&self) -> Symbology {
        self.symbology
    }

    pub fn pattern(&self) -> &BarPattern {
        &self.pattern
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatch_reaches_every_encoder() {
        assert_eq!(
            Symbology::UpcA.encode("036000291452").unwrap().text(),
            "036000291452"
        );
        assert_eq!(
            Symbology::Ean13.encode("5901234123457").unwrap().text(),
            "5901234123457"
        );
        assert_eq!(
            Symbology::Code39 {
                add_checksum: false
            }
            .encode("MED-2023-001")
            .unwrap()
            .text(),
            "MED-2023-001"
        );
        assert!(Symbology::Code128.encode("DRUG-1A2B-3C4D").is_ok());
    }

    #[test]
    fn names_match_the_conventional_type_keys() {
        assert_eq!(Symbology::UpcA.name(), "upca");
        assert_eq!(Symbology::Ean13.name(), "ean13");
        assert_eq!(
            Symbology::Code39 {
                add_checksum: true
            }
            .name(),
            "code39"
        );
        assert_eq!(Symbology::Code128.name(), "code128");
        assert_eq!(Symbology::Code128.to_string(), "code128");
    }

    #[test]
    fn barcode_carries_its_symbology() {
        let barcode = Symbology::Ean13.encode("5901234123457").unwrap();
        assert_eq!(barcode.symbology(), Symbology::Ean13);
        assert_eq!(barcode.pattern().len(), 95);
    }
}
