//! Module pattern representation shared by all encoders.

/// An ordered run of barcode modules of uniform width.
///
/// `true` is a dark module (ink), `false` a light one. Quiet zones are not
/// part of the pattern; the render layer adds them around it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarPattern {
    modules: Vec<bool>,
}

impl BarPattern {
    pub(crate) fn new() -> Self {
        Self {
            modules: Vec::new(),
        }
    }

    /// Append modules from a `'1'`/`'0'` bit string (the notation the
    /// symbology tables are written in).
    pub(crate) fn push_bits(&mut self, bits: &str) {
        self.modules.extend(bits.bytes().map(|b| b == b'1'));
    }

    /// Append `count` modules of one colour (Code 128 width notation).
    pub(crate) fn push_run(&mut self, dark: bool, count: usize) {
        self.modules.extend(core::iter::repeat_n(dark, count));
    }

    /// Build a pattern straight from a bit string.
    pub fn from_bits(bits: &str) -> Self {
        let mut pattern = Self::new();
        pattern.push_bits(bits);
        pattern
    }

    /// Number of modules.
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Modules in print order.
    pub fn modules(&self) -> &[bool] {
        &self.modules
    }

    /// The `'1'`/`'0'` notation, for tests and debugging.
    pub fn as_bit_string(&self) -> String {
        self.modules
            .iter()
            .map(|&dark| if dark { '1' } else { '0' })
            .collect()
    }
}
