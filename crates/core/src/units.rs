//! Physical unit conversions for the raster layer.
//!
//! Label geometry is specified in millimetres and typographic points (the
//! units barcode writers conventionally expose); raster output is whole
//! pixels at a given DPI.

/// Millimetres per inch.
const MM_PER_INCH: f64 = 25.4;

/// Millimetres per typographic point (1 pt = 1/72 inch).
const MM_PER_POINT: f64 = 25.4 / 72.0;

/// Convert millimetres to whole pixels at `dpi`, rounded to nearest.
///
/// Positive input never collapses to zero pixels: anything that should be
/// visible is at least one pixel wide.
pub fn mm_to_px(mm: f64, dpi: u32) -> u32 {
    if mm <= 0.0 {
        return 0;
    }
    let px = (mm * f64::from(dpi) / MM_PER_INCH).round() as u32;
    px.max(1)
}

/// Convert typographic points to millimetres.
pub fn pt_to_mm(pt: f64) -> f64 {
    pt * MM_PER_POINT
}
