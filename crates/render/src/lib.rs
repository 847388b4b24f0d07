//! `labelforge-render` — raster output for encoded barcodes.
//!
//! Takes a [`labelforge_symbology::Barcode`] and draws it into an 8-bit
//! grayscale image: quiet zones left and right, bars at an integer pixel
//! width per module, and optionally the human-readable text centred
//! beneath the bars. Geometry is specified in millimetres and points and
//! converted at the configured DPI.

mod font;
pub mod options;
pub mod writer;

pub use options::RenderOptions;
pub use writer::{RenderError, image_dimensions, render_to_image, render_to_png_file};
