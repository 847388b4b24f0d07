//! Raster layout and PNG output.

use std::path::Path;

use image::{GrayImage, ImageFormat, Luma};
use thiserror::Error;

use labelforge_core::{LabelError, LabelResult, units};
use labelforge_symbology::Barcode;

use crate::RenderOptions;
use crate::font;

const INK: Luma<u8> = Luma([0]);
const PAPER: Luma<u8> = Luma([255]);

/// Vertical margin above the bars and below the bottom row, in millimetres.
const MARGIN_MM: f64 = 1.0;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    Label(#[from] LabelError),
    #[error("image encoding failed: {0}")]
    Image(#[from] image::ImageError),
}

/// Pixel geometry of one rendered barcode.
struct Layout {
    width: u32,
    height: u32,
    quiet_px: u32,
    module_px: u32,
    margin_px: u32,
    bar_height_px: u32,
    text_top: u32,
    glyph_scale: u32,
}

impl Layout {
    fn for_barcode(barcode: &Barcode, options: &RenderOptions) -> Self {
        let dpi = options.dpi;
        let module_px = units::mm_to_px(options.module_width_mm, dpi);
        let quiet_px = units::mm_to_px(options.quiet_zone_mm, dpi);
        let margin_px = units::mm_to_px(MARGIN_MM, dpi);
        let bar_height_px = units::mm_to_px(options.module_height_mm, dpi);

        let modules = barcode.pattern().len() as u32;
        let width = 2 * quiet_px + modules * module_px;

        let glyph_px = units::mm_to_px(units::pt_to_mm(options.font_size_pt), dpi);
        let mut glyph_scale = (f64::from(glyph_px) / f64::from(font::GLYPH_HEIGHT))
            .round()
            .max(1.0) as u32;
        // The built-in font is monospaced and fairly wide; never let the
        // text line overrun the image, shrink it instead.
        let text_len = barcode.text().chars().count() as u32;
        if options.write_text && text_len > 0 {
            let max_fit = width / (text_len * (font::GLYPH_WIDTH + 1) - 1);
            glyph_scale = glyph_scale.min(max_fit).max(1);
        }

        let text_top = margin_px + bar_height_px + units::mm_to_px(options.text_distance_mm, dpi);
        let height = if options.write_text {
            text_top + font::GLYPH_HEIGHT * glyph_scale + margin_px
        } else {
            margin_px + bar_height_px + margin_px
        };

        Self {
            width,
            height,
            quiet_px,
            module_px,
            margin_px,
            bar_height_px,
            text_top,
            glyph_scale,
        }
    }
}

/// Pixel dimensions a barcode would occupy under the given options.
pub fn image_dimensions(barcode: &Barcode, options: &RenderOptions) -> LabelResult<(u32, u32)> {
    options.validate()?;
    let layout = Layout::for_barcode(barcode, options);
    Ok((layout.width, layout.height))
}

/// Draw a barcode into a fresh grayscale image.
pub fn render_to_image(
    barcode: &Barcode,
    options: &RenderOptions,
) -> Result<GrayImage, RenderError> {
    options.validate()?;
    let layout = Layout::for_barcode(barcode, options);
    let mut image = GrayImage::from_pixel(layout.width, layout.height, PAPER);

    for (index, &dark) in barcode.pattern().modules().iter().enumerate() {
        if dark {
            let x = layout.quiet_px + index as u32 * layout.module_px;
            fill_rect(
                &mut image,
                x,
                layout.margin_px,
                layout.module_px,
                layout.bar_height_px,
            );
        }
    }

    if options.write_text {
        draw_text(
            &mut image,
            barcode.text(),
            layout.text_top,
            layout.glyph_scale,
        );
    }
    Ok(image)
}

/// Render a barcode and write it to `path` as a PNG.
pub fn render_to_png_file(
    barcode: &Barcode,
    options: &RenderOptions,
    path: &Path,
) -> Result<(), RenderError> {
    let image = render_to_image(barcode, options)?;
    image.save_with_format(path, ImageFormat::Png)?;
    Ok(())
}

fn fill_rect(image: &mut GrayImage, x0: u32, y0: u32, width: u32, height: u32) {
    let x1 = x0.saturating_add(width).min(image.width());
    let y1 = y0.saturating_add(height).min(image.height());
    for y in y0..y1 {
        for x in x0..x1 {
            image.put_pixel(x, y, INK);
        }
    }
}

/// Draw `text` centred horizontally with its top edge at `top`. Glyphs are
/// integer-upscaled and separated by one scaled column.
fn draw_text(image: &mut GrayImage, text: &str, top: u32, scale: u32) {
    let count = text.chars().count() as u32;
    if count == 0 {
        return;
    }
    let advance = (font::GLYPH_WIDTH + 1) * scale;
    let text_width = count * advance - scale;
    let mut x = image.width().saturating_sub(text_width) / 2;

    for c in text.chars() {
        let rows = font::glyph(c);
        for (row_index, row) in rows.into_iter().enumerate() {
            for column in 0..font::GLYPH_WIDTH {
                if row & (1 << (font::GLYPH_WIDTH - 1 - column)) != 0 {
                    fill_rect(
                        image,
                        x + column * scale,
                        top + row_index as u32 * scale,
                        scale,
                        scale,
                    );
                }
            }
        }
        x += advance;
    }
}
