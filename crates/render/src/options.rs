//! Render geometry options.

use serde::{Deserialize, Serialize};

use labelforge_core::{LabelError, LabelResult};

/// Geometry and text options for rasterizing a barcode.
///
/// Millimetre and point units with conversion at [`RenderOptions::dpi`].
/// All fields are optional when deserialized; anything left out keeps its
/// default, so callers can override just the values they care about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Width of a single module in millimetres.
    pub module_width_mm: f64,
    /// Height of the bars in millimetres.
    pub module_height_mm: f64,
    /// Blank margin left and right of the bars, in millimetres.
    pub quiet_zone_mm: f64,
    /// Label font size in points (1 pt = 1/72 inch).
    pub font_size_pt: f64,
    /// Gap between the bottom of the bars and the top of the text,
    /// in millimetres.
    pub text_distance_mm: f64,
    /// Output resolution in dots per inch.
    pub dpi: u32,
    /// Whether to draw the human-readable text beneath the bars.
    pub write_text: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            module_width_mm: 0.2,
            module_height_mm: 15.0,
            quiet_zone_mm: 6.5,
            font_size_pt: 10.0,
            text_distance_mm: 5.0,
            dpi: 300,
            write_text: true,
        }
    }
}

impl RenderOptions {
    /// Validate the geometry before rendering.
    pub fn validate(&self) -> LabelResult<()> {
        let lengths = [
            self.module_width_mm,
            self.module_height_mm,
            self.quiet_zone_mm,
            self.font_size_pt,
            self.text_distance_mm,
        ];
        if lengths.iter().any(|v| !v.is_finite()) {
            return Err(LabelError::invalid_options(
                "geometry values must be finite",
            ));
        }
        if self.module_width_mm <= 0.0 {
            return Err(LabelError::invalid_options(
                "module width must be greater than 0",
            ));
        }
        if self.module_height_mm <= 0.0 {
            return Err(LabelError::invalid_options(
                "module height must be greater than 0",
            ));
        }
        if self.quiet_zone_mm < 0.0 {
            return Err(LabelError::invalid_options("quiet zone cannot be negative"));
        }
        if self.text_distance_mm < 0.0 {
            return Err(LabelError::invalid_options(
                "text distance cannot be negative",
            ));
        }
        if self.dpi == 0 {
            return Err(LabelError::invalid_options("dpi must be greater than 0"));
        }
        if self.write_text && self.font_size_pt <= 0.0 {
            return Err(LabelError::invalid_options(
                "font size must be greater than 0 when text is enabled",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert!(RenderOptions::default().validate().is_ok());
    }

    #[test]
    fn non_positive_geometry_rejected() {
        for bad in [
            RenderOptions {
                module_width_mm: 0.0,
                ..RenderOptions::default()
            },
            RenderOptions {
                module_height_mm: -5.0,
                ..RenderOptions::default()
            },
            RenderOptions {
                quiet_zone_mm: -0.1,
                ..RenderOptions::default()
            },
            RenderOptions {
                text_distance_mm: -1.0,
                ..RenderOptions::default()
            },
            RenderOptions {
                dpi: 0,
                ..RenderOptions::default()
            },
            RenderOptions {
                font_size_pt: 0.0,
                ..RenderOptions::default()
            },
            RenderOptions {
                module_width_mm: f64::NAN,
                ..RenderOptions::default()
            },
        ] {
            assert!(bad.validate().is_err(), "expected rejection of {bad:?}");
        }
    }

    #[test]
    fn font_size_is_ignored_without_text() {
        let options = RenderOptions {
            write_text: false,
            font_size_pt: 0.0,
            ..RenderOptions::default()
        };
        assert!(options.validate().is_ok());
    }

    #[test]
    fn partial_overrides_keep_defaults() {
        let options: RenderOptions =
            serde_json::from_str(r#"{"module_width_mm": 0.3, "module_height_mm": 20.0}"#)
                .unwrap();
        assert_eq!(options.module_width_mm, 0.3);
        assert_eq!(options.module_height_mm, 20.0);
        assert_eq!(options.quiet_zone_mm, 6.5);
        assert_eq!(options.dpi, 300);
        assert!(options.write_text);
    }
}
