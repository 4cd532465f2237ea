//! Screen Geometry
//!
//! Framebuffer-derived constants shared by every symbology element. Computed
//! once at startup from the framebuffer size and the configured pitch range.

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::config::HudConfig;
use crate::error::HudError;

/// A pixel position, origin at the top-left corner, y growing downward
pub type ScreenPoint = Point2<i32>;

/// Fraction of the font height taken by one monospace glyph
const GLYPH_WIDTH_RATIO: f64 = 0.6;

/// Named HUD colors; the renderer maps them to pixel values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Black,
    White,
    Green,
    Yellow,
    Red,
    Blue,
}

/// Fixed screen layout constants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenGeometry {
    /// Framebuffer width in pixels
    pub width: i32,
    /// Framebuffer height in pixels
    pub height: i32,
    /// Screen center
    pub center: ScreenPoint,
    /// Horizontal pixels per degree; the full width spans 360 degrees
    pub pixels_per_degree_x: f64,
    /// Vertical pixels per degree of pitch
    pub pixels_per_degree_y: f64,
    /// Standard stroke width
    pub line_width: i32,
    /// Height of the readout font in pixels
    pub font_height: i32,
    /// Advance of one readout glyph in pixels
    pub glyph_width: i32,
}

impl ScreenGeometry {
    /// Derive the geometry for a framebuffer and pitch configuration
    pub fn new(width: i32, height: i32, config: &HudConfig) -> Result<Self, HudError> {
        if width <= 0 || height <= 0 {
            return Err(HudError::InvalidScreenSize { width, height });
        }
        config.validate()?;

        let font_height = (height / 12).max(1);
        let geometry = ScreenGeometry {
            width,
            height,
            center: ScreenPoint::new(width >> 1, height >> 1),
            pixels_per_degree_x: width as f64 / 360.0,
            pixels_per_degree_y: (height as f64 / config.degrees_of_pitch)
                * config.pitch_degrees_display_scaler,
            line_width: ((width as f64 * 0.005) as i32).max(1),
            font_height,
            glyph_width: ((font_height as f64 * GLYPH_WIDTH_RATIO) as i32).max(1),
        };

        log::debug!(
            "Screen {}x{}: {:.4} px/deg x, {:.4} px/deg y",
            width,
            height,
            geometry.pixels_per_degree_x,
            geometry.pixels_per_degree_y
        );

        Ok(geometry)
    }

    /// Half the font height
    pub fn font_half_height(&self) -> i32 {
        self.font_height >> 1
    }

    /// Pixel width of a string in the readout font
    pub fn text_width(&self, text: &str) -> i32 {
        self.glyph_width * text.chars().count() as i32
    }
}
