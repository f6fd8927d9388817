//! Label painting for the reference sheet.
//!
//! `FontLabelPainter` rasterises text with `ab_glyph` via `imageproc`. The default
//! face is compiled into the binary, so labels never depend on what fonts the
//! host has installed; `--font` replaces it.

use std::path::Path;

use ab_glyph::{Font, FontArc, PxScale, ScaleFont};
use image::{Rgb, RgbImage};
use imageproc::drawing::draw_text_mut;
use tracing::debug;

use crate::errors::SheetError;

const INK: Rgb<u8> = Rgb([0, 0, 0]);

/// Sans-serif face shipped with egui's default font set.
const DEFAULT_FONT_BYTES: &[u8] = epaint_default_fonts::UBUNTU_LIGHT;

pub trait LabelPainter {
    /// Draws `text` starting at `x` with its baseline at `baseline`.
    fn paint(&self, canvas: &mut RgbImage, text: &str, x: i32, baseline: i32, size_px: f32);
}

pub struct FontLabelPainter {
    font: FontArc,
}

impl FontLabelPainter {
    /// Loads a TTF/OTF file.
    pub fn from_file(path: &Path) -> Result<Self, SheetError> {
        let bytes = std::fs::read(path)?;
        let font = FontArc::try_from_vec(bytes)
            .map_err(|e| SheetError::Font(format!("{}: {e}", path.display())))?;
        debug!(font = %path.display(), "Using label font");
        Ok(FontLabelPainter { font })
    }

    /// The built-in face.
    pub fn embedded() -> Result<Self, SheetError> {
        let font = FontArc::try_from_slice(DEFAULT_FONT_BYTES)
            .map_err(|e| SheetError::Font(format!("built-in font: {e}")))?;
        Ok(FontLabelPainter { font })
    }
}

impl LabelPainter for FontLabelPainter {
    fn paint(&self, canvas: &mut RgbImage, text: &str, x: i32, baseline: i32, size_px: f32) {
        if size_px <= 0.0 {
            return;
        }
        let scale = PxScale::from(size_px);
        let ascent = self.font.as_scaled(scale).ascent();
        let top = baseline - ascent.round() as i32;
        draw_text_mut(canvas, INK, x, top, scale, &self.font, text);
    }
}

/// Paints nothing.
#[cfg(test)]
pub struct NoLabels;

#[cfg(test)]
impl LabelPainter for NoLabels {
    fn paint(&self, _canvas: &mut RgbImage, _text: &str, _x: i32, _baseline: i32, _size_px: f32) {}
}
