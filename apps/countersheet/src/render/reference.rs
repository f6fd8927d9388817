//! Single-sided reference sheet: one row per single-sided counter, its image at
//! native size on the left and its display name beside it.

use image::{imageops, DynamicImage, Rgba, RgbImage, RgbaImage};

use crate::errors::SheetError;
use crate::images::ImageHandle;
use crate::layout::CellDimension;
use crate::render::label::LabelPainter;

/// Horizontal gap between the cell column and the label.
pub const LABEL_GAP: u32 = 10;

pub struct ReferenceRow<'a> {
    pub image: &'a ImageHandle,
    pub label: &'a str,
}

/// Draws the reference sheet. Row `i` spans `[i * cell.height, (i + 1) * cell.height)`.
///
/// Labels start at `cell.width + LABEL_GAP`, baseline at the row's vertical middle,
/// size `cell.height / 4`.
pub fn draw_reference_sheet(
    rows: &[ReferenceRow<'_>],
    cell: CellDimension,
    width: u32,
    painter: &dyn LabelPainter,
) -> Result<RgbImage, SheetError> {
    let height = rows.len() as u64 * cell.height as u64;
    let height = u32::try_from(height).map_err(|_| SheetError::SheetTooLarge {
        width: width as u64,
        height,
    })?;

    let mut canvas = RgbaImage::from_pixel(width, height, Rgba([255, 255, 255, 255]));
    for (i, row) in rows.iter().enumerate() {
        let y = i as i64 * cell.height as i64;
        imageops::overlay(&mut canvas, row.image.pixels(), 0, y);
    }
    let mut canvas = DynamicImage::ImageRgba8(canvas).into_rgb8();

    let label_x = (cell.width + LABEL_GAP) as i32;
    let size_px = cell.height as f32 / 4.0;
    for (i, row) in rows.iter().enumerate() {
        let baseline = (i as u32 * cell.height + cell.height / 2) as i32;
        painter.paint(&mut canvas, row.label, label_x, baseline, size_px);
    }

    Ok(canvas)
}
