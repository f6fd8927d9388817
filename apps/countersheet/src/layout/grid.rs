//! Grid Composer: places tiles into a fixed-column grid of uniform cells.
//!
//! Position `i` maps to `(i mod columns, i div columns)`: left-to-right, then
//! top-to-bottom. Every tile is resampled to exactly the cell size. Slots past the
//! last tile stay white; nothing wraps around.

use std::borrow::Cow;
use std::str::FromStr;

use image::imageops::{self, FilterType};
use image::{DynamicImage, Rgba, RgbImage, RgbaImage};

use crate::errors::SheetError;
use crate::images::ImageHandle;
use crate::layout::cell::CellDimension;

const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);

// ────────────────────────────────────────────────────────────────────────────
// Grid geometry
// ────────────────────────────────────────────────────────────────────────────

/// Grid coordinate of one sequence position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub col: usize,
    pub row: usize,
}

/// Fixed-column grid shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    pub columns: usize,
    pub rows: usize,
    pub cell: CellDimension,
}

impl Grid {
    /// Grid just large enough for `count` tiles: `rows = ceil(count / columns)`.
    pub fn for_count(count: usize, columns: usize, cell: CellDimension) -> Result<Self, SheetError> {
        if columns == 0 {
            return Err(SheetError::InvalidColumns(0));
        }
        Ok(Grid {
            columns,
            rows: count.div_ceil(columns),
            cell,
        })
    }

    /// Grows the grid to at least `min_rows` rows. Never shrinks it.
    pub fn with_min_rows(self, min_rows: usize) -> Self {
        Grid {
            rows: self.rows.max(min_rows),
            ..self
        }
    }

    pub fn placement(&self, index: usize) -> Placement {
        Placement {
            col: index % self.columns,
            row: index / self.columns,
        }
    }

    /// Top-left pixel of the cell at sequence position `index`.
    pub fn origin(&self, index: usize) -> (u64, u64) {
        let p = self.placement(index);
        (
            p.col as u64 * self.cell.width as u64,
            p.row as u64 * self.cell.height as u64,
        )
    }

    /// `(columns * cell.width, rows * cell.height)`, checked against the encodable size.
    pub fn pixel_size(&self) -> Result<(u32, u32), SheetError> {
        let width = self.columns as u64 * self.cell.width as u64;
        let height = self.rows as u64 * self.cell.height as u64;
        match (u32::try_from(width), u32::try_from(height)) {
            (Ok(w), Ok(h)) => Ok((w, h)),
            _ => Err(SheetError::SheetTooLarge { width, height }),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Resampling
// ────────────────────────────────────────────────────────────────────────────

/// Filter used to stretch a tile into its cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Resample {
    Nearest,
    #[default]
    Triangle,
    CatmullRom,
    Lanczos3,
}

impl Resample {
    fn filter(self) -> FilterType {
        match self {
            Resample::Nearest => FilterType::Nearest,
            Resample::Triangle => FilterType::Triangle,
            Resample::CatmullRom => FilterType::CatmullRom,
            Resample::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

impl FromStr for Resample {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nearest" => Ok(Resample::Nearest),
            "triangle" => Ok(Resample::Triangle),
            "catmull-rom" | "catmullrom" => Ok(Resample::CatmullRom),
            "lanczos3" => Ok(Resample::Lanczos3),
            other => Err(format!(
                "unknown resample filter '{other}' (expected nearest, triangle, catmull-rom or lanczos3)"
            )),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Composition
// ────────────────────────────────────────────────────────────────────────────

/// A composed grid sheet: its geometry plus the RGB canvas.
#[derive(Debug, Clone)]
pub struct Sheet {
    pub grid: Grid,
    pub canvas: RgbImage,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct GridComposer {
    resample: Resample,
}

impl GridComposer {
    pub fn new(resample: Resample) -> Self {
        GridComposer { resample }
    }

    /// Composes `images` into a grid with `ceil(len / columns)` rows.
    ///
    /// An empty sequence yields a zero-row sheet, not an error.
    pub fn compose(
        &self,
        images: &[ImageHandle],
        columns: usize,
        cell: CellDimension,
    ) -> Result<Sheet, SheetError> {
        self.compose_with_min_rows(images, columns, cell, 0)
    }

    /// Like `compose`, but the sheet has at least `min_rows` rows.
    ///
    /// Used to give back-side sheets the same pixel size as the front sheet.
    pub fn compose_with_min_rows(
        &self,
        images: &[ImageHandle],
        columns: usize,
        cell: CellDimension,
        min_rows: usize,
    ) -> Result<Sheet, SheetError> {
        let grid = Grid::for_count(images.len(), columns, cell)?.with_min_rows(min_rows);
        let (width, height) = grid.pixel_size()?;

        let mut canvas = RgbaImage::from_pixel(width, height, BACKGROUND);
        for (i, image) in images.iter().enumerate() {
            let (x, y) = grid.origin(i);
            let tile = self.fit_to_cell(image, cell);
            imageops::overlay(&mut canvas, &*tile, x as i64, y as i64);
        }

        Ok(Sheet {
            grid,
            canvas: DynamicImage::ImageRgba8(canvas).into_rgb8(),
        })
    }

    fn fit_to_cell<'a>(&self, image: &'a ImageHandle, cell: CellDimension) -> Cow<'a, RgbaImage> {
        if image.width() == cell.width && image.height() == cell.height {
            Cow::Borrowed(image.pixels())
        } else {
            Cow::Owned(imageops::resize(
                image.pixels(),
                cell.width,
                cell.height,
                self.resample.filter(),
            ))
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::images::memory::solid;
    use image::Rgb;

    const RED: [u8; 4] = [255, 0, 0, 255];
    const BLUE: [u8; 4] = [0, 0, 255, 255];
    const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

    fn make_cell() -> CellDimension {
        CellDimension::new(4, 4)
    }

    fn make_tiles(count: usize) -> Vec<ImageHandle> {
        (0..count)
            .map(|i| solid(&format!("t{i}"), 4, 4, [i as u8 * 20, 100, 50, 255]))
            .collect()
    }

    // ── grid geometry ───────────────────────────────────────────────────────

    #[test]
    fn test_grid_rows_round_up() {
        let grid = Grid::for_count(7, 3, make_cell()).unwrap();
        assert_eq!(grid.rows, 3);
        assert_eq!(grid.placement(5), Placement { col: 2, row: 1 });
    }

    #[test]
    fn test_grid_exact_multiple_has_no_extra_row() {
        let grid = Grid::for_count(6, 3, make_cell()).unwrap();
        assert_eq!(grid.rows, 2);
    }

    #[test]
    fn test_grid_zero_columns_is_invalid() {
        assert!(matches!(
            Grid::for_count(4, 0, make_cell()),
            Err(SheetError::InvalidColumns(0))
        ));
    }

    #[test]
    fn test_grid_pixel_size() {
        let grid = Grid::for_count(7, 3, CellDimension::new(30, 20)).unwrap();
        assert_eq!(grid.pixel_size().unwrap(), (90, 60));
        assert_eq!(grid.origin(5), (60, 20));
    }

    #[test]
    fn test_grid_min_rows_never_shrinks() {
        let grid = Grid::for_count(7, 3, make_cell()).unwrap();
        assert_eq!(grid.with_min_rows(5).rows, 5);
        assert_eq!(grid.with_min_rows(1).rows, 3);
    }

    #[test]
    fn test_grid_oversized_sheet_is_error() {
        let grid = Grid::for_count(1, 100_000, CellDimension::new(100_000, 1)).unwrap();
        assert!(matches!(
            grid.pixel_size(),
            Err(SheetError::SheetTooLarge { .. })
        ));
    }

    // ── compose ─────────────────────────────────────────────────────────────

    #[test]
    fn test_compose_places_tiles_row_major() {
        let images = vec![
            solid("r", 4, 4, RED),
            solid("b", 4, 4, BLUE),
            solid("r2", 4, 4, RED),
        ];
        let sheet = GridComposer::default()
            .compose(&images, 2, make_cell())
            .unwrap();

        assert_eq!(sheet.canvas.dimensions(), (8, 8));
        assert_eq!(*sheet.canvas.get_pixel(1, 1), Rgb([255, 0, 0]));
        assert_eq!(*sheet.canvas.get_pixel(5, 1), Rgb([0, 0, 255]));
        assert_eq!(*sheet.canvas.get_pixel(1, 5), Rgb([255, 0, 0]));
        // Partial final row: the slot after the last tile stays blank.
        assert_eq!(*sheet.canvas.get_pixel(6, 6), WHITE);
    }

    #[test]
    fn test_compose_stretches_small_tiles_to_cell() {
        let images = vec![solid("tiny", 1, 2, BLUE)];
        let sheet = GridComposer::new(Resample::Nearest)
            .compose(&images, 1, CellDimension::new(6, 6))
            .unwrap();
        for (_, _, px) in sheet.canvas.enumerate_pixels() {
            assert_eq!(*px, Rgb([0, 0, 255]), "every pixel of the cell is covered");
        }
    }

    #[test]
    fn test_compose_transparent_tile_shows_background() {
        let images = vec![solid("clear", 4, 4, [0, 0, 0, 0])];
        let sheet = GridComposer::default()
            .compose(&images, 1, make_cell())
            .unwrap();
        assert_eq!(*sheet.canvas.get_pixel(2, 2), WHITE);
    }

    #[test]
    fn test_compose_empty_is_zero_row_sheet() {
        let sheet = GridComposer::default()
            .compose(&[], 3, make_cell())
            .unwrap();
        assert_eq!(sheet.grid.rows, 0);
        assert_eq!(sheet.canvas.height(), 0);
        assert_eq!(sheet.canvas.width(), 12);
    }

    #[test]
    fn test_compose_zero_columns_is_invalid() {
        assert!(matches!(
            GridComposer::default().compose(&make_tiles(2), 0, make_cell()),
            Err(SheetError::InvalidColumns(0))
        ));
    }

    #[test]
    fn test_compose_with_min_rows_pads_blank_rows() {
        let sheet = GridComposer::default()
            .compose_with_min_rows(&make_tiles(2), 3, make_cell(), 2)
            .unwrap();
        assert_eq!(sheet.canvas.dimensions(), (12, 8));
        assert_eq!(*sheet.canvas.get_pixel(1, 6), WHITE);
    }

    #[test]
    fn test_compose_is_deterministic() {
        let images: Vec<ImageHandle> = (0..5)
            .map(|i| solid(&format!("t{i}"), 3 + i, 5 - i % 2, [40 * i as u8, 90, 200, 255]))
            .collect();
        let composer = GridComposer::new(Resample::Lanczos3);
        let a = composer.compose(&images, 2, CellDimension::new(7, 5)).unwrap();
        let b = composer.compose(&images, 2, CellDimension::new(7, 5)).unwrap();
        assert_eq!(a.grid, b.grid);
        assert_eq!(a.canvas.as_raw(), b.canvas.as_raw());
    }

    // ── resample parsing ────────────────────────────────────────────────────

    #[test]
    fn test_resample_from_str() {
        assert_eq!("nearest".parse::<Resample>().unwrap(), Resample::Nearest);
        assert_eq!("Catmull-Rom".parse::<Resample>().unwrap(), Resample::CatmullRom);
        assert!("bicubic".parse::<Resample>().is_err());
        assert_eq!(Resample::default(), Resample::Triangle);
    }
}
