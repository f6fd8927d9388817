//! Cell Sizer: derives the uniform grid cell from every loaded image.

use serde::{Deserialize, Serialize};

use crate::errors::SheetError;
use crate::images::ImageHandle;

/// Size of one grid slot in pixels. Every tile is stretched to exactly this size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellDimension {
    pub width: u32,
    pub height: u32,
}

impl CellDimension {
    pub fn new(width: u32, height: u32) -> Self {
        CellDimension { width, height }
    }
}

/// Returns `{max width, max height}` over all images.
///
/// Callers pass the union of fronts, backs and single-sided images; duplicates
/// do not change the result. Width and height are maximised independently, so the
/// cell may be larger than any single image.
pub fn cell_dimension<'a, I>(images: I) -> Result<CellDimension, SheetError>
where
    I: IntoIterator<Item = &'a ImageHandle>,
{
    images
        .into_iter()
        .map(|img| (img.width(), img.height()))
        .reduce(|(w, h), (iw, ih)| (w.max(iw), h.max(ih)))
        .map(|(width, height)| CellDimension::new(width, height))
        .ok_or(SheetError::EmptyImageSet)
}
