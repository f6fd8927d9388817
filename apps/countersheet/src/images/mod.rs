//! Image Provider: resolves logical image names from the index to decoded pixels.
//!
//! The core never touches the filesystem directly: it asks an `ImageProvider` for
//! each name and receives a cheap-to-clone `ImageHandle`. `DirImageProvider` reads
//! from an image root directory; tests substitute an in-memory provider.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use image::{DynamicImage, RgbaImage};
use tracing::debug;

use crate::errors::SheetError;

#[cfg(test)]
pub mod memory;

// ────────────────────────────────────────────────────────────────────────────
// Image handle
// ────────────────────────────────────────────────────────────────────────────

/// Shared, read-only reference to a decoded image.
///
/// Cloning a handle clones two `Arc`s; pixel data is never copied or mutated
/// after load.
#[derive(Clone)]
pub struct ImageHandle {
    name: Arc<str>,
    pixels: Arc<RgbaImage>,
}

impl ImageHandle {
    pub fn new(name: &str, image: DynamicImage) -> Self {
        Self::from_rgba(name, image.into_rgba8())
    }

    pub fn from_rgba(name: &str, pixels: RgbaImage) -> Self {
        ImageHandle {
            name: Arc::from(name),
            pixels: Arc::new(pixels),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }
}

impl fmt::Debug for ImageHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageHandle")
            .field("name", &self.name)
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Provider trait
// ────────────────────────────────────────────────────────────────────────────

/// Resolves an image name to decoded pixels. Failure is fatal to the run.
pub trait ImageProvider {
    fn load(&self, name: &str) -> Result<ImageHandle, SheetError>;
}

/// Loads images from files under a root directory. Names are relative paths.
pub struct DirImageProvider {
    root: PathBuf,
}

impl DirImageProvider {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        DirImageProvider { root: root.into() }
    }
}

impl ImageProvider for DirImageProvider {
    fn load(&self, name: &str) -> Result<ImageHandle, SheetError> {
        let path = self.root.join(name);
        if !path.is_file() {
            return Err(SheetError::MissingImage {
                name: name.to_string(),
                path,
            });
        }

        let image = image::open(&path).map_err(|source| SheetError::ImageDecode {
            name: name.to_string(),
            source,
        })?;

        let handle = ImageHandle::new(name, image);
        debug!(
            name = handle.name(),
            width = handle.width(),
            height = handle.height(),
            "Loaded image"
        );
        Ok(handle)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
