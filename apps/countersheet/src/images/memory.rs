//! In-memory image provider used by tests.

use std::collections::HashMap;
use std::path::PathBuf;

use image::{Rgba, RgbaImage};

use crate::errors::SheetError;
use crate::images::{ImageHandle, ImageProvider};

/// Solid-colour test image.
pub fn solid(name: &str, width: u32, height: u32, color: [u8; 4]) -> ImageHandle {
    ImageHandle::from_rgba(name, RgbaImage::from_pixel(width, height, Rgba(color)))
}

#[derive(Default)]
pub struct MemoryImageProvider {
    images: HashMap<String, ImageHandle>,
}

impl MemoryImageProvider {
    pub fn with(mut self, handle: ImageHandle) -> Self {
        self.images.insert(handle.name().to_string(), handle);
        self
    }
}

impl ImageProvider for MemoryImageProvider {
    fn load(&self, name: &str) -> Result<ImageHandle, SheetError> {
        self.images
            .get(name)
            .cloned()
            .ok_or_else(|| SheetError::MissingImage {
                name: name.to_string(),
                path: PathBuf::from(name),
            })
    }
}
