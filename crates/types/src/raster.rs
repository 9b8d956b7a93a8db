//! Decoded images ready to be embedded in a page.

use crate::ids::MediaUri;
use crate::geometry::Size;
use std::collections::HashMap;
use std::sync::Arc;

/// An 8-bit RGB raster, alpha already flattened onto white.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterImage {
    pub width_px: u32,
    pub height_px: u32,
    /// Width:height of the source image before any downscaling.
    pub natural_ratio: f32,
    /// Row-major RGB triplets, `width_px * height_px * 3` bytes.
    pub rgb: Vec<u8>,
}

impl RasterImage {
    pub fn pixel_size(&self) -> Size {
        Size::new(self.width_px as f32, self.height_px as f32)
    }
}

/// Images resolved before layout, keyed by the URI they were loaded from.
pub type ImageSet = HashMap<MediaUri, Arc<RasterImage>>;
