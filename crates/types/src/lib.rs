pub mod color;
pub mod document;
pub mod geometry;
pub mod ids;
pub mod raster;

pub use color::{Color, ColorError};
pub use document::{LineItem, MediaKind, MediaRef, Module, ProjectMetadata};
pub use geometry::{mm_to_pt, Point, Rect, Size, MM_PER_INCH, PT_PER_INCH};
pub use ids::{ItemId, MediaUri, ModuleId};
pub use raster::{ImageSet, RasterImage};
