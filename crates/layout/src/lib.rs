//! The positionable element set of the concentrate document.
//!
//! Everything stored here is in millimeters. Pixel coordinates only exist while an
//! editor interaction is in flight and are converted through
//! [`CoordinateTransform`] before they reach the model.

use concentra_types::Rect;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    #[error("Region '{region}' cannot take geometry {rect:?}: coordinates and sizes must be finite and non-negative.")]
    InvalidGeometry { region: RegionId, rect: Rect },
    #[error("Column '{column}' width must be finite and non-negative, got {width}.")]
    InvalidColumnWidth { column: Column, width: f32 },
    #[error("Font size must be positive, got {0}.")]
    InvalidFontSize(f32),
    #[error("Aspect ratio must be positive, got {0}.")]
    InvalidAspectRatio(f32),
    #[error("Viewport width must be a positive number of pixels, got {0}.")]
    InvalidViewport(f32),
    #[error("Settings serialization failed: {0}")]
    Settings(String),
}

pub mod defaults;
pub mod history;
pub mod model;
pub mod settings;
pub mod transform;

pub use self::history::LayoutHistory;
pub use self::model::{Column, ColorSlot, ColumnWidths, LayoutModel, Region, RegionId, Regions};
pub use self::settings::{export_settings, load_settings, merge_known_keys};
pub use self::transform::{CoordinateTransform, DOCUMENT_HEIGHT_MM, DOCUMENT_WIDTH_MM};
