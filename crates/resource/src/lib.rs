//! Media and artifact plumbing for the export engine.
//!
//! - [`FilesystemMediaSource`] reads media from a directory.
//! - [`ImageLoader`] turns media URIs into decoded rasters, each load bounded by a timeout.
//! - [`DirectorySink`] writes finished documents to disk.
//!
//! The in-memory source and sink live in `concentra-traits` and are re-exported here.

mod decode;
mod filesystem;
mod loader;
mod sink;

pub use decode::{decode_raster, DEFAULT_MAX_EDGE_PX};
pub use filesystem::FilesystemMediaSource;
pub use loader::{ImageLoad, ImageLoader, ResolvedImages, DEFAULT_IMAGE_TIMEOUT};
pub use sink::DirectorySink;

pub use concentra_traits::{InMemoryMediaSource, MemorySink};
