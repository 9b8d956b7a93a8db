//! Concentra turns a quotation (modules of priced line items) into the
//! "concentrate": a paginated landscape PDF summary with a branded header, one
//! table row per item, module subtotals and a grand total.
//!
//! ```no_run
//! use concentra::{DocumentExporter, FilesystemMediaSource, LayoutModel, ProjectMetadata};
//!
//! # async fn run(modules: Vec<concentra::Module>) -> Result<(), concentra::ExportError> {
//! let exporter = DocumentExporter::builder()
//!     .with_media_source(FilesystemMediaSource::new("media"))
//!     .build();
//! let metadata = ProjectMetadata {
//!     project_name: "Torre Norte".to_string(),
//!     ..Default::default()
//! };
//! let document = exporter
//!     .export(&modules, &LayoutModel::default(), &metadata)
//!     .await?;
//! std::fs::write(&document.filename, &document.bytes)?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod exporter;

pub use config::ExportConfig;
pub use error::ExportError;
pub use exporter::{
    suggested_filename, Diagnostic, DocumentExporter, ExportedDocument, ExporterBuilder,
};

pub use concentra_layout::{
    export_settings, load_settings, Column, CoordinateTransform, LayoutHistory, LayoutModel,
    RegionId,
};
pub use concentra_pricing::{compute_grand, compute_grand_with, GrandTotals, PricingConfig};
pub use concentra_resource::{
    DirectorySink, FilesystemMediaSource, InMemoryMediaSource, MemorySink,
};
pub use concentra_table_flow::{FlowOptions, MoneyFormat, TableLabels};
pub use concentra_traits::{DocumentSink, MediaSource};
pub use concentra_types::{LineItem, MediaRef, Module, ProjectMetadata};
