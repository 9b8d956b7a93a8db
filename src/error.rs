use concentra_layout::LayoutError;
use concentra_pricing::PricingError;
use concentra_render_lopdf::RenderError;
use concentra_table_flow::FlowError;
use concentra_traits::SinkError;
use thiserror::Error;

/// Everything that can stop an export.
///
/// Missing or broken media never shows up here; it only produces diagnostics.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Pricing failed: {0}")]
    Pricing(#[from] PricingError),

    #[error("Layout failed: {0}")]
    Layout(#[from] LayoutError),

    #[error("Table flow failed: {0}")]
    Flow(#[from] FlowError),

    #[error("Rendering failed: {0}")]
    Render(#[from] RenderError),

    #[error("Saving the document failed: {0}")]
    Sink(#[from] SinkError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON input: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}
