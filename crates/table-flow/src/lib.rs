//! The concentrate table: row stream, money formatting and pagination.
//!
//! [`build_rows`] turns the module list into banner, item and subtotal rows.
//! [`TableFlowRenderer`] places those rows on landscape pages together with the
//! repeated page header, the footer and the grand-total block.

use concentra_pricing::PricingError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FlowError {
    #[error(transparent)]
    Pricing(#[from] PricingError),
}

pub mod elements;
pub mod flow;
pub mod format;
pub mod pagination;
pub mod rows;
pub mod text;

pub use self::elements::{
    FontWeight, ImageElement, LaidOutDocument, LaidOutPage, LayoutElement, PositionedElement,
    RectElement, TextAlign, TextElement, VerticalAlign,
};
pub use self::flow::{
    FlowOptions, TableFlowRenderer, TableLabels, CONTENT_BOTTOM_MM, MIN_GRAND_TOTAL_SPACE_MM,
};
pub use self::format::{format_quantity, MoneyFormat, SymbolPlacement};
pub use self::rows::{build_rows, ItemRow, TableRow};
