//! Pricing rollups for quotations.
//!
//! Pure functions only: an item's effective sell price, module totals over active
//! items, and grand totals with currency and tax variants. No I/O, no state.

mod engine;
mod error;

pub use engine::{
    compute_grand, compute_grand_with, compute_item, compute_module, unit_sell, validate_modules,
    DegenerateItem, GrandTotals, ItemPricing, ModulePricing, PricingConfig,
};
pub use error::PricingError;
