use concentra_types::ItemId;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PricingError {
    /// The item has no direct sell price and its margin leaves no room to back-solve one.
    #[error("degenerate pricing for item '{item}': margin {margin_pct}% cannot derive a sell price from cost {cost_usd}")]
    DegeneratePricing {
        item: ItemId,
        margin_pct: f64,
        cost_usd: f64,
    },
}
