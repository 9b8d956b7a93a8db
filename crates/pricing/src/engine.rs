use crate::error::PricingError;
use concentra_types::{ItemId, LineItem, Module, ModuleId};
use serde::{Deserialize, Serialize};

/// Per-item figures, all in USD.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ItemPricing {
    pub unit_sell: f64,
    pub line_sell: f64,
    pub line_cost: f64,
}

/// Sell and cost totals of one module over its active items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ModulePricing {
    pub sell: f64,
    pub cost: f64,
}

/// Currency and tax settings supplied by the caller for one computation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Local currency units per USD.
    pub fx_rate: f64,
    pub tax_pct: f64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            fx_rate: 1.0,
            tax_pct: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct GrandTotals {
    pub sell_usd: f64,
    pub cost_usd: f64,
    pub sell_local_ex_tax: f64,
    pub sell_local_tax: f64,
    pub sell_local_inc_tax: f64,
    pub cost_local: f64,
    pub cost_local_tax: f64,
    pub cost_local_inc_tax: f64,
}

impl GrandTotals {
    pub fn profit_usd(&self) -> f64 {
        self.sell_usd - self.cost_usd
    }

    /// Realized margin over sell, in percent. Zero when nothing is sold.
    pub fn margin_pct(&self) -> f64 {
        if self.sell_usd == 0.0 {
            0.0
        } else {
            self.profit_usd() / self.sell_usd * 100.0
        }
    }
}

/// An item whose sell price cannot be derived, reported by [`validate_modules`].
#[derive(Debug, Clone, PartialEq)]
pub struct DegenerateItem {
    pub module: ModuleId,
    pub item: ItemId,
    pub margin_pct: f64,
}

/// Effective unit sell price of an item.
///
/// A nonzero direct sell price always wins. Otherwise the margin is applied to the
/// cost by back-solving `cost / (1 - margin/100)`, so a 10% margin on a cost of 100
/// yields 111.11, not 110.
pub fn unit_sell(item: &LineItem) -> Result<f64, PricingError> {
    if let Some(sell) = item.direct_sell() {
        return Ok(sell);
    }
    if item.cost_usd == 0.0 {
        return Ok(0.0);
    }

    let divisor = 1.0 - item.margin_pct / 100.0;
    if !(divisor > 0.0) || !divisor.is_finite() {
        return Err(PricingError::DegeneratePricing {
            item: item.id.clone(),
            margin_pct: item.margin_pct,
            cost_usd: item.cost_usd,
        });
    }
    Ok(item.cost_usd / divisor)
}

pub fn compute_item(item: &LineItem) -> Result<ItemPricing, PricingError> {
    let unit_sell = unit_sell(item)?;
    Ok(ItemPricing {
        unit_sell,
        line_sell: unit_sell * item.quantity,
        line_cost: item.cost_usd * item.quantity,
    })
}

/// Sums [`compute_item`] over the module's active items.
///
/// Inactive items are never evaluated, so an excluded item with a broken margin
/// does not poison the module.
pub fn compute_module(module: &Module) -> Result<ModulePricing, PricingError> {
    module
        .active_items()
        .try_fold(ModulePricing::default(), |acc, item| {
            let priced = compute_item(item)?;
            Ok(ModulePricing {
                sell: acc.sell + priced.line_sell,
                cost: acc.cost + priced.line_cost,
            })
        })
}

pub fn compute_grand(
    modules: &[Module],
    fx_rate: f64,
    tax_pct: f64,
) -> Result<GrandTotals, PricingError> {
    let mut sell_usd = 0.0;
    let mut cost_usd = 0.0;
    for module in modules {
        let totals = compute_module(module)?;
        sell_usd += totals.sell;
        cost_usd += totals.cost;
    }

    let tax_rate = tax_pct / 100.0;
    let sell_local = sell_usd * fx_rate;
    let cost_local = cost_usd * fx_rate;

    let grand = GrandTotals {
        sell_usd,
        cost_usd,
        sell_local_ex_tax: sell_local,
        sell_local_tax: sell_local * tax_rate,
        sell_local_inc_tax: sell_local * (1.0 + tax_rate),
        cost_local,
        cost_local_tax: cost_local * tax_rate,
        cost_local_inc_tax: cost_local * (1.0 + tax_rate),
    };
    log::debug!(
        "Grand totals over {} modules: sell {:.2} USD, cost {:.2} USD",
        modules.len(),
        grand.sell_usd,
        grand.cost_usd
    );
    Ok(grand)
}

pub fn compute_grand_with(
    modules: &[Module],
    config: &PricingConfig,
) -> Result<GrandTotals, PricingError> {
    compute_grand(modules, config.fx_rate, config.tax_pct)
}

/// Lists every active item whose sell price cannot be derived.
pub fn validate_modules(modules: &[Module]) -> Vec<DegenerateItem> {
    modules
        .iter()
        .flat_map(|module| {
            module
                .active_items()
                .filter(|item| unit_sell(item).is_err())
                .map(|item| DegenerateItem {
                    module: module.id.clone(),
                    item: item.id.clone(),
                    margin_pct: item.margin_pct,
                })
        })
        .collect()
}
