//! The table's row stream.
//!
//! Rows are derived from the ordered module list in one pass: a banner opens each
//! module that has active items, one row follows per active item, and a subtotal
//! closes the module. Modules without active items produce no rows at all.

use crate::text::{truncate_chars, DESCRIPTION_CHAR_LIMIT};
use concentra_pricing::{compute_item, compute_module, PricingError};
use concentra_types::{MediaUri, Module};

#[derive(Debug, Clone, PartialEq)]
pub struct ItemRow {
    /// Running 1-based counter across every module.
    pub index: usize,
    pub name: String,
    pub description: String,
    pub thumbnail: Option<MediaUri>,
    pub quantity: f64,
    pub unit_sell: f64,
    pub line_sell: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TableRow {
    Banner { module_number: usize, title: String },
    Item(ItemRow),
    Subtotal { module_number: usize, value: f64 },
}

impl TableRow {
    pub fn is_banner(&self) -> bool {
        matches!(self, TableRow::Banner { .. })
    }

    pub fn is_subtotal(&self) -> bool {
        matches!(self, TableRow::Subtotal { .. })
    }
}

/// Builds the row stream. Module numbers are positions in `modules`, so a skipped
/// module leaves a gap in the numbering.
pub fn build_rows(modules: &[Module]) -> Result<Vec<TableRow>, PricingError> {
    let mut rows = Vec::new();
    let mut next_index = 1;

    for (position, module) in modules.iter().enumerate() {
        if !module.has_active_items() {
            log::debug!("Skipping module '{}': no active items", module.id);
            continue;
        }
        let module_number = position + 1;
        rows.push(TableRow::Banner {
            module_number,
            title: module.title.clone(),
        });

        for item in module.active_items() {
            let priced = compute_item(item)?;
            rows.push(TableRow::Item(ItemRow {
                index: next_index,
                name: item.name.to_uppercase(),
                description: truncate_chars(&item.description, DESCRIPTION_CHAR_LIMIT),
                thumbnail: item.thumbnail().cloned(),
                quantity: item.quantity,
                unit_sell: priced.unit_sell,
                line_sell: priced.line_sell,
            }));
            next_index += 1;
        }

        rows.push(TableRow::Subtotal {
            module_number,
            value: compute_module(module)?.sell,
        });
    }
    Ok(rows)
}
