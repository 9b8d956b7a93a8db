//! Money and quantity formatting.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolPlacement {
    Before,
    After,
}

/// How monetary values are printed: always two decimals, grouped thousands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MoneyFormat {
    pub symbol: String,
    pub thousands_separator: String,
    pub decimal_separator: String,
    pub placement: SymbolPlacement,
    /// Put a space between the amount and the symbol.
    pub spaced: bool,
}

impl MoneyFormat {
    pub const PRESETS: [&'static str; 3] = ["en-US", "es-MX", "es-ES"];

    pub fn preset(locale: &str) -> Option<Self> {
        let (symbol, thousands, decimal, placement, spaced) = match locale {
            "en-US" | "es-MX" => ("$", ",", ".", SymbolPlacement::Before, false),
            "es-ES" => ("€", ".", ",", SymbolPlacement::After, true),
            _ => return None,
        };
        Some(Self {
            symbol: symbol.to_string(),
            thousands_separator: thousands.to_string(),
            decimal_separator: decimal.to_string(),
            placement,
            spaced,
        })
    }

    pub fn format(&self, value: f64) -> String {
        let rounded = format!("{:.2}", value.abs());
        let (whole, cents) = rounded.split_once('.').unwrap_or((rounded.as_str(), "00"));
        let amount = format!(
            "{}{}{}",
            group_thousands(whole, &self.thousands_separator),
            self.decimal_separator,
            cents
        );

        let gap = if self.spaced { " " } else { "" };
        let body = match self.placement {
            SymbolPlacement::Before => format!("{}{gap}{amount}", self.symbol),
            SymbolPlacement::After => format!("{amount}{gap}{}", self.symbol),
        };
        // Values that round to zero print unsigned.
        let negative = value < 0.0 && rounded.bytes().any(|b| b.is_ascii_digit() && b != b'0');
        if negative { format!("-{body}") } else { body }
    }
}

impl Default for MoneyFormat {
    fn default() -> Self {
        Self {
            symbol: "$".to_string(),
            thousands_separator: ",".to_string(),
            decimal_separator: ".".to_string(),
            placement: SymbolPlacement::Before,
            spaced: false,
        }
    }
}

fn group_thousands(digits: &str, separator: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3 * separator.len());
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push_str(separator);
        }
        out.push(ch);
    }
    out
}

/// Quantities print as plain numbers: integers without decimals, fractions trimmed.
pub fn format_quantity(quantity: f64) -> String {
    if quantity.fract() == 0.0 && quantity.abs() < 1e15 {
        format!("{}", quantity as i64)
    } else {
        let fixed = format!("{quantity:.4}");
        fixed.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}
