use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::format::format_rate;

/// Significant digits a tax rate is compared at.
///
/// Rates coming from floating point sources carry representation noise past
/// the 15th significant digit (0.20000000000000001), so rounding here merges
/// them while tiny genuine rates such as 0.0000004 keep their own value.
pub const RATE_SIGNIFICANT_DIGITS: u32 = 15;

/// A named tax rate applied to a line item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tax {
    #[serde(default = "default_tax_name")]
    pub name: String,
    /// Fraction, e.g. 0.20 for 20%
    pub rate: Decimal,
}

fn default_tax_name() -> String {
    "Tax".to_string()
}

impl Tax {
    pub fn new(name: impl Into<String>, rate: Decimal) -> Self {
        Self {
            name: name.into(),
            rate,
        }
    }

    /// Grouping key of the rate: rounded to [`RATE_SIGNIFICANT_DIGITS`] and
    /// stripped of trailing zeros. Amounts are never computed from it.
    pub fn normalized_rate(&self) -> Decimal {
        normalize_rate(self.rate)
    }

    /// Summary label, e.g. `VAT (20.00%)`
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, format_rate(self.normalized_rate()))
    }
}

pub fn normalize_rate(rate: Decimal) -> Decimal {
    rate.round_sf(RATE_SIGNIFICANT_DIGITS)
        .unwrap_or(rate)
        .normalize()
}
