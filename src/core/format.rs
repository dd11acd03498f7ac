//! Display helpers shared by the report tables.

use rust_decimal::{Decimal, RoundingStrategy};

/// Formats a tax rate fraction as a percentage with two decimals: `0.2` -> `20.00%`
pub fn format_rate(rate: Decimal) -> String {
    let percent = (rate * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.2}%", percent)
}

/// Formats a quantity: whole numbers without decimals, anything else with two
pub fn format_quantity(quantity: Decimal) -> String {
    if quantity.fract().is_zero() {
        format!("{}", quantity.trunc().normalize())
    } else {
        let rounded = quantity.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        format!("{:.2}", rounded)
    }
}
