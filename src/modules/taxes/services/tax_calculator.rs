use rust_decimal::Decimal;

use crate::core::{AppError, Currency, Result};

/// TaxCalculator applies a tax rate to a pre-tax base
pub struct TaxCalculator;

impl TaxCalculator {
    pub fn new() -> Self {
        Self
    }

    /// Calculate the tax amount for a pre-tax base
    /// tax_amount = round(base × tax_rate), half away from zero to the minor unit
    pub fn calculate_tax(&self, base: Decimal, tax_rate: Decimal, currency: &Currency) -> Result<Decimal> {
        // Validate tax rate first
        self.validate_tax_rate(tax_rate)?;

        let amount = base.checked_mul(tax_rate).ok_or_else(|| {
            AppError::validation(format!(
                "Tax amount overflows: {} × {}",
                base, tax_rate
            ))
        })?;

        Ok(currency.round(amount))
    }

    /// Validate tax rate is within the accepted range [0, 1)
    pub fn validate_tax_rate(&self, tax_rate: Decimal) -> Result<()> {
        if tax_rate < Decimal::ZERO {
            return Err(AppError::validation(format!(
                "Tax rate cannot be negative, got: {}",
                tax_rate
            )));
        }

        if tax_rate >= Decimal::ONE {
            return Err(AppError::validation(format!(
                "Tax rate must be below 1.0 (100%), got: {}",
                tax_rate
            )));
        }

        Ok(())
    }
}

impl Default for TaxCalculator {
    fn default() -> Self {
        Self::new()
    }
}
