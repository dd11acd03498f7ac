// A line item is one billable row of a billing document revision.
// Its total price is quantity × unit_price rounded to the currency's minor
// unit with the same policy used for every other amount on the document.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::{AppError, Currency, Result};
use crate::modules::taxes::{Tax, TaxCalculator};

/// Represents a single line item in a billing document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Description of the product or service
    pub description: String,

    /// Quantity, fractional quantities allowed (hours, kilograms)
    pub quantity: Decimal,

    /// Price per unit, excluding tax
    pub unit_price: Decimal,

    /// Tax applied to this line
    pub tax: Tax,

    /// Total stored on the billing record, if the caller has one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_price: Option<Decimal>,
}

impl LineItem {
    /// Create a new line item with validation
    ///
    /// # Arguments
    /// * `description` - Product/service description
    /// * `quantity` - Must be non-negative
    /// * `unit_price` - Must be non-negative
    /// * `tax` - Tax with a rate in [0, 1)
    pub fn new(
        description: impl Into<String>,
        quantity: Decimal,
        unit_price: Decimal,
        tax: Tax,
    ) -> Result<Self> {
        let line_item = Self {
            description: description.into(),
            quantity,
            unit_price,
            tax,
            total_price: None,
        };
        line_item.validate()?;
        Ok(line_item)
    }

    /// Attach the total stored on the billing record
    pub fn with_stored_total(mut self, total_price: Decimal) -> Self {
        self.total_price = Some(total_price);
        self
    }

    pub fn tax_rate(&self) -> Decimal {
        self.tax.rate
    }

    /// Validate quantity, unit price and tax rate
    pub fn validate(&self) -> Result<()> {
        if self.quantity < Decimal::ZERO {
            return Err(AppError::validation(format!(
                "Quantity must be non-negative, got: {} ({})",
                self.quantity, self.description
            )));
        }

        if self.unit_price < Decimal::ZERO {
            return Err(AppError::validation(format!(
                "Unit price must be non-negative, got: {} ({})",
                self.unit_price, self.description
            )));
        }

        if self.quantity.checked_mul(self.unit_price).is_none() {
            return Err(AppError::validation(format!(
                "Line total overflows: {} × {} ({})",
                self.quantity, self.unit_price, self.description
            )));
        }

        TaxCalculator::new().validate_tax_rate(self.tax.rate)?;

        Ok(())
    }

    /// Calculate total price for this line item
    ///
    /// Formula: total_price = quantity × unit_price
    /// Rounding: half away from zero to the currency's minor unit
    ///
    /// # Errors
    /// `AppError::Validation` when the product does not fit in a `Decimal`
    pub fn total_price(&self, currency: &Currency) -> Result<Decimal> {
        let total = self.quantity.checked_mul(self.unit_price).ok_or_else(|| {
            AppError::validation(format!(
                "Line total overflows: {} × {} ({})",
                self.quantity, self.unit_price, self.description
            ))
        })?;
        Ok(currency.round(total))
    }

    /// Stored total that disagrees with the recomputed one, if any
    pub fn stored_total_mismatch(&self, currency: &Currency) -> Option<Decimal> {
        let computed = self.total_price(currency).ok()?;
        self.total_price.filter(|stored| *stored != computed)
    }

    /// Gross total of this line alone: round(total_price × (1 + rate))
    pub fn gross_total(&self, currency: &Currency) -> Result<Decimal> {
        let total = self.total_price(currency)?;
        let gross = total
            .checked_mul(Decimal::ONE + self.tax.rate)
            .ok_or_else(|| {
                AppError::validation(format!(
                    "Gross total overflows: {} at rate {} ({})",
                    total, self.tax.rate, self.description
                ))
            })?;
        Ok(currency.round(gross))
    }
}
