use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::{AppError, Currency, Result};
use crate::modules::invoices::models::LineItem;
use crate::modules::taxes::{Tax, TaxCalculator};

/// Line items sharing one tax rate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxBucket {
    /// Name of the first tax seen with this rate
    pub name: String,
    /// Rate of the first item in the bucket, exactly as given
    pub rate: Decimal,
    /// Pre-tax sum of the matching line totals
    pub base: Decimal,
    /// round(base × rate)
    pub amount: Decimal,
}

impl TaxBucket {
    /// Summary label, e.g. `VAT (20.00%)`
    pub fn label(&self) -> String {
        Tax::new(self.name.clone(), self.rate).label()
    }
}

/// Totals of a billing document, recomputed for every render
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceTotals {
    pub currency: Currency,
    /// Sum of line totals before tax
    pub sub_total: Decimal,
    /// One bucket per distinct rate, in first-occurrence order
    pub tax_buckets: Vec<TaxBucket>,
    /// sub_total + Σ bucket amounts
    pub grand_total: Decimal,
}

impl InvoiceTotals {
    /// Compute totals from an ordered sequence of line items
    ///
    /// Every item is validated before anything is summed, so a bad item never
    /// yields partial totals. Rates are grouped by their normalized value;
    /// buckets keep the order in which their rate first appears and are taxed
    /// at that first rate as given. A precision disagreement is logged, not
    /// returned.
    ///
    /// # Errors
    /// `AppError::Validation` for a negative quantity or unit price, a tax
    /// rate outside [0, 1), or a sum that does not fit in a `Decimal`
    pub fn compute(line_items: &[LineItem], currency: &Currency) -> Result<Self> {
        for item in line_items {
            item.validate()?;
        }

        let calculator = TaxCalculator::new();
        let mut sub_total = Decimal::ZERO;
        let mut tax_buckets: Vec<TaxBucket> = Vec::new();
        let mut index_by_rate: HashMap<Decimal, usize> = HashMap::new();

        for item in line_items {
            let total_price = item.total_price(currency)?;
            if let Some(stored) = item.stored_total_mismatch(currency) {
                warn!(
                    "Stored total {} of line item '{}' differs from recomputed {}",
                    stored, item.description, total_price
                );
            }
            sub_total = checked_add(sub_total, total_price)?;

            let key = item.tax.normalized_rate();
            match index_by_rate.get(&key) {
                Some(&index) => {
                    let bucket = &mut tax_buckets[index];
                    bucket.base = checked_add(bucket.base, total_price)?;
                }
                None => {
                    index_by_rate.insert(key, tax_buckets.len());
                    tax_buckets.push(TaxBucket {
                        name: item.tax.name.clone(),
                        rate: item.tax.rate,
                        base: total_price,
                        amount: Decimal::ZERO,
                    });
                }
            }
        }

        for bucket in &mut tax_buckets {
            bucket.amount = calculator.calculate_tax(bucket.base, bucket.rate, currency)?;
        }

        let sub_total = currency.round(sub_total);
        let tax_total = sum_amounts(tax_buckets.iter().map(|b| b.amount))?;
        let grand_total = currency.round(checked_add(sub_total, tax_total)?);

        let totals = Self {
            currency: currency.clone(),
            sub_total,
            tax_buckets,
            grand_total,
        };

        if let Err(err) = totals.check_precision(line_items) {
            warn!("{}", err);
        }

        debug!(
            "Computed totals for {} line items: sub_total={}, buckets={}, grand_total={}",
            line_items.len(),
            totals.sub_total,
            totals.tax_buckets.len(),
            totals.grand_total
        );

        Ok(totals)
    }

    /// Sum of all bucket tax amounts
    ///
    /// Cannot overflow once `compute` has succeeded, since `grand_total`
    /// already holds a larger sum.
    pub fn tax_total(&self) -> Decimal {
        self.tax_buckets
            .iter()
            .fold(Decimal::ZERO, |sum, b| sum.saturating_add(b.amount))
    }

    pub fn is_empty(&self) -> bool {
        self.tax_buckets.is_empty() && self.sub_total.is_zero()
    }

    /// Compare the grand total against independently rounded per-item gross totals
    ///
    /// Per-bucket rounding may legitimately drift from per-item rounding; a
    /// gap above one minor unit is reported as `AppError::Precision`.
    pub fn check_precision(&self, line_items: &[LineItem]) -> Result<()> {
        let gross_totals = line_items
            .iter()
            .map(|item| item.gross_total(&self.currency))
            .collect::<Result<Vec<_>>>()?;
        let per_item = sum_amounts(gross_totals)?;
        let gap = self
            .grand_total
            .checked_sub(per_item)
            .map(|gap| gap.abs())
            .ok_or_else(|| AppError::precision("Per-item gross sum is out of range"))?;

        if gap > self.currency.smallest_unit() {
            return Err(AppError::precision(format!(
                "Grand total {} differs from per-item gross sum {} by {} {}",
                self.grand_total, per_item, gap, self.currency.code
            )));
        }

        Ok(())
    }
}

fn checked_add(sum: Decimal, amount: Decimal) -> Result<Decimal> {
    sum.checked_add(amount)
        .ok_or_else(|| AppError::validation(format!("Total overflows: {} + {}", sum, amount)))
}

fn sum_amounts(amounts: impl IntoIterator<Item = Decimal>) -> Result<Decimal> {
    amounts
        .into_iter()
        .try_fold(Decimal::ZERO, checked_add)
}
