use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{AppError, Result};
use crate::modules::invoices::RecordKind;

/// User-visible captions of the invoice report.
///
/// Missing keys in a labels file keep their English default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Labels {
    pub description: String,
    pub quantity: String,
    pub unit_price: String,
    pub tax: String,
    pub total: String,
    pub total_excl_tax: String,
    pub total_incl_tax: String,
    pub billing_address: String,
    pub delivery_address: String,
    pub page: String,
    pub date: String,
    pub due_date: String,
    pub invoice: String,
    pub quotation: String,
    pub purchase_order: String,
    pub down_payment_invoice: String,
    pub credit_note: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            description: "Description".to_string(),
            quantity: "Qty".to_string(),
            unit_price: "Unit price (excl. tax)".to_string(),
            tax: "Tax".to_string(),
            total: "Total (excl. tax)".to_string(),
            total_excl_tax: "TOTAL (excl. tax)".to_string(),
            total_incl_tax: "TOTAL (incl. tax)".to_string(),
            billing_address: "Billing address".to_string(),
            delivery_address: "Delivery address".to_string(),
            page: "Page".to_string(),
            date: "Date".to_string(),
            due_date: "Due date".to_string(),
            invoice: "Invoice".to_string(),
            quotation: "Quotation".to_string(),
            purchase_order: "Purchase order".to_string(),
            down_payment_invoice: "Down-payment invoice".to_string(),
            credit_note: "Credit note".to_string(),
        }
    }
}

impl Labels {
    pub fn record_name(&self, kind: RecordKind) -> &str {
        match kind {
            RecordKind::Invoice => &self.invoice,
            RecordKind::Quotation => &self.quotation,
            RecordKind::PurchaseOrder => &self.purchase_order,
            RecordKind::DownPaymentInvoice => &self.down_payment_invoice,
            RecordKind::CreditNote => &self.credit_note,
        }
    }

    /// Load labels from a `.yaml`/`.yml` or `.json` file
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path.extension().and_then(|ext| ext.to_str());
        if !matches!(extension, Some("yaml" | "yml" | "json")) {
            return Err(AppError::configuration(format!(
                "Unsupported labels file: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let labels = if extension == Some("json") {
            serde_json::from_str(&content)?
        } else {
            serde_yaml::from_str(&content)?
        };
        debug!(path = %path.display(), "Labels loaded");
        Ok(labels)
    }
}
