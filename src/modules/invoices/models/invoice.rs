// Billing document snapshot handed to the report layer.
// A document is read as it stands at its current revision; nothing here is
// mutated while rendering.

use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::line_item::LineItem;
use super::party::{Address, Contact, Issuer, Organization, Tenant};
use crate::core::{AppError, Currency, Result};

/// Kind of billing record, selects the document title
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Invoice,
    Quotation,
    PurchaseOrder,
    DownPaymentInvoice,
    CreditNote,
}

impl Default for RecordKind {
    fn default() -> Self {
        RecordKind::Invoice
    }
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordKind::Invoice => write!(f, "invoice"),
            RecordKind::Quotation => write!(f, "quotation"),
            RecordKind::PurchaseOrder => write!(f, "purchase_order"),
            RecordKind::DownPaymentInvoice => write!(f, "down_payment_invoice"),
            RecordKind::CreditNote => write!(f, "credit_note"),
        }
    }
}

impl std::str::FromStr for RecordKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "invoice" => Ok(RecordKind::Invoice),
            "quotation" => Ok(RecordKind::Quotation),
            "purchase_order" => Ok(RecordKind::PurchaseOrder),
            "down_payment_invoice" => Ok(RecordKind::DownPaymentInvoice),
            "credit_note" => Ok(RecordKind::CreditNote),
            _ => Err(format!("Invalid record kind: {}", s)),
        }
    }
}

/// Current revision of a billing record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Revision {
    /// Name of the person sending the document
    #[serde(default)]
    pub sender: Option<String>,

    #[serde(default)]
    pub sender_address: Option<Address>,

    #[serde(default)]
    pub contact: Option<Contact>,

    #[serde(default)]
    pub organization: Option<Organization>,

    #[serde(default)]
    pub billing_address: Option<Address>,

    #[serde(default)]
    pub delivery_address: Option<Address>,

    #[serde(default)]
    pub currency: Currency,

    #[serde(default)]
    pub issue_date: Option<NaiveDate>,

    #[serde(default)]
    pub due_date: Option<NaiveDate>,

    #[serde(default)]
    pub line_items: Vec<LineItem>,
}

/// Billing document as rendered
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InvoiceDocument {
    #[serde(default)]
    pub kind: RecordKind,

    /// Business reference, e.g. "INV-2024-0042"
    #[serde(default)]
    pub reference: Option<String>,

    #[serde(default)]
    pub issuer: Option<Issuer>,

    pub tenant: Tenant,

    #[serde(default)]
    pub keywords: Vec<String>,

    /// Free text shown above the line items
    #[serde(default)]
    pub description: Option<String>,

    /// Legal notice paragraphs shown after the summary
    #[serde(default)]
    pub legal_notice: Vec<String>,

    pub current_revision: Revision,
}

impl InvoiceDocument {
    pub fn currency(&self) -> &Currency {
        &self.current_revision.currency
    }

    pub fn line_items(&self) -> &[LineItem] {
        &self.current_revision.line_items
    }

    /// Validate every line item; the first failure is returned
    pub fn validate(&self) -> Result<()> {
        self.line_items().iter().try_for_each(LineItem::validate)
    }

    /// Load a document from a `.json`, `.yaml` or `.yml` file
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase);
        if !matches!(extension.as_deref(), Some("json" | "yaml" | "yml")) {
            return Err(AppError::validation(format!(
                "Unsupported document format: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let document: Self = if extension.as_deref() == Some("json") {
            serde_json::from_str(&content)?
        } else {
            serde_yaml::from_str(&content)?
        };

        debug!(
            path = %path.display(),
            line_items = document.line_items().len(),
            "Document loaded"
        );
        Ok(document)
    }
}
