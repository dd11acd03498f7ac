// Invoices module

pub mod models;
pub mod services;

pub use models::{InvoiceDocument, LineItem, RecordKind};
pub use services::{InvoiceTotals, TaxBucket};
