// Integration tests for loading billing documents and labels from disk

#[path = "../helpers/mod.rs"]
mod helpers;

use std::io::Write;
use std::path::Path;

use helpers::TestDataFactory;
use invoice_report::invoices::{InvoiceDocument, InvoiceTotals, RecordKind};
use invoice_report::reports::Labels;
use invoice_report::AppError;
use rust_decimal_macros::dec;
use tempfile::NamedTempFile;

fn write_temp(suffix: &str, content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_json_document() {
    let file = write_temp(".json", TestDataFactory::DOCUMENT_JSON);
    let document = InvoiceDocument::from_path(file.path()).unwrap();

    assert_eq!(document.kind, RecordKind::Quotation);
    assert_eq!(document.reference.as_deref(), Some("Q-2024-7"));
    assert_eq!(document.currency().code, "USD");
    assert_eq!(document.line_items().len(), 2);
    assert_eq!(document.line_items()[1].tax.name, "Tax");

    // 59.97 + 5.00, tax round(59.97 × 0.0825) = 4.95
    let totals = InvoiceTotals::compute(document.line_items(), document.currency()).unwrap();
    assert_eq!(totals.sub_total, dec!(64.97));
    assert_eq!(totals.tax_buckets[0].amount, dec!(4.95));
    assert_eq!(totals.grand_total, dec!(69.92));
}

#[test]
fn test_load_yaml_document() {
    let file = write_temp(".yaml", TestDataFactory::DOCUMENT_YAML);
    let document = InvoiceDocument::from_path(file.path()).unwrap();

    assert_eq!(document.kind, RecordKind::CreditNote);
    assert_eq!(document.currency().symbol, "€");

    let totals = InvoiceTotals::compute(document.line_items(), document.currency()).unwrap();
    assert_eq!(totals.sub_total, dec!(99.00));
    assert_eq!(totals.grand_total, dec!(118.80));
}

#[test]
fn test_unsupported_document_format() {
    let file = write_temp(".txt", TestDataFactory::DOCUMENT_JSON);
    let result = InvoiceDocument::from_path(file.path());

    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[test]
fn test_missing_document_file() {
    let result = InvoiceDocument::from_path(Path::new("/nonexistent/invoice.json"));
    assert!(matches!(result, Err(AppError::Io(_))));
}

#[test]
fn test_malformed_json_document() {
    let file = write_temp(".json", r#"{"tenant": {"name": "Acme"}"#);
    let result = InvoiceDocument::from_path(file.path());

    assert!(matches!(result, Err(AppError::Json(_))));
}

#[test]
fn test_load_json_labels() {
    let file = write_temp(".json", r#"{"quotation": "Devis", "page": "Page"}"#);
    let labels = Labels::from_path(file.path()).unwrap();

    assert_eq!(labels.record_name(RecordKind::Quotation), "Devis");
    assert_eq!(labels.total_incl_tax, "TOTAL (incl. tax)");
}

#[test]
fn test_load_yml_labels() {
    let file = write_temp(".yml", "credit_note: Avoir\n");
    let labels = Labels::from_path(file.path()).unwrap();

    assert_eq!(labels.record_name(RecordKind::CreditNote), "Avoir");
}

#[test]
fn test_malformed_labels_file() {
    let file = write_temp(".yaml", "invoice: [unclosed\n");
    let result = Labels::from_path(file.path());

    assert!(matches!(result, Err(AppError::Yaml(_))));
}
