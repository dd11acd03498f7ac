// Test Data Factory
//
// Builds billing documents and line items for the test binaries.

use invoice_report::invoices::models::{
    Address, Contact, Issuer, Organization, Revision, Tenant,
};
use invoice_report::invoices::{InvoiceDocument, LineItem, RecordKind};
use invoice_report::taxes::Tax;
use invoice_report::Currency;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Test data factory for billing documents
pub struct TestDataFactory;

impl TestDataFactory {
    /// Line item with a `VAT` tax at `rate`
    pub fn line_item(description: &str, quantity: Decimal, unit_price: Decimal, rate: Decimal) -> LineItem {
        LineItem {
            description: description.to_string(),
            quantity,
            unit_price,
            tax: Tax::new("VAT", rate),
            total_price: None,
        }
    }

    /// The three items of the reference example: 125.00 before tax, 130.00 after
    pub fn reference_items() -> Vec<LineItem> {
        vec![
            Self::line_item("Consulting", dec!(2), dec!(10.00), dec!(0.20)),
            Self::line_item("Support", dec!(1), dec!(5.00), dec!(0.20)),
            Self::line_item("Training", dec!(1), dec!(100.00), dec!(0.00)),
        ]
    }

    pub fn address() -> Address {
        Address {
            street_address: "12 rue de la Paix".to_string(),
            postal_code: "75002".to_string(),
            city: "Paris".to_string(),
            country: "France".to_string(),
            ..Default::default()
        }
    }

    /// Complete EUR invoice built around `line_items`
    pub fn document(line_items: Vec<LineItem>) -> InvoiceDocument {
        InvoiceDocument {
            kind: RecordKind::Invoice,
            reference: Some("INV-2024-0042".to_string()),
            issuer: Some(Issuer {
                full_name: "Jane Doe".to_string(),
            }),
            tenant: Tenant {
                name: "Acme SARL".to_string(),
                registration_info: vec![
                    "VAT FR00123456789".to_string(),
                    "RCS Paris 123 456 789".to_string(),
                ],
                logo_path: None,
            },
            keywords: vec!["invoice".to_string(), "acme".to_string()],
            description: Some("Services rendered in January".to_string()),
            legal_notice: vec!["Payment due within 30 days.".to_string()],
            current_revision: Revision {
                sender: Some("Jane Doe".to_string()),
                sender_address: Some(Self::address()),
                contact: Some(Contact {
                    first_name: "John".to_string(),
                    last_name: "Smith".to_string(),
                }),
                organization: Some(Organization {
                    corporate_name: "Globex".to_string(),
                }),
                billing_address: Some(Self::address()),
                delivery_address: Some(Self::address()),
                currency: Currency::eur(),
                issue_date: chrono::NaiveDate::from_ymd_opt(2024, 1, 31),
                due_date: chrono::NaiveDate::from_ymd_opt(2024, 2, 29),
                line_items,
            },
        }
    }

    /// Invoice with `count` identical 10.00 items at 20%
    pub fn long_document(count: usize) -> InvoiceDocument {
        let items = (0..count)
            .map(|i| Self::line_item(&format!("Item {}", i + 1), dec!(1), dec!(10.00), dec!(0.20)))
            .collect();
        Self::document(items)
    }

    pub const DOCUMENT_JSON: &'static str = r#"{
        "kind": "quotation",
        "reference": "Q-2024-7",
        "tenant": {"name": "Acme SARL", "registration_info": ["VAT FR00123456789"]},
        "current_revision": {
            "currency": {"code": "USD"},
            "issue_date": "2024-03-01",
            "line_items": [
                {"description": "Widget", "quantity": 3, "unit_price": 19.99,
                 "tax": {"name": "Sales tax", "rate": 0.0825}},
                {"description": "Shipping", "quantity": 1, "unit_price": 5,
                 "tax": {"rate": 0}}
            ]
        }
    }"#;

    pub const DOCUMENT_YAML: &'static str = r#"
kind: credit_note
reference: CN-12
tenant:
  name: Acme SARL
current_revision:
  currency: EUR
  line_items:
    - description: Returned goods
      quantity: 2
      unit_price: "49.50"
      tax:
        name: VAT
        rate: "0.2"
"#;
}
