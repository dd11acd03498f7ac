use tracing::debug;

use crate::core::format::{format_quantity, format_rate};
use crate::core::Result;
use crate::modules::invoices::models::Address;
use crate::modules::invoices::{InvoiceDocument, InvoiceTotals};
use crate::modules::reports::models::{
    Block, Captions, DocumentMetadata, InvoiceStory, Labels, Paragraph, Table, TableKind,
    TextStyle,
};

/// Builds the story of an invoice-like document
pub struct InvoiceReport<'a> {
    labels: &'a Labels,
    document: &'a InvoiceDocument,
    totals: InvoiceTotals,
    story: InvoiceStory,
}

impl<'a> InvoiceReport<'a> {
    /// Validates the document and computes its totals
    pub fn new(labels: &'a Labels, document: &'a InvoiceDocument) -> Result<Self> {
        document.validate()?;
        let totals = InvoiceTotals::compute(document.line_items(), document.currency())?;

        Ok(Self {
            labels,
            document,
            totals,
            story: InvoiceStory::default(),
        })
    }

    pub fn totals(&self) -> &InvoiceTotals {
        &self.totals
    }

    /// "INVOICE INV-2024-0042"
    pub fn document_name(&self) -> Option<String> {
        self.document.reference.as_ref().map(|reference| {
            format!(
                "{} {}",
                self.labels.record_name(self.document.kind).to_uppercase(),
                reference
            )
        })
    }

    pub fn metadata(&self) -> DocumentMetadata {
        let name = self.document_name();
        DocumentMetadata {
            title: name.clone(),
            subject: name,
            author: self
                .document
                .issuer
                .as_ref()
                .map(|issuer| issuer.full_name.clone()),
            creator: Some(self.document.tenant.name.clone()),
            keywords: self.document.keywords.clone(),
        }
    }

    pub fn compose(mut self) -> Result<InvoiceStory> {
        self.story.metadata = self.metadata();
        self.story.registration = self.document.tenant.registration_line();
        self.story.captions = Captions {
            billing_address: self.labels.billing_address.to_uppercase(),
            delivery_address: self.labels.delivery_address.to_uppercase(),
            page: self.labels.page.clone(),
        };
        self.fill()?;

        debug!(
            blocks = self.story.body.len(),
            kind = %self.document.kind,
            "Invoice story built"
        );

        Ok(self.story)
    }

    fn fill(&mut self) -> Result<()> {
        let revision = &self.document.current_revision;
        self.fill_sender();
        self.story.billing = self.address_block(revision.billing_address.as_ref());
        self.story.delivery = self.address_block(revision.delivery_address.as_ref());

        self.fill_references();
        self.fill_description();
        self.fill_line_items()?;
        self.fill_line_items_summary();
        self.fill_legal_notice();
        Ok(())
    }

    fn push_paragraph(&mut self, text: impl Into<String>, style: TextStyle) {
        self.story
            .body
            .push(Block::Paragraph(Paragraph::new(text, style)));
    }

    fn push_table(&mut self, kind: TableKind, rows: Vec<Vec<String>>) {
        self.story.body.push(Block::Table(Table { kind, rows }));
    }

    fn fill_sender(&mut self) {
        let document = self.document;
        let revision = &document.current_revision;
        let mut sender = Vec::new();

        if let Some(name) = revision.sender.as_ref().filter(|s| !s.trim().is_empty()) {
            sender.push(Paragraph::new(name.clone(), TextStyle::Small));
        }
        sender.push(Paragraph::new(document.tenant.name.clone(), TextStyle::Small));
        if let Some(address) = revision.sender_address.as_ref().filter(|a| !a.is_empty()) {
            sender.extend(
                address
                    .formatted()
                    .into_iter()
                    .map(|line| Paragraph::new(line, TextStyle::Small)),
            );
        }

        self.story.sender = sender;
        self.story.logo = document.tenant.logo_path.clone();
    }

    fn address_block(&self, address: Option<&Address>) -> Vec<Paragraph> {
        let revision = &self.document.current_revision;
        let mut lines = Vec::new();

        if let Some(contact) = &revision.contact {
            lines.push(contact.full_name(true));
        }
        if let Some(organization) = &revision.organization {
            lines.push(organization.corporate_name.clone());
        }
        if let Some(address) = address.filter(|a| !a.is_empty()) {
            lines.extend(address.formatted());
        }

        lines
            .into_iter()
            .filter(|line| !line.trim().is_empty())
            .map(|line| Paragraph::new(line, TextStyle::Address))
            .collect()
    }

    fn fill_references(&mut self) {
        let document = self.document;
        let revision = &document.current_revision;
        let title = self.labels.record_name(document.kind).to_uppercase();
        let mut rows = vec![vec![title, document.reference.clone().unwrap_or_default()]];

        let date = |label: &str, date: Option<chrono::NaiveDate>| {
            date.map(|d| format!("{}: {}", label, d.format("%Y-%m-%d")))
                .unwrap_or_default()
        };
        if revision.issue_date.is_some() || revision.due_date.is_some() {
            rows.push(vec![
                date(&self.labels.date, revision.issue_date),
                date(&self.labels.due_date, revision.due_date),
            ]);
        }

        self.push_table(TableKind::References, rows);
    }

    fn fill_description(&mut self) {
        let document = self.document;
        if let Some(description) = document.description.as_ref().filter(|d| !d.trim().is_empty()) {
            self.story.body.push(Block::Spacer);
            self.push_paragraph(description.clone(), TextStyle::Normal);
        }
    }

    fn fill_line_items(&mut self) -> Result<()> {
        let document = self.document;
        let currency = document.currency();
        let labels = self.labels;

        let mut rows = vec![vec![
            labels.description.clone(),
            labels.quantity.clone(),
            labels.unit_price.clone(),
            labels.tax.clone(),
            labels.total.clone(),
        ]];
        for item in document.line_items() {
            rows.push(vec![
                item.description.clone(),
                format_quantity(item.quantity),
                currency.format_number(item.unit_price),
                format_rate(item.tax_rate()),
                currency.format_amount(item.total_price(currency)?),
            ]);
        }

        self.story.body.push(Block::Spacer);
        self.push_table(TableKind::Items, rows);
        Ok(())
    }

    fn fill_line_items_summary(&mut self) {
        let currency = self.document.currency();
        let totals = &self.totals;

        let mut rows = vec![vec![
            self.labels.total_excl_tax.clone(),
            currency.format_amount(totals.sub_total),
        ]];
        rows.extend(
            totals
                .tax_buckets
                .iter()
                .map(|bucket| vec![bucket.label(), currency.format_amount(bucket.amount)]),
        );
        rows.push(vec![
            self.labels.total_incl_tax.clone(),
            currency.format_amount(totals.grand_total),
        ]);

        self.story.body.push(Block::Spacer);
        self.push_table(TableKind::Summary, rows);
    }

    fn fill_legal_notice(&mut self) {
        let notice: Vec<String> = self
            .document
            .legal_notice
            .iter()
            .filter(|line| !line.trim().is_empty())
            .cloned()
            .collect();
        if notice.is_empty() {
            return;
        }

        self.story.body.push(Block::Spacer);
        for line in notice {
            self.push_paragraph(line, TextStyle::Smaller);
        }
    }
}
