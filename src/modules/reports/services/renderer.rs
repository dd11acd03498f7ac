use tracing::info;

use super::invoice_report::InvoiceReport;
use crate::config::ReportSettings;
use crate::core::{DocumentBackend, DocumentRenderer, Result};
use crate::modules::invoices::{InvoiceDocument, InvoiceTotals};
use crate::modules::reports::models::{InvoiceStory, Labels};

/// Renders invoice-like documents with one output backend
pub struct InvoiceRenderer<B: DocumentBackend> {
    labels: Labels,
    backend: B,
}

impl<B: DocumentBackend> InvoiceRenderer<B> {
    pub fn new(labels: Labels, backend: B) -> Self {
        Self { labels, backend }
    }

    /// Uses the labels file named by the settings, or the default captions
    pub fn from_settings(settings: &ReportSettings, backend: B) -> Result<Self> {
        settings.validate()?;
        let labels = match &settings.labels_path {
            Some(path) => Labels::from_path(path)?,
            None => Labels::default(),
        };
        Ok(Self::new(labels, backend))
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn labels(&self) -> &Labels {
        &self.labels
    }

    /// Totals shown in the summary table
    pub fn totals(&self, document: &InvoiceDocument) -> Result<InvoiceTotals> {
        document.validate()?;
        InvoiceTotals::compute(document.line_items(), document.currency())
    }

    /// Builds the story without serializing it
    pub fn compose(&self, document: &InvoiceDocument) -> Result<InvoiceStory> {
        InvoiceReport::new(&self.labels, document)?.compose()
    }
}

impl<B: DocumentBackend> DocumentRenderer for InvoiceRenderer<B> {
    fn render(&self, document: &InvoiceDocument) -> Result<Vec<u8>> {
        let story = self.compose(document)?;
        let bytes = self.backend.write(&story)?;

        info!(
            kind = %document.kind,
            reference = document.reference.as_deref().unwrap_or("-"),
            format = self.backend.name(),
            bytes = bytes.len(),
            "Document rendered"
        );

        Ok(bytes)
    }
}
