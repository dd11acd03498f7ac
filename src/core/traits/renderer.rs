use crate::core::Result;
use crate::modules::invoices::InvoiceDocument;
use crate::modules::reports::models::InvoiceStory;

/// Serializes an invoice story into an output format
pub trait DocumentBackend: Send + Sync {
    /// Short format name used in logs and on the command line
    fn name(&self) -> &'static str;

    fn write(&self, story: &InvoiceStory) -> Result<Vec<u8>>;
}

/// Turns a billing document into the bytes of a printable document
pub trait DocumentRenderer: Send + Sync {
    fn render(&self, document: &InvoiceDocument) -> Result<Vec<u8>>;
}

impl<B: DocumentBackend + ?Sized> DocumentBackend for Box<B> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn write(&self, story: &InvoiceStory) -> Result<Vec<u8>> {
        (**self).write(story)
    }
}
