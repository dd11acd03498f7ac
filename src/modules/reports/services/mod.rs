pub mod invoice_report;
pub mod renderer;

pub use invoice_report::InvoiceReport;
pub use renderer::InvoiceRenderer;
