pub mod backends;
pub mod models;
pub mod services;

pub use backends::{OutputFormat, PdfBackend, TextBackend};
pub use models::Labels;
pub use services::{InvoiceRenderer, InvoiceReport};
