//! Invoice document rendering library
//!
//! Computes the totals of a billing document and lays it out as a printable
//! invoice, quotation or credit note.

pub mod config;
pub mod core;
pub mod modules;

// Re-export commonly used types
pub use crate::core::{AppError, Currency, DocumentBackend, DocumentRenderer, Result};
pub use modules::invoices;
pub use modules::reports;
pub use modules::taxes;
