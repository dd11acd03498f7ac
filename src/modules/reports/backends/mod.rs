//! Output formats for composed documents.

pub mod pdf;
pub mod text;

pub use pdf::PdfBackend;
pub use text::TextBackend;

use std::str::FromStr;

use crate::config::ReportSettings;
use crate::core::{AppError, DocumentBackend, Result};

/// Output format selectable on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Pdf,
    Text,
}

impl OutputFormat {
    /// # Errors
    /// `AppError::Configuration` when the PDF fonts cannot be loaded
    pub fn backend(self, settings: &ReportSettings) -> Result<Box<dyn DocumentBackend>> {
        Ok(match self {
            OutputFormat::Pdf => Box::new(PdfBackend::from_settings(settings)?),
            OutputFormat::Text => Box::new(TextBackend::new()),
        })
    }
}

impl FromStr for OutputFormat {
    type Err = AppError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pdf" => Ok(OutputFormat::Pdf),
            "text" | "txt" => Ok(OutputFormat::Text),
            other => Err(AppError::validation(format!("Unsupported output format: {}", other))),
        }
    }
}
