/// Crate-wide Result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Main error type for document preparation and rendering
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// Invalid billing data (negative amounts, out-of-range tax rates, ...)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Rounding produced totals that disagree beyond tolerance
    #[error("Precision error: {0}")]
    Precision(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Layout or output backend failures
    #[error("Render error: {0}")]
    Render(String),

    /// File and stream errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization/deserialization errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

// Helper functions for common error scenarios
impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn precision(msg: impl Into<String>) -> Self {
        AppError::Precision(msg.into())
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        AppError::Configuration(msg.into())
    }

    pub fn render(msg: impl Into<String>) -> Self {
        AppError::Render(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }

    /// True for errors caused by the input data rather than the environment
    pub fn is_validation(&self) -> bool {
        matches!(self, AppError::Validation(_))
    }
}
