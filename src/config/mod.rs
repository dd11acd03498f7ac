use crate::core::{AppError, Result};
use std::env;

pub mod report;

pub use report::ReportSettings;

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub report: ReportSettings,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub env: String,
    pub log_level: String,
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "text" | "pretty" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(AppError::configuration(format!("Invalid LOG_FORMAT: {}", other))),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup
    pub fn from_vars<F>(var: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = Config {
            app: AppConfig {
                env: var("APP_ENV").unwrap_or_else(|| "development".to_string()),
                log_level: var("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
                log_format: var("LOG_FORMAT")
                    .unwrap_or_else(|| "text".to_string())
                    .parse()?,
            },
            report: ReportSettings::from_vars(&var)?,
        };

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.app.log_level.trim().is_empty() {
            return Err(AppError::Configuration(
                "LOG_LEVEL must not be empty".to_string(),
            ));
        }

        self.report.validate()
    }
}
