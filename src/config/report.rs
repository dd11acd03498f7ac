use std::path::PathBuf;

use crate::core::{AppError, Result};
use crate::modules::reports::models::{Color, FontName};

pub const DEFAULT_FONT_SIZE: f32 = 10.0;
pub const DEFAULT_BASE_COLOR: &str = "#2b5797";
pub const DEFAULT_FONT_BASE_COLOR: &str = "#ffffff";

/// Rendering settings shared by every report
#[derive(Debug, Clone, PartialEq)]
pub struct ReportSettings {
    pub font_name: FontName,
    /// Directory holding the TrueType files that provide glyph metrics for
    /// `font_name`; the usual system font directories are searched if unset
    pub font_dir: Option<PathBuf>,
    pub font_size: f32,
    /// Accent color of rules, labels and table headers
    pub base_color: Color,
    /// Text color used on top of `base_color`
    pub font_base_color: Color,
    /// Optional YAML/JSON file overriding the default captions
    pub labels_path: Option<PathBuf>,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            font_name: FontName::Helvetica,
            font_dir: None,
            font_size: DEFAULT_FONT_SIZE,
            base_color: Color::rgb(0x2b, 0x57, 0x97),
            font_base_color: Color::WHITE,
            labels_path: None,
        }
    }
}

impl ReportSettings {
    pub fn from_vars<F>(var: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let font_name = var("REPORT_FONT_NAME")
            .unwrap_or_else(|| "helvetica".to_string())
            .parse::<FontName>()
            .map_err(AppError::Configuration)?;

        let font_size = match var("REPORT_FONT_SIZE") {
            Some(raw) => raw
                .trim()
                .parse::<f32>()
                .map_err(|_| AppError::configuration(format!("Invalid REPORT_FONT_SIZE: {}", raw)))?,
            None => DEFAULT_FONT_SIZE,
        };

        let path = |key: &str| {
            var(key)
                .filter(|path| !path.trim().is_empty())
                .map(PathBuf::from)
        };

        let color = |key: &str, default: &str| {
            Color::from_hex(&var(key).unwrap_or_else(|| default.to_string()))
                .map_err(|e| AppError::configuration(format!("Invalid {}: {}", key, e)))
        };

        Ok(Self {
            font_name,
            font_dir: path("REPORT_FONT_DIR"),
            font_size,
            base_color: color("REPORT_BASE_COLOR", DEFAULT_BASE_COLOR)?,
            font_base_color: color("REPORT_FONT_BASE_COLOR", DEFAULT_FONT_BASE_COLOR)?,
            labels_path: path("REPORT_LABELS_PATH"),
        })
    }

    pub fn validate(&self) -> Result<()> {
        if !self.font_size.is_finite() || self.font_size < 4.0 || self.font_size > 72.0 {
            return Err(AppError::configuration(format!(
                "Font size must be between 4 and 72 points, got {}",
                self.font_size
            )));
        }
        Ok(())
    }
}
