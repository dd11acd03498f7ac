use genpdf::style::{self, Style};

use crate::config::ReportSettings;
use crate::modules::reports::models::{Color, TableKind, TextStyle};

/// One typographic point in millimetres
pub const PT: f64 = 25.4 / 72.0;

/// Sizes and colors of every text run and table of the report
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    pub font_size: f32,
    pub base: Color,
    pub on_base: Color,
}

impl Theme {
    pub fn from_settings(settings: &ReportSettings) -> Self {
        Self {
            font_size: settings.font_size,
            base: settings.base_color,
            on_base: settings.font_base_color,
        }
    }

    /// Font size times `factor`, in whole points
    pub fn size(&self, factor: f32) -> u8 {
        (self.font_size * factor).round().clamp(1.0, 255.0) as u8
    }

    pub fn text(&self, text_style: TextStyle) -> Style {
        match text_style {
            TextStyle::Normal => Style::new().with_font_size(self.size(1.0)),
            TextStyle::Small => Style::new().with_font_size(self.size(0.8)),
            TextStyle::Smaller => Style::new().with_font_size(self.size(0.7)),
            TextStyle::Address => Style::new().bold().with_font_size(self.size(1.2)),
        }
    }

    /// Style of one table cell; `row` and `column` index the story table
    pub fn cell(&self, kind: TableKind, row: usize, column: usize, rows: usize, columns: usize) -> Style {
        let last_row = row + 1 == rows;
        let last_column = column + 1 == columns;
        match kind {
            TableKind::References if row == 0 && column == 0 => {
                Style::new().with_font_size(self.size(1.5))
            }
            TableKind::References if row == 0 && last_column => {
                Style::new().with_font_size(self.size(1.2))
            }
            TableKind::Items if row == 0 => self.text(TextStyle::Normal).with_color(rgb(self.on_base)),
            TableKind::Summary if last_row => Style::new()
                .bold()
                .with_font_size(self.size(1.2))
                .with_color(rgb(self.on_base)),
            _ => self.text(TextStyle::Normal),
        }
    }
}

pub fn rgb(color: Color) -> style::Color {
    style::Color::Rgb(color.r, color.g, color.b)
}
