use std::fmt::Write as _;

use tracing::debug;

use crate::core::{AppError, DocumentBackend, Result};
use crate::modules::reports::models::{Block, InvoiceStory, Paragraph};

/// Plain-text dump of a story.
///
/// Paragraphs take one line each, table cells are separated by a tab and a
/// section spacer becomes an empty line. Page decorations other than the
/// address captions and the footer are left out.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextBackend;

impl TextBackend {
    pub fn new() -> Self {
        Self
    }
}

fn write_story(out: &mut String, story: &InvoiceStory) -> std::fmt::Result {
    let paragraphs = |out: &mut String, paragraphs: &[Paragraph]| -> std::fmt::Result {
        for paragraph in paragraphs {
            writeln!(out, "{}", paragraph.text)?;
        }
        Ok(())
    };

    if let Some(title) = &story.metadata.title {
        writeln!(out, "{}", title)?;
    }
    paragraphs(out, &story.sender)?;
    writeln!(out, "{}", story.captions.billing_address)?;
    paragraphs(out, &story.billing)?;
    writeln!(out, "{}", story.captions.delivery_address)?;
    paragraphs(out, &story.delivery)?;

    for block in &story.body {
        match block {
            Block::Paragraph(paragraph) => writeln!(out, "{}", paragraph.text)?,
            Block::Table(table) => {
                for row in &table.rows {
                    writeln!(out, "{}", row.join("\t"))?;
                }
            }
            Block::Spacer => writeln!(out)?,
        }
    }

    writeln!(out, "{}", story.registration)
}

impl DocumentBackend for TextBackend {
    fn name(&self) -> &'static str {
        "text"
    }

    fn write(&self, story: &InvoiceStory) -> Result<Vec<u8>> {
        let mut out = String::new();
        write_story(&mut out, story).map_err(|e| AppError::render(e.to_string()))?;

        debug!(bytes = out.len(), "Text written");
        Ok(out.into_bytes())
    }
}
