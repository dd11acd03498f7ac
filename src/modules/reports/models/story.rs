//! Backend-neutral content of an invoice report.
//!
//! `InvoiceReport` fills an [`InvoiceStory`]; each output backend decides how
//! the blocks look on its medium.

use std::path::PathBuf;

/// Text role of a paragraph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextStyle {
    Normal,
    /// 0.8x, sender block
    Small,
    /// 0.7x, legal notice and footer
    Smaller,
    /// Bold 1.2x, billing and delivery blocks
    Address,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paragraph {
    pub text: String,
    pub style: TextStyle,
}

impl Paragraph {
    pub fn new(text: impl Into<String>, style: TextStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    /// Record name and reference, then issue and due dates
    References,
    /// Header row plus one row per line item
    Items,
    /// Sub-total, one row per tax bucket, grand total; kept on one page
    Summary,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub kind: TableKind,
    pub rows: Vec<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Paragraph(Paragraph),
    Table(Table),
    /// Gap between two sections
    Spacer,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentMetadata {
    pub title: Option<String>,
    pub subject: Option<String>,
    pub author: Option<String>,
    pub creator: Option<String>,
    pub keywords: Vec<String>,
}

/// Captions drawn by the page decorations, already upper-cased where needed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Captions {
    pub billing_address: String,
    pub delivery_address: String,
    pub page: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvoiceStory {
    pub metadata: DocumentMetadata,
    /// First page, top left
    pub sender: Vec<Paragraph>,
    /// First page, top right of the sender block
    pub logo: Option<PathBuf>,
    pub billing: Vec<Paragraph>,
    pub delivery: Vec<Paragraph>,
    /// Flowing content below the main line
    pub body: Vec<Block>,
    /// Footer line of every page
    pub registration: String,
    pub captions: Captions,
}

impl InvoiceStory {
    /// Every table of the body, in story order
    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.body.iter().filter_map(|block| match block {
            Block::Table(table) => Some(table),
            _ => None,
        })
    }

    pub fn table(&self, kind: TableKind) -> Option<&Table> {
        self.tables().find(|table| table.kind == kind)
    }

    /// Every text of the story except the metadata, in reading order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        let mut texts: Vec<&str> = self.sender.iter().map(|p| p.text.as_str()).collect();
        texts.push(self.captions.billing_address.as_str());
        texts.extend(self.billing.iter().map(|p| p.text.as_str()));
        texts.push(self.captions.delivery_address.as_str());
        texts.extend(self.delivery.iter().map(|p| p.text.as_str()));
        for block in &self.body {
            match block {
                Block::Paragraph(p) => texts.push(p.text.as_str()),
                Block::Table(table) => {
                    texts.extend(table.rows.iter().flatten().map(String::as_str))
                }
                Block::Spacer => {}
            }
        }
        texts.push(self.registration.as_str());
        texts.into_iter()
    }
}
