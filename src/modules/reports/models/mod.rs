mod color;
mod font;
mod labels;
pub mod story;

pub use color::Color;
pub use font::FontName;
pub use labels::Labels;
pub use story::{Block, Captions, DocumentMetadata, InvoiceStory, Paragraph, Table, TableKind, TextStyle};
