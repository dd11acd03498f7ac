//! PDF output composed with genpdf on the standard PDF fonts.
//!
//! The story is laid out twice: the first pass counts the pages and measures
//! the table rows, the second draws the final document with the page total
//! in the footer and the cell backgrounds sized to their rows.

mod decorators;
mod elements;
mod encoding;
mod fonts;
mod metadata;
mod theme;

pub use encoding::{to_win_ansi, win_ansi_byte};
pub use fonts::load_font_family;
pub use metadata::apply_metadata;
pub use theme::Theme;

use std::cell::Cell;
use std::io;
use std::path::Path;
use std::rc::Rc;

use genpdf::elements::{
    Break, Image, LinearLayout, Paragraph as TextElement, StyledElement, TableLayout,
};
use genpdf::fonts::{FontData, FontFamily};
use genpdf::style::Style;
use genpdf::{Alignment, Document, Element, Mm, PaperSize};
use image::DynamicImage;
use tracing::debug;

use self::decorators::{
    cell_padding, InvoicePageDecorator, RowHeights, TableDecorator, CONTINUATION_BODY_HEIGHT,
};
use self::elements::{FixedFrame, Gap, KeepTogether};
use crate::config::ReportSettings;
use crate::core::{AppError, DocumentBackend, Result};
use crate::modules::reports::models::{Block, InvoiceStory, Paragraph, Table, TableKind};

/// Height of the sender block, logo included
const SENDER_HEIGHT: f64 = 25.0;
const ADDRESSES_HEIGHT: f64 = 38.0;
const LOGO_MAX_WIDTH: f64 = 50.0;
const LOGO_MAX_HEIGHT: f64 = 20.0;
const LOGO_MIN_DPI: f64 = 300.0;

/// A rendered document and the number of its pages
#[derive(Debug, Clone)]
pub struct RenderedPdf {
    pub bytes: Vec<u8>,
    pub page_count: usize,
}

/// PDF output of invoice stories
#[derive(Clone)]
pub struct PdfBackend {
    fonts: FontFamily<FontData>,
    theme: Theme,
}

impl PdfBackend {
    pub fn new(fonts: FontFamily<FontData>, theme: Theme) -> Self {
        Self { fonts, theme }
    }

    /// Loads the font metrics named by the settings
    pub fn from_settings(settings: &ReportSettings) -> Result<Self> {
        settings.validate()?;
        let fonts = load_font_family(settings)?;
        Ok(Self::new(fonts, Theme::from_settings(settings)))
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn render_story(&self, story: &InvoiceStory) -> Result<RenderedPdf> {
        let logo = story.logo.as_deref().map(logo_image).transpose()?;
        let row_heights: Vec<RowHeights> = story.tables().map(|_| RowHeights::default()).collect();

        let pages = Rc::new(Cell::new(0));
        self.document(story, logo.clone(), &row_heights, None, Rc::clone(&pages))?
            .render(io::sink())
            .map_err(render_error)?;
        let page_count = pages.get();
        debug!(pages = page_count, "Layout measured");

        let pages = Rc::new(Cell::new(0));
        let mut bytes = Vec::new();
        self.document(story, logo, &row_heights, Some(page_count), Rc::clone(&pages))?
            .render(&mut bytes)
            .map_err(render_error)?;

        let bytes = apply_metadata(&bytes, &story.metadata)?;
        Ok(RenderedPdf {
            bytes,
            page_count: pages.get(),
        })
    }

    fn document(
        &self,
        story: &InvoiceStory,
        logo: Option<DynamicImage>,
        row_heights: &[RowHeights],
        page_count: Option<usize>,
        pages: Rc<Cell<usize>>,
    ) -> Result<Document> {
        let mut document = Document::new(self.fonts.clone());
        if let Some(title) = &story.metadata.title {
            document.set_title(title.clone());
        }
        document.set_paper_size(PaperSize::A4);
        document.set_font_size(self.theme.size(1.0));
        document.set_page_decorator(InvoicePageDecorator::new(
            self.theme,
            story.captions.clone(),
            story.registration.clone(),
            page_count,
            pages,
        ));

        document.push(FixedFrame::new(
            "sender",
            self.sender(story, logo)?,
            SENDER_HEIGHT,
        ));
        document.push(Gap::new(8.0));
        document.push(FixedFrame::new(
            "addresses",
            self.addresses(story)?,
            ADDRESSES_HEIGHT,
        ));
        // body starts below the main line
        document.push(Gap::new(29.0));

        let mut heights = row_heights.iter();
        for block in &story.body {
            match block {
                Block::Paragraph(paragraph) => document.push(self.paragraph(paragraph)),
                Block::Table(table) => {
                    let heights = heights.next().cloned().unwrap_or_default();
                    let element = self.table(table, heights)?;
                    if table.kind == TableKind::Summary {
                        let lines = self.summary_lines(table);
                        document.push(KeepTogether::new(element, lines, CONTINUATION_BODY_HEIGHT));
                    } else {
                        document.push(element);
                    }
                }
                Block::Spacer => document.push(Break::new(1.0)),
            }
        }

        Ok(document)
    }

    fn paragraph(&self, paragraph: &Paragraph) -> StyledElement<TextElement> {
        TextElement::new(to_win_ansi(&paragraph.text).into_owned())
            .styled(self.theme.text(paragraph.style))
    }

    fn column(&self, paragraphs: &[Paragraph]) -> LinearLayout {
        let mut layout = LinearLayout::vertical();
        for paragraph in paragraphs {
            layout.push(self.paragraph(paragraph));
        }
        layout
    }

    fn sender(&self, story: &InvoiceStory, logo: Option<DynamicImage>) -> Result<LinearLayout> {
        let mut sender = LinearLayout::vertical();
        let lines = self.column(&story.sender);
        match logo {
            None => sender.push(lines),
            Some(logo) => {
                let mut table = TableLayout::new(vec![120, 50]);
                table
                    .row()
                    .element(lines)
                    .element(logo_element(logo)?)
                    .push()
                    .map_err(render_error)?;
                sender.push(table);
            }
        }
        Ok(sender)
    }

    fn addresses(&self, story: &InvoiceStory) -> Result<TableLayout> {
        let mut table = TableLayout::new(vec![75, 20, 75]);
        table
            .row()
            .element(self.column(&story.billing))
            .element(Gap::new(0.0))
            .element(self.column(&story.delivery))
            .push()
            .map_err(render_error)?;
        Ok(table)
    }

    fn table(&self, table: &Table, row_heights: RowHeights) -> Result<TableLayout> {
        let (weights, leading_blank) = match table.kind {
            TableKind::References => (vec![110, 60], false),
            TableKind::Items => (vec![85, 20, 20, 20, 25], false),
            TableKind::Summary => (vec![90, 55, 25], true),
        };

        let mut layout = TableLayout::new(weights);
        layout.set_cell_decorator(TableDecorator::new(table.kind, self.theme, row_heights));

        let rows = table.rows.len();
        for (row_index, row) in table.rows.iter().enumerate() {
            let columns = row.len();
            let mut cells = layout.row();
            if leading_blank {
                cells.push_element(TextElement::new(""));
            }
            for (column, text) in row.iter().enumerate() {
                let style = self.theme.cell(table.kind, row_index, column, rows, columns);
                let alignment = cell_alignment(table.kind, column, columns);
                cells.push_element(
                    TextElement::new(to_win_ansi(text).into_owned())
                        .aligned(alignment)
                        .styled(style),
                );
            }
            cells.push().map_err(render_error)?;
        }
        Ok(layout)
    }

    /// One line per summary row, with the row paddings
    fn summary_lines(&self, table: &Table) -> Vec<(Style, Mm)> {
        let rows = table.rows.len();
        table
            .rows
            .iter()
            .enumerate()
            .map(|(row, cells)| {
                let style = self.theme.cell(TableKind::Summary, row, 0, rows, cells.len());
                let padding = cell_padding(TableKind::Summary, 1, row, rows);
                (style, padding.vertical())
            })
            .collect()
    }
}

fn cell_alignment(kind: TableKind, column: usize, columns: usize) -> Alignment {
    let right = match kind {
        TableKind::References => column + 1 == columns && column > 0,
        TableKind::Items => column >= 1,
        TableKind::Summary => true,
    };
    if right {
        Alignment::Right
    } else {
        Alignment::Left
    }
}

/// Resolution that fits a logo of `width` x `height` pixels in the logo box
pub fn logo_dpi(width: u32, height: u32) -> f64 {
    let horizontal = f64::from(width) * 25.4 / LOGO_MAX_WIDTH;
    let vertical = f64::from(height) * 25.4 / LOGO_MAX_HEIGHT;
    horizontal.max(vertical).max(LOGO_MIN_DPI)
}

/// Opens a PNG or JPEG logo without its alpha channel
fn logo_image(path: &Path) -> Result<DynamicImage> {
    let image = image::open(path).map_err(|e| {
        AppError::render(format!("Cannot read logo {}: {}", path.display(), e))
    })?;
    Ok(DynamicImage::ImageRgb8(image.to_rgb8()))
}

fn logo_element(logo: DynamicImage) -> Result<Image> {
    let rgb = logo.to_rgb8();
    let dpi = logo_dpi(rgb.width(), rgb.height());
    Ok(Image::from_dynamic_image(DynamicImage::ImageRgb8(rgb))
        .map_err(render_error)?
        .with_alignment(Alignment::Right)
        .with_dpi(dpi))
}

fn render_error(error: genpdf::error::Error) -> AppError {
    AppError::render(format!("PDF layout failed: {}", error))
}

impl DocumentBackend for PdfBackend {
    fn name(&self) -> &'static str {
        "pdf"
    }

    fn write(&self, story: &InvoiceStory) -> Result<Vec<u8>> {
        let rendered = self.render_story(story)?;
        debug!(
            pages = rendered.page_count,
            bytes = rendered.bytes.len(),
            "PDF written"
        );
        Ok(rendered.bytes)
    }
}

impl std::fmt::Debug for PdfBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PdfBackend")
            .field("theme", &self.theme)
            .finish_non_exhaustive()
    }
}
