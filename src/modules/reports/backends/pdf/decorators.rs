use std::cell::{Cell, RefCell};
use std::rc::Rc;

use genpdf::elements::{CellDecorator, Paragraph};
use genpdf::error::Error;
use genpdf::render::Area;
use genpdf::style::{LineStyle, Style};
use genpdf::{Alignment, Context, Element, Margins, Mm, PageDecorator, Position};

use super::encoding::to_win_ansi;
use super::theme::{rgb, Theme, PT};
use crate::modules::reports::models::{Captions, Color, TableKind, TextStyle};

/// A4 height
const PAGE_HEIGHT: f64 = 297.0;
/// Body height of every page after the first
pub const CONTINUATION_BODY_HEIGHT: f64 = PAGE_HEIGHT - 25.0 - 25.0;

/// Heights of the rows of one table, measured on the first rendering pass
pub type RowHeights = Rc<RefCell<Vec<Mm>>>;

/// Distance from the top of the page of a point `y` mm above the bottom edge
fn from_top(y: f64) -> f64 {
    PAGE_HEIGHT - y
}

fn page_margins(page: usize) -> Margins {
    if page == 1 {
        // Sender block starts 285 mm above the bottom edge
        Margins::trbl(from_top(285.0), 20.0, 25.0, 20.0)
    } else {
        Margins::trbl(25.0, 20.0, 25.0, 20.0)
    }
}

/// Main line, address captions and footer of invoice pages.
///
/// Counts the pages it decorates into `pages`; with `page_count` unset the
/// footer shows the current page as the total.
pub struct InvoicePageDecorator {
    theme: Theme,
    captions: Captions,
    registration: String,
    page: usize,
    page_count: Option<usize>,
    pages: Rc<Cell<usize>>,
}

impl InvoicePageDecorator {
    pub fn new(
        theme: Theme,
        captions: Captions,
        registration: String,
        page_count: Option<usize>,
        pages: Rc<Cell<usize>>,
    ) -> Self {
        Self {
            theme,
            captions,
            registration,
            page: 0,
            page_count,
            pages,
        }
    }

    fn draw_main_line(&self, area: &Area<'_>) {
        let y = from_top(193.0);
        area.draw_line(
            vec![Position::new(20.0, y), Position::new(190.0, y)],
            LineStyle::new()
                .with_thickness(1.5)
                .with_color(rgb(Color::DARK_GREY)),
        );
    }

    fn draw_addresses_labels(&self, context: &Context, area: &Area<'_>) -> Result<(), Error> {
        let color = rgb(self.theme.base);
        let label = Style::new().with_font_size(9).with_color(color);

        for (left, right, caption) in [
            (20.0, 95.0, &self.captions.billing_address),
            (115.0, 190.0, &self.captions.delivery_address),
        ] {
            area.draw_line(
                vec![
                    Position::new(left, from_top(212.0)),
                    Position::new(right, from_top(212.0)),
                ],
                LineStyle::new().with_thickness(0.2 * PT).with_color(color),
            );
            // baseline 208 mm above the bottom edge
            area.print_str(
                &context.font_cache,
                Position::new(left, from_top(211.0)),
                label,
                to_win_ansi(caption),
            )?;
        }
        Ok(())
    }

    fn draw_footer(&self, context: &Context, area: &Area<'_>, style: Style) -> Result<(), Error> {
        let footer = self.theme.text(TextStyle::Smaller);
        let top = from_top(16.0);

        let mut left = area.clone();
        left.add_offset(Position::new(20.0, top));
        left.set_width(Mm::from(140.0));
        Paragraph::new(to_win_ansi(&self.registration).into_owned())
            .styled(footer)
            .render(context, left, style)?;

        let page = format!(
            "{} {}/{}",
            self.captions.page,
            self.page,
            self.page_count.unwrap_or(self.page)
        );
        let mut right = area.clone();
        right.add_offset(Position::new(150.0, top));
        right.set_width(Mm::from(40.0));
        Paragraph::new(to_win_ansi(&page).into_owned())
            .aligned(Alignment::Right)
            .styled(footer)
            .render(context, right, style)?;
        Ok(())
    }
}

impl PageDecorator for InvoicePageDecorator {
    fn decorate_page<'a>(
        &mut self,
        context: &Context,
        mut area: Area<'a>,
        style: Style,
    ) -> Result<Area<'a>, Error> {
        self.page += 1;
        self.pages.set(self.page);

        if self.page == 1 {
            self.draw_main_line(&area);
            self.draw_addresses_labels(context, &area)?;
        }
        self.draw_footer(context, &area, style)?;

        area.add_margins(page_margins(self.page));
        Ok(area)
    }
}

/// Cell paddings in millimetres
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Padding {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Padding {
    fn pt(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top: top * PT,
            right: right * PT,
            bottom: bottom * PT,
            left: left * PT,
        }
    }

    pub fn vertical(&self) -> Mm {
        Mm::from(self.top + self.bottom)
    }
}

/// Paddings of a cell of the rendered table; the summary table has an empty
/// leading column
pub fn cell_padding(kind: TableKind, column: usize, row: usize, rows: usize) -> Padding {
    let last_row = row + 1 == rows;
    match kind {
        TableKind::References => Padding::pt(4.0, 0.0, 4.0, 0.0),
        TableKind::Items => Padding::pt(4.0, 6.0, 4.0, 6.0),
        TableKind::Summary => {
            let top = if row > 0 { 6.0 } else { 3.0 };
            let bottom = if last_row { 3.0 } else { 6.0 };
            let sides = if column == 0 { 0.0 } else { 6.0 };
            Padding::pt(top, sides, bottom, sides)
        }
    }
}

/// Backgrounds, paddings and rules of the report tables.
///
/// genpdf decorates a row after its content is drawn, so a background drawn
/// then would hide the text. Backgrounds are drawn before the content
/// instead, from row heights recorded into `row_heights` by an earlier
/// rendering of the same table.
pub struct TableDecorator {
    kind: TableKind,
    theme: Theme,
    rows: usize,
    row_heights: RowHeights,
}

impl TableDecorator {
    pub fn new(kind: TableKind, theme: Theme, row_heights: RowHeights) -> Self {
        Self {
            kind,
            theme,
            rows: 0,
            row_heights,
        }
    }

    fn background(&self, column: usize, row: usize) -> Option<Color> {
        let last_row = row + 1 == self.rows;
        match self.kind {
            TableKind::Items if row == 0 => Some(self.theme.base),
            TableKind::Summary if last_row && column >= 1 => Some(self.theme.base),
            TableKind::Summary if column == 2 => Some(self.theme.base.tint(0.1)),
            _ => None,
        }
    }

    fn line_below(&self, row: usize) -> Option<(f64, Color)> {
        match self.kind {
            TableKind::Summary if row + 1 < self.rows => Some((4.0 * PT, Color::WHITE)),
            _ => None,
        }
    }

    fn record_height(&self, row: usize, height: Mm) {
        let mut heights = self.row_heights.borrow_mut();
        if heights.len() <= row {
            heights.resize(row + 1, Mm::from(0.0));
        }
        if heights[row] < height {
            heights[row] = height;
        }
    }
}

impl CellDecorator for TableDecorator {
    fn set_table_size(&mut self, _num_columns: usize, num_rows: usize) {
        self.rows = num_rows;
    }

    fn prepare_cell<'p>(&self, column: usize, row: usize, mut area: Area<'p>) -> Area<'p> {
        let measured = self.row_heights.borrow().get(row).copied();
        if let (Some(color), Some(height)) = (self.background(column, row), measured) {
            // a stroke as thick as the row fills the cell
            let middle = height / 2.0;
            area.draw_line(
                vec![
                    Position::new(Mm::from(0.0), middle),
                    Position::new(area.size().width, middle),
                ],
                LineStyle::new().with_thickness(height).with_color(rgb(color)),
            );
        }

        let padding = cell_padding(self.kind, column, row, self.rows);
        area.add_margins(Margins::trbl(
            padding.top,
            padding.right,
            padding.bottom,
            padding.left,
        ));
        area
    }

    fn decorate_cell(
        &mut self,
        column: usize,
        row: usize,
        _has_more: bool,
        area: Area<'_>,
        row_height: Mm,
    ) -> Mm {
        let padding = cell_padding(self.kind, column, row, self.rows);
        let height = row_height + padding.vertical();

        if let Some((thickness, color)) = self.line_below(row) {
            let y = height - Mm::from(thickness / 2.0);
            area.draw_line(
                vec![
                    Position::new(Mm::from(0.0), y),
                    Position::new(area.size().width, y),
                ],
                LineStyle::new().with_thickness(thickness).with_color(rgb(color)),
            );
        }

        self.record_height(row, height);
        height
    }
}
