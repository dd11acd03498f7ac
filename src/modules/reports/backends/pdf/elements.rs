//! Layout elements missing from genpdf: fixed-height frames, vertical gaps
//! and keep-together groups.

use genpdf::error::Error;
use genpdf::render::Area;
use genpdf::style::Style;
use genpdf::{Context, Element, Mm, RenderResult, Size};
use tracing::warn;

/// Gives its element exactly `height`, whatever the element needs.
///
/// Content that does not fit is cut and logged.
pub struct FixedFrame<E: Element> {
    name: &'static str,
    inner: E,
    height: Mm,
}

impl<E: Element> FixedFrame<E> {
    pub fn new(name: &'static str, inner: E, height: impl Into<Mm>) -> Self {
        Self {
            name,
            inner,
            height: height.into(),
        }
    }
}

impl<E: Element> Element for FixedFrame<E> {
    fn render(
        &mut self,
        context: &Context,
        mut area: Area<'_>,
        style: Style,
    ) -> Result<RenderResult, Error> {
        let width = area.size().width;
        if area.size().height > self.height {
            area.set_height(self.height);
        }

        let result = self.inner.render(context, area, style)?;
        if result.has_more {
            warn!(frame = self.name, "Frame content overflows and is cut");
        }

        Ok(RenderResult {
            size: Size::new(width, self.height),
            has_more: false,
        })
    }
}

/// Empty vertical space, shortened at the bottom of a page
pub struct Gap {
    height: Mm,
}

impl Gap {
    pub fn new(height: impl Into<Mm>) -> Self {
        Self {
            height: height.into(),
        }
    }
}

impl Element for Gap {
    fn render(
        &mut self,
        _context: &Context,
        area: Area<'_>,
        _style: Style,
    ) -> Result<RenderResult, Error> {
        let size = area.size();
        let height = if size.height < self.height {
            size.height
        } else {
            self.height
        };
        Ok(RenderResult {
            size: Size::new(size.width, height),
            has_more: false,
        })
    }
}

/// Moves its element to the next page when the rest of the current one is
/// too short for it.
///
/// The height is estimated from one text line per entry of `lines`, plus the
/// extra space of that line. An element taller than `page_height` is never
/// moved.
pub struct KeepTogether<E: Element> {
    inner: E,
    lines: Vec<(Style, Mm)>,
    page_height: Mm,
    checked: bool,
}

impl<E: Element> KeepTogether<E> {
    pub fn new(inner: E, lines: Vec<(Style, Mm)>, page_height: impl Into<Mm>) -> Self {
        Self {
            inner,
            lines,
            page_height: page_height.into(),
            checked: false,
        }
    }

    fn estimated_height(&self, context: &Context) -> Mm {
        self.lines
            .iter()
            .fold(Mm::from(0.0), |height, (style, extra)| {
                height + style.line_height(&context.font_cache) + *extra
            })
    }
}

impl<E: Element> Element for KeepTogether<E> {
    fn render(
        &mut self,
        context: &Context,
        area: Area<'_>,
        style: Style,
    ) -> Result<RenderResult, Error> {
        if !self.checked {
            self.checked = true;
            let available = area.size().height;
            let needed = self.estimated_height(context);
            if available < needed && available < self.page_height && needed <= self.page_height {
                return Ok(RenderResult {
                    size: Size::new(0.0, 0.0),
                    has_more: true,
                });
            }
        }
        self.inner.render(context, area, style)
    }
}
