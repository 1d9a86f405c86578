//! Invoice layout: turns a canonical document into a paginated canvas.
//!
//! Placement is expressed as pure steps. Each step takes a [`LayoutCursor`]
//! and returns a [`Placement`] carrying the commands it produced and the
//! cursor for the next step; [`LayoutEngine::layout`] applies them to the
//! canvas in order.

use crate::LayoutError;
use crate::algorithms::pagination::check_fit;
use crate::canvas::{Canvas, DrawCommand, ImageResource, meta};
use crate::config::{LayoutConfig, PageGeometry};
use crate::cursor::{LayoutCursor, Placement};
use crate::fonts::{FontLibrary, FontRole};
use crate::painting::{self, INK, MUTED, PaintContext, RULE, chrome, totals};
use crate::text::{format_money, wrap};
use ledgerprint_types::{InvoiceDocument, LineItem, Size};
use log::{debug, trace, warn};

const BULLET: &str = "\u{2022}";
const TOTALS_GAP: f32 = 12.0;
const NOTES_GAP: f32 = 14.0;
const NOTES_LABEL_SIZE: f32 = 9.0;
const NOTES_FONT_SIZE: f32 = 9.0;
const NOTES_LINE_HEIGHT: f32 = 12.0;

pub struct LayoutEngine<'a> {
    fonts: &'a FontLibrary,
    config: &'a LayoutConfig,
    geometry: PageGeometry,
}

impl<'a> LayoutEngine<'a> {
    pub fn new(fonts: &'a FontLibrary, config: &'a LayoutConfig) -> Self {
        Self {
            fonts,
            config,
            geometry: PageGeometry::from_config(config),
        }
    }

    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    fn paint_context(&self) -> PaintContext<'a> {
        PaintContext {
            fonts: self.fonts,
            config: self.config,
            geometry: self.geometry,
        }
    }

    /// Rejects configurations that cannot hold a column header plus one
    /// line of content on every page.
    pub fn validate(&self) -> Result<(), LayoutError> {
        let config = self.config;
        let geometry = &self.geometry;

        let sizes = [
            config.title_font_size,
            config.title_line_height,
            config.description_font_size,
            config.description_line_height,
            config.detail_font_size,
            config.detail_line_height,
        ];
        if sizes.iter().any(|v| !v.is_finite() || *v <= 0.0) {
            return Err(LayoutError::InvalidConfiguration(
                "font sizes and line heights must be positive".to_string(),
            ));
        }
        if geometry.description_width.is_nan() || geometry.description_width <= 0.0 {
            return Err(LayoutError::InvalidConfiguration(format!(
                "content width {:.2} leaves no room beside the {:.2}pt amount column",
                geometry.content_width(),
                config.amount_column_width
            )));
        }
        if config.detail_indent >= geometry.description_width {
            return Err(LayoutError::InvalidConfiguration(format!(
                "detail indent {:.2} exceeds the description column width {:.2}",
                config.detail_indent, geometry.description_width
            )));
        }

        let tallest_line = sizes[1]
            .max(sizes[3])
            .max(sizes[5])
            .max(config.item_padding);
        for page_index in [0, 1] {
            let room = geometry.content_top(page_index, config) - geometry.min_content_y;
            if room < tallest_line {
                return Err(LayoutError::InvalidConfiguration(format!(
                    "page {} has {:.2}pt of content height below the column header, \
                     less than one {:.2}pt line",
                    page_index + 1,
                    room,
                    tallest_line
                )));
            }
        }
        Ok(())
    }

    /// Lays out the whole document. `logo` is drawn in the header when
    /// present; otherwise the configured company name stands in for it.
    pub fn layout(
        &self,
        doc: &InvoiceDocument,
        logo: Option<&ImageResource>,
    ) -> Result<Canvas, LayoutError> {
        self.validate()?;

        let mut canvas = Canvas::new(Size::new(self.geometry.page_width, self.geometry.page_height));
        let logo = logo.filter(|image| {
            let drawable = image.is_drawable();
            if !drawable {
                warn!(
                    "Logo {}x{} with {} bytes of pixel data cannot be drawn; using company name",
                    image.width,
                    image.height,
                    image.rgb.len()
                );
            }
            drawable
        });
        if let Some(image) = logo {
            canvas.register_image(chrome::LOGO_RESOURCE_ID, image.clone());
        }

        let mut cursor = commit(&mut canvas, self.place_header(doc, logo));
        for (index, item) in doc.line_items.iter().enumerate() {
            trace!(
                "Line item {} '{}': estimated height {:.2}",
                index,
                item.title,
                self.estimate_item_height(item)
            );
            cursor = commit(&mut canvas, self.place_line_item(cursor, item, doc)?);
        }
        cursor = commit(&mut canvas, self.place_totals(cursor, doc)?);
        if let Some(notes) = doc.notes.as_deref().filter(|n| !n.trim().is_empty()) {
            cursor = commit(&mut canvas, self.place_notes(cursor, notes, doc)?);
        }
        commit(&mut canvas, self.place_footer(cursor, doc));

        debug!(
            "Laid out invoice {} ({} line items) on {} page(s)",
            doc.invoice_number,
            doc.line_items.len(),
            canvas.page_count()
        );
        Ok(canvas)
    }

    /// Rough height of a line item assuming nothing wraps. Used for
    /// diagnostics only; placement measures every line as it goes.
    pub fn estimate_item_height(&self, item: &LineItem) -> f32 {
        let config = self.config;
        let description = if item.description.is_some() {
            config.description_line_height
        } else {
            0.0
        };
        config.title_line_height
            + description
            + item.details.len() as f32 * config.detail_line_height
            + config.item_padding
    }

    /// Header and first column header; the cursor lands on the first
    /// content line of page one.
    pub fn place_header(&self, doc: &InvoiceDocument, logo: Option<&ImageResource>) -> Placement {
        let ctx = self.paint_context();
        let mut placement = Placement::at(LayoutCursor::new(0, self.geometry.content_top(0, self.config)));
        placement.push_all(0, chrome::header_commands(&ctx, doc, logo));
        placement.push_all(0, chrome::column_header_commands(&ctx, 0));
        placement
    }

    /// Closes the cursor's page with a footer and opens the next one with a
    /// repeated column header.
    pub fn break_page(&self, cursor: LayoutCursor, doc: &InvoiceDocument) -> Placement {
        let ctx = self.paint_context();
        let next = cursor.page_index + 1;
        let mut placement = Placement::at(LayoutCursor::new(next, self.geometry.content_top(next, self.config)));
        placement.push_all(
            cursor.page_index,
            chrome::footer_commands(&ctx, cursor.page_index, &doc.invoice_number),
        );
        placement.push_all(next, chrome::column_header_commands(&ctx, next));
        placement
    }

    /// Breaks the page when `height` does not fit below `cursor`. When
    /// `continued_title` is set, the new page opens with a continuation line
    /// for that item.
    fn ensure_space(
        &self,
        cursor: LayoutCursor,
        height: f32,
        doc: &InvoiceDocument,
        continued_title: Option<&str>,
    ) -> Result<Placement, LayoutError> {
        let min_y = self.geometry.min_content_y;
        let analysis = check_fit(cursor.y, height, min_y);
        if !analysis.should_break {
            return Ok(Placement::at(cursor));
        }

        let marker_height = continued_title
            .map(|_| self.config.description_line_height)
            .unwrap_or(0.0);
        let fresh_top = self.geometry.content_top(cursor.page_index + 1, self.config);
        if check_fit(fresh_top, height + marker_height, min_y).should_break {
            return Err(LayoutError::ElementTooLarge(height + marker_height, fresh_top - min_y));
        }

        debug!(
            "Page {} full at y={:.2} (needs {:.2}, {:.2} left); continuing on page {}",
            cursor.page_index + 1,
            cursor.y,
            height,
            analysis.remaining_height,
            cursor.page_index + 2
        );
        let placement = self.break_page(cursor, doc);
        Ok(match continued_title {
            Some(title) => {
                let marker = self.place_continuation_marker(placement.cursor, title);
                placement.then(marker)
            }
            None => placement,
        })
    }

    fn place_continuation_marker(&self, cursor: LayoutCursor, title: &str) -> Placement {
        let config = self.config;
        let size = config.description_font_size;
        let mut placement = Placement::at(cursor.moved_down(config.description_line_height));
        placement.push(cursor.page_index, DrawCommand::meta(meta::CONTINUED, title));
        placement.push(
            cursor.page_index,
            DrawCommand::text(
                self.geometry.text_x,
                painting::baseline(cursor.y, config.description_line_height, size),
                format!("{} (continued)", title),
                FontRole::Regular,
                size,
                MUTED,
            ),
        );
        placement
    }

    /// Space-checks one line of `line_height`, then draws it with `draw`,
    /// which receives the line's top edge.
    fn place_line<F>(
        &self,
        placement: Placement,
        line_height: f32,
        doc: &InvoiceDocument,
        continued_title: Option<&str>,
        draw: F,
    ) -> Result<Placement, LayoutError>
    where
        F: FnOnce(f32) -> Vec<DrawCommand>,
    {
        let step = self.ensure_space(placement.cursor, line_height, doc, continued_title)?;
        let mut placement = placement.then(step);
        let cursor = placement.cursor;
        placement.push_all(cursor.page_index, draw(cursor.y));
        Ok(placement.with_cursor(cursor.moved_down(line_height)))
    }

    /// One line item: wrapped title with the amount on its first line,
    /// description, bullet details, then a separator. Every line is checked
    /// individually, so an item may split across pages at any line.
    pub fn place_line_item(
        &self,
        cursor: LayoutCursor,
        item: &LineItem,
        doc: &InvoiceDocument,
    ) -> Result<Placement, LayoutError> {
        let config = self.config;
        let geometry = &self.geometry;
        let ctx = self.paint_context();
        let bold = self.fonts.face(FontRole::Bold);
        let regular = self.fonts.face(FontRole::Regular);
        let continued = config.continuation_marker.then_some(item.title.as_str());

        let mut title_lines = wrap(&item.title, geometry.description_width, bold, config.title_font_size);
        if title_lines.is_empty() {
            title_lines.push(String::new());
        }

        let mut placement = Placement::at(cursor);
        for (index, line) in title_lines.into_iter().enumerate() {
            let size = config.title_font_size;
            let marker = if index == 0 { None } else { continued };
            placement = self.place_line(placement, config.title_line_height, doc, marker, |top| {
                let baseline = painting::baseline(top, config.title_line_height, size);
                let mut commands = vec![DrawCommand::text(geometry.text_x, baseline, line, FontRole::Bold, size, INK)];
                if index == 0 {
                    commands.push(ctx.right_aligned(
                        geometry.amount_right,
                        baseline,
                        format_money(item.amount, &doc.currency_code),
                        FontRole::Bold,
                        size,
                        INK,
                    ));
                }
                commands
            })?;
        }

        if let Some(description) = &item.description {
            let size = config.description_font_size;
            for line in wrap(description, geometry.description_width, regular, size) {
                placement = self.place_line(placement, config.description_line_height, doc, continued, |top| {
                    let baseline = painting::baseline(top, config.description_line_height, size);
                    vec![DrawCommand::text(geometry.text_x, baseline, line, FontRole::Regular, size, MUTED)]
                })?;
            }
        }

        let detail_width = geometry.description_width - config.detail_indent;
        for detail in &item.details {
            let size = config.detail_font_size;
            for (index, line) in wrap(detail, detail_width, regular, size).into_iter().enumerate() {
                placement = self.place_line(placement, config.detail_line_height, doc, continued, |top| {
                    let baseline = painting::baseline(top, config.detail_line_height, size);
                    let mut commands = Vec::with_capacity(2);
                    if index == 0 {
                        commands.push(DrawCommand::text(geometry.text_x, baseline, BULLET, FontRole::Regular, size, INK));
                    }
                    commands.push(DrawCommand::text(
                        geometry.text_x + config.detail_indent,
                        baseline,
                        line,
                        FontRole::Regular,
                        size,
                        INK,
                    ));
                    commands
                })?;
            }
        }

        self.place_line(placement, config.item_padding, doc, None, |top| {
            let y = top - config.item_padding / 2.0;
            vec![DrawCommand::hline(geometry.content_left, geometry.content_right, y, 0.5, RULE)]
        })
    }

    /// Totals box, plus the PAID stamp on the same page when the invoice is
    /// paid.
    pub fn place_totals(&self, cursor: LayoutCursor, doc: &InvoiceDocument) -> Result<Placement, LayoutError> {
        let ctx = self.paint_context();
        let reserved = totals::reserved_height(doc);
        let step = self.ensure_space(cursor, TOTALS_GAP + reserved, doc, None)?;
        let mut placement = Placement::at(cursor).then(step);
        let at = placement.cursor;
        let top = at.y - TOTALS_GAP;

        placement.push_all(at.page_index, totals::totals_commands(&ctx, doc, top));
        if doc.is_paid {
            placement.push_all(at.page_index, totals::paid_stamp_commands(&ctx, doc, top));
        }
        Ok(placement.with_cursor(LayoutCursor::new(at.page_index, top - reserved)))
    }

    pub fn place_notes(
        &self,
        cursor: LayoutCursor,
        notes: &str,
        doc: &InvoiceDocument,
    ) -> Result<Placement, LayoutError> {
        let geometry = &self.geometry;
        let mut placement = Placement::at(cursor.moved_down(NOTES_GAP));
        placement = self.place_line(placement, NOTES_LINE_HEIGHT + 1.0, doc, None, |top| {
            let baseline = painting::baseline(top, NOTES_LINE_HEIGHT + 1.0, NOTES_LABEL_SIZE);
            vec![DrawCommand::text(geometry.content_left, baseline, "NOTES", FontRole::Bold, NOTES_LABEL_SIZE, MUTED)]
        })?;

        let regular = self.fonts.face(FontRole::Regular);
        for line in wrap(notes, geometry.content_width(), regular, NOTES_FONT_SIZE) {
            placement = self.place_line(placement, NOTES_LINE_HEIGHT, doc, None, |top| {
                let baseline = painting::baseline(top, NOTES_LINE_HEIGHT, NOTES_FONT_SIZE);
                vec![DrawCommand::text(geometry.content_left, baseline, line, FontRole::Regular, NOTES_FONT_SIZE, INK)]
            })?;
        }
        Ok(placement)
    }

    pub fn place_footer(&self, cursor: LayoutCursor, doc: &InvoiceDocument) -> Placement {
        let ctx = self.paint_context();
        let mut placement = Placement::at(cursor);
        placement.push_all(
            cursor.page_index,
            chrome::footer_commands(&ctx, cursor.page_index, &doc.invoice_number),
        );
        placement
    }
}

fn commit(canvas: &mut Canvas, placement: Placement) -> LayoutCursor {
    canvas.apply(placement.commands);
    placement.cursor
}
