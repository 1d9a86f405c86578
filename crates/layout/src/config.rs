use ledgerprint_types::{Color, PageSize};
use serde::{Deserialize, Serialize};

/// Page geometry, typography and branding for invoice layout.
///
/// All distances are in PostScript points. Every field has a default, so a
/// partial JSON object is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutConfig {
    pub page_size: PageSize,
    /// Left and right page margin.
    pub margin_x: f32,
    /// Distance from the page top to the column header on continuation pages.
    pub margin_top: f32,
    /// Height of the first-page header region, measured from the page top.
    /// The column header starts directly below it.
    pub header_height: f32,
    /// Height of the accent band at the very top of the first page.
    pub header_band_height: f32,
    /// Reserved strip at the bottom of every page for the footer.
    pub footer_height: f32,
    /// Extra clearance kept above the footer. Content never descends below
    /// `footer_height + safety_margin`.
    pub safety_margin: f32,
    pub column_header_height: f32,
    pub amount_column_width: f32,

    pub title_font_size: f32,
    pub title_line_height: f32,
    pub description_font_size: f32,
    pub description_line_height: f32,
    pub detail_font_size: f32,
    pub detail_line_height: f32,
    /// Horizontal offset of detail text from the bullet glyph.
    pub detail_indent: f32,
    /// Vertical space taken by the separator after each line item.
    pub item_padding: f32,

    pub accent_color: Color,
    pub paid_color: Color,
    /// Printed in the header band when no logo is available.
    pub company_name: String,
    pub company_address: Vec<String>,
    pub footer_note: Option<String>,
    /// Counterparty address lines beyond this are dropped from the header.
    pub max_address_lines: usize,
    /// Mark line items that continue onto a new page with a
    /// `"{title} (continued)"` line under the column header.
    pub continuation_marker: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            page_size: PageSize::A4,
            margin_x: 50.0,
            margin_top: 40.0,
            header_height: 190.0,
            header_band_height: 72.0,
            footer_height: 50.0,
            safety_margin: 20.0,
            column_header_height: 22.0,
            amount_column_width: 110.0,
            title_font_size: 11.0,
            title_line_height: 15.0,
            description_font_size: 9.5,
            description_line_height: 13.0,
            detail_font_size: 9.0,
            detail_line_height: 12.5,
            detail_indent: 12.0,
            item_padding: 10.0,
            accent_color: Color::rgb(0x1f, 0x2a, 0x44),
            paid_color: Color::rgb(0xc0, 0x39, 0x2b),
            company_name: "Your Business".to_string(),
            company_address: Vec::new(),
            footer_note: None,
            max_address_lines: 4,
            continuation_marker: true,
        }
    }
}

/// Gap between the column header bar and the first content line.
pub(crate) const COLUMN_HEADER_GAP: f32 = 8.0;
/// Inner padding of table cells.
pub(crate) const CELL_PADDING: f32 = 8.0;

/// Derived page coordinates, computed once per layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub page_width: f32,
    pub page_height: f32,
    pub content_left: f32,
    pub content_right: f32,
    /// Left edge of line-item text.
    pub text_x: f32,
    /// Right edge that amounts are aligned against.
    pub amount_right: f32,
    pub description_width: f32,
    pub min_content_y: f32,
}

impl PageGeometry {
    pub fn from_config(config: &LayoutConfig) -> Self {
        let (page_width, page_height) = config.page_size.dimensions_pt();
        let content_left = config.margin_x;
        let content_right = page_width - config.margin_x;
        let content_width = content_right - content_left;
        Self {
            page_width,
            page_height,
            content_left,
            content_right,
            text_x: content_left + CELL_PADDING,
            amount_right: content_right - CELL_PADDING,
            description_width: content_width - config.amount_column_width - 2.0 * CELL_PADDING,
            min_content_y: config.footer_height + config.safety_margin,
        }
    }

    pub fn content_width(&self) -> f32 {
        self.content_right - self.content_left
    }

    /// Top edge of the column header bar on the given page.
    pub fn column_header_top(&self, page_index: usize, config: &LayoutConfig) -> f32 {
        if page_index == 0 {
            self.page_height - config.header_height
        } else {
            self.page_height - config.margin_top
        }
    }

    /// Cursor position for the first content line on the given page.
    pub fn content_top(&self, page_index: usize, config: &LayoutConfig) -> f32 {
        self.column_header_top(page_index, config) - config.column_header_height - COLUMN_HEADER_GAP
    }
}
