use crate::canvas::{Canvas, DrawCommand, Page};
use crate::config::LayoutConfig;
use crate::engine::LayoutEngine;
use crate::fonts::FontLibrary;
use ledgerprint_types::{InvoiceDocument, LineItem, Totals};

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A GBP invoice with `items` line items, each carrying a description and
/// `details` bullets. Item `i` is worth `(i + 1) * 10`.
pub fn sample_document(items: usize, details: usize) -> InvoiceDocument {
    let line_items: Vec<LineItem> = (0..items)
        .map(|i| {
            LineItem::new(format!("Item {}", i + 1), (i + 1) as f64 * 10.0)
                .with_description(format!("Description for item {}", i + 1))
                .with_details((0..details).map(|j| format!("Detail {} of item {}", j + 1, i + 1)))
        })
        .collect();
    let total = line_items.iter().map(|item| item.amount).sum();

    InvoiceDocument {
        client: "Acme Ltd".to_string(),
        counterparty_address_lines: vec!["1 Market Street".to_string(), "Leeds".to_string()],
        invoice_number: "INV-TEST-001".to_string(),
        issue_date: "01 March 2024".to_string(),
        currency_code: "GBP".to_string(),
        line_items,
        totals: Totals::total_only(total),
        is_paid: false,
        project_name: None,
        duration: None,
        notes: None,
    }
}

pub fn layout_with(config: &LayoutConfig, doc: &InvoiceDocument) -> Canvas {
    let fonts = FontLibrary::standard();
    LayoutEngine::new(&fonts, config)
        .layout(doc, None)
        .expect("layout succeeds")
}

pub fn layout_default(doc: &InvoiceDocument) -> Canvas {
    layout_with(&LayoutConfig::default(), doc)
}

pub fn meta_count(page: &Page, key: &str) -> usize {
    page.meta_values(key).count()
}

/// Index of the first page holding a text run equal to `content`.
pub fn page_with_text(canvas: &Canvas, content: &str) -> Option<usize> {
    canvas
        .pages()
        .iter()
        .position(|page| page.texts().any(|text| text == content))
}

/// Baselines of every unrotated text run on the page.
pub fn text_baselines(page: &Page) -> Vec<f32> {
    page.commands
        .iter()
        .filter_map(|command| match command {
            DrawCommand::Text { y, rotation, .. } if *rotation == 0.0 => Some(*y),
            _ => None,
        })
        .collect()
}
