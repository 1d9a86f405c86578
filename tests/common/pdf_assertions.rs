use ledgerprint::{Canvas, DrawCommand, meta};
use lopdf::Document as LopdfDocument;
use std::collections::BTreeSet;

/// Extract all text content from a PDF document
pub fn extract_text(doc: &LopdfDocument) -> String {
    let mut text = String::new();
    let pages = doc.get_pages();
    for page_num in 1..=pages.len() {
        if let Ok(page_text) = doc.extract_text(&[page_num as u32]) {
            text.push_str(&page_text);
            text.push('\n');
        }
    }
    text
}

/// `BaseFont` names of every font dictionary in the file.
pub fn extract_font_names(doc: &LopdfDocument) -> BTreeSet<String> {
    let mut fonts = BTreeSet::new();
    let mut collect = |dict: &lopdf::Dictionary| {
        let is_font = dict
            .get(b"Type")
            .and_then(|t| t.as_name())
            .map(|name| name == b"Font")
            .unwrap_or(false);
        if let (true, Ok(base)) = (is_font, dict.get(b"BaseFont").and_then(|b| b.as_name())) {
            fonts.insert(String::from_utf8_lossy(base).to_string());
        }
    };
    for object in doc.objects.values() {
        if let Ok(dict) = object.as_dict() {
            collect(dict);
            if let Ok(Ok(font_dict)) = dict.get(b"Font").map(|f| f.as_dict()) {
                for (_, value) in font_dict.iter() {
                    if let Ok(inner) = value.as_dict() {
                        collect(inner);
                    }
                }
            }
        }
    }
    fonts
}

/// Number of `Meta` commands with `key` on each page.
pub fn meta_counts(canvas: &Canvas, key: &str) -> Vec<usize> {
    canvas
        .pages()
        .iter()
        .map(|page| page.meta_values(key).count())
        .collect()
}

/// Index of the page carrying the `Meta` command `key`, if exactly one does.
pub fn page_with_meta(canvas: &Canvas, key: &str) -> Option<usize> {
    let pages: Vec<usize> = canvas
        .pages()
        .iter()
        .enumerate()
        .filter(|(_, page)| page.has_meta(key))
        .map(|(i, _)| i)
        .collect();
    match pages.as_slice() {
        [single] => Some(*single),
        _ => None,
    }
}

pub fn has_image(canvas: &Canvas) -> bool {
    canvas
        .pages()
        .iter()
        .flat_map(|page| page.commands.iter())
        .any(|command| matches!(command, DrawCommand::Image { .. }))
}

/// Asserts the footer/column-header invariants on every page.
pub fn assert_page_chrome(canvas: &Canvas) {
    for (index, page) in canvas.pages().iter().enumerate() {
        let footers: Vec<&str> = page.meta_values(meta::FOOTER).collect();
        assert_eq!(footers, vec![(index + 1).to_string()], "footer on page {}", index + 1);
        assert_eq!(
            page.meta_values(meta::COLUMN_HEADER).count(),
            1,
            "column header on page {}",
            index + 1
        );
    }
}
