use crate::error::RenderError;
use ledgerprint_layout::{ImageResource, Page};
use ledgerprint_types::Size;
use lopdf::ObjectId;
use std::collections::BTreeMap;
use std::io::{Seek, Write};

/// Document-level metadata written into the PDF Info dictionary.
///
/// Deliberately carries no timestamps: identical input must produce
/// identical bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentInfo {
    pub title: String,
    pub producer: String,
}

impl DocumentInfo {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            producer: concat!("ledgerprint ", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// A trait for document renderers, abstracting the PDF-writing primitives.
///
/// Calls arrive in a fixed order: `begin_document`, `add_images`, one
/// `render_page` per page, then `finish`.
pub trait DocumentRenderer<W: Write + Seek> {
    fn begin_document(&mut self, writer: W, info: &DocumentInfo) -> Result<(), RenderError>;

    fn add_images(&mut self, images: &BTreeMap<String, ImageResource>) -> Result<(), RenderError>;

    fn render_page(&mut self, page: &Page, page_size: Size) -> Result<ObjectId, RenderError>;

    fn finish(self: Box<Self>) -> Result<W, RenderError>;
}
