//! Page-addressed drawing surface produced by layout.
//!
//! The canvas holds plain draw commands in PDF user space. It knows nothing
//! about PDF syntax; the serializer turns each page into a content stream.

use crate::cursor::PlacedCommand;
use crate::fonts::FontRole;
use ledgerprint_types::{Color, Rect, Size};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Keys of the non-rendered `Meta` commands each region emits.
pub mod meta {
    pub const HEADER: &str = "header";
    pub const FOOTER: &str = "footer";
    pub const COLUMN_HEADER: &str = "column-header";
    pub const TOTALS: &str = "totals";
    pub const PAID_STAMP: &str = "paid-stamp";
    pub const LOGO: &str = "logo";
    pub const CONTINUED: &str = "continued";
}

/// Decoded 8-bit RGB raster.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageResource {
    pub width: u32,
    pub height: u32,
    pub rgb: Arc<Vec<u8>>,
}

impl ImageResource {
    pub fn size(&self) -> Size {
        Size::new(self.width as f32, self.height as f32)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Non-empty, with exactly `width * height * 3` bytes of pixel data.
    pub fn is_drawable(&self) -> bool {
        !self.is_empty() && self.rgb.len() == self.width as usize * self.height as usize * 3
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// `y` is the baseline; `rotation` is in degrees, counter-clockwise
    /// around the text origin.
    Text {
        x: f32,
        y: f32,
        text: String,
        font: FontRole,
        size: f32,
        color: Color,
        rotation: f32,
    },
    Rect {
        rect: Rect,
        fill: Option<Color>,
        stroke: Option<Color>,
    },
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        width: f32,
        color: Color,
    },
    Image {
        rect: Rect,
        resource_id: String,
    },
    // Non-rendered annotation for page-aware inspection. Ignored by the serializer.
    Meta {
        key: String,
        value: String,
    },
}

impl DrawCommand {
    pub fn text(x: f32, y: f32, text: impl Into<String>, font: FontRole, size: f32, color: Color) -> Self {
        DrawCommand::Text {
            x,
            y,
            text: text.into(),
            font,
            size,
            color,
            rotation: 0.0,
        }
    }

    pub fn meta(key: &str, value: impl Into<String>) -> Self {
        DrawCommand::Meta {
            key: key.to_string(),
            value: value.into(),
        }
    }

    pub fn hline(x1: f32, x2: f32, y: f32, width: f32, color: Color) -> Self {
        DrawCommand::Line {
            x1,
            y1: y,
            x2,
            y2: y,
            width,
            color,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub commands: Vec<DrawCommand>,
}

impl Page {
    /// Values of every `Meta` command with the given key, in draw order.
    pub fn meta_values<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.commands.iter().filter_map(move |command| match command {
            DrawCommand::Meta { key: k, value } if k == key => Some(value.as_str()),
            _ => None,
        })
    }

    pub fn has_meta(&self, key: &str) -> bool {
        self.meta_values(key).next().is_some()
    }

    /// Text runs in draw order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    page_size: Size,
    pages: Vec<Page>,
    images: BTreeMap<String, ImageResource>,
}

impl Canvas {
    pub fn new(page_size: Size) -> Self {
        Self {
            page_size,
            pages: Vec::new(),
            images: BTreeMap::new(),
        }
    }

    /// Appends commands to their target pages, creating pages as needed.
    pub fn apply(&mut self, commands: Vec<PlacedCommand>) {
        for placed in commands {
            if placed.page_index >= self.pages.len() {
                self.pages.resize_with(placed.page_index + 1, Page::default);
            }
            self.pages[placed.page_index].commands.push(placed.command);
        }
    }

    pub fn register_image(&mut self, id: impl Into<String>, image: ImageResource) {
        self.images.insert(id.into(), image);
    }

    pub fn page_size(&self) -> Size {
        self.page_size
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn images(&self) -> &BTreeMap<String, ImageResource> {
        &self.images
    }
}
