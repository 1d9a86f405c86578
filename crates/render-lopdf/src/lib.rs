//! PDF serializer using lopdf.
//!
//! Content streams are built with `lopdf::content`; objects are buffered and
//! written in id order with a hand-built xref table so output is
//! byte-for-byte reproducible.

mod helpers;
mod renderer;
mod writer;

pub use helpers::{FONT_BOLD, FONT_REGULAR, deflate, page_content};
pub use renderer::{LopdfRenderer, render_canvas_to_vec};
pub use writer::StreamingPdfWriter;
