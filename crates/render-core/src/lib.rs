//! Rendering abstractions for PDF generation.
//!
//! - `DocumentRenderer` trait implemented by PDF backends
//! - `serialize_canvas`, which drives a renderer over a laid-out canvas
//! - `RenderError`

mod error;
mod serialize;
mod traits;

pub use error::RenderError;
pub use serialize::serialize_canvas;
pub use traits::{DocumentInfo, DocumentRenderer};
