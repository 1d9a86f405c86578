use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    #[error("Element has a height of {0:.2} which exceeds the available page content height of {1:.2}.")]
    ElementTooLarge(f32, f32),
    #[error("Invalid layout configuration: {0}")]
    InvalidConfiguration(String),
}

pub mod algorithms;
pub mod canvas;
pub mod config;
pub mod cursor;
pub mod engine;
pub mod fonts;
pub mod painting;
pub mod text;

pub use self::canvas::{Canvas, DrawCommand, ImageResource, Page};
pub use self::config::{LayoutConfig, PageGeometry};
pub use self::cursor::{LayoutCursor, PlacedCommand, Placement};
pub use self::engine::LayoutEngine;
pub use self::fonts::{FontError, FontFace, FontLibrary, FontMetrics, FontRole};

#[cfg(test)]
mod test_utils;
