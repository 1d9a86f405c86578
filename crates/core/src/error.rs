//! Error types for the invoice pipeline.

use ledgerprint_layout::LayoutError;
use ledgerprint_render_core::RenderError;
use thiserror::Error;

/// Rejections raised by the normalizer before any layout happens.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Invoice has no line items")]
    EmptyLineItems,
    #[error("Line item {index} ('{title}') has a non-finite amount")]
    NonFiniteAmount { index: usize, title: String },
    #[error("Totals field '{field}' is not a finite number")]
    NonFiniteTotal { field: &'static str },
    #[error("Invoice has no currency code")]
    MissingCurrency,
}

/// The main error enum for all high-level operations.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),
    #[error("Rendering error: {0}")]
    Render(#[from] RenderError),
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Configuration error: {0}")]
    Config(String),
}
