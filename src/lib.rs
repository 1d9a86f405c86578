//! # ledgerprint
//!
//! Paginated invoice PDF engine. This crate is the public facade over the
//! workspace crates, plus:
//! - [`InvoiceService`]: async and batch rendering over a shared generator
//! - [`cli`]: the `ledgerprint` command-line front end
//!
//! ```ignore
//! let generator = ledgerprint::InvoiceGenerator::builder().build()?;
//! let pdf = generator.render_json(&invoice_json)?;
//! ```

pub mod cli;
pub mod service;

pub use service::InvoiceService;

pub use ledgerprint_core::{
    AddressInput, GeneratorConfig, InvoiceGenerator, InvoiceGeneratorBuilder, InvoiceInput,
    InvoiceMetadata, LegacyInvoiceInput, LineItemInput, ModernInvoiceInput, Normalizer,
    PipelineError, TotalsInput, TransactionId, TransactionInput, ValidationError, assets,
    normalize,
};
pub use ledgerprint_layout::{
    Canvas, DrawCommand, FontLibrary, ImageResource, LayoutConfig, LayoutEngine, LayoutError, Page,
    canvas::meta,
};
pub use ledgerprint_render_core::{DocumentInfo, DocumentRenderer, RenderError, serialize_canvas};
pub use ledgerprint_render_lopdf::{LopdfRenderer, render_canvas_to_vec};
pub use ledgerprint_resource::FilesystemResourceProvider;
pub use ledgerprint_traits::{InMemoryResourceProvider, ResourceError, ResourceProvider};
pub use ledgerprint_types::{Color, InvoiceDocument, LineItem, PageSize, Rect, Size, Totals};
