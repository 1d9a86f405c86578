//! # ledgerprint-core
//!
//! Integration layer of the invoice engine:
//! - **input**: the legacy and modern invoice shapes accepted from callers
//! - **normalize**: conversion into the canonical `InvoiceDocument`
//! - **assets**: logo and font loading through a `ResourceProvider`
//! - **generator**: `InvoiceGenerator`, which runs the whole pipeline
//! - **error**: `ValidationError` and `PipelineError`

// Re-export foundation crates
pub use ledgerprint_layout as layout;
pub use ledgerprint_traits as traits;
pub use ledgerprint_types as types;

pub mod assets;
pub mod error;
pub mod generator;
pub mod input;
pub mod normalize;

pub use error::{PipelineError, ValidationError};
pub use generator::{GeneratorConfig, InvoiceGenerator, InvoiceGeneratorBuilder};
pub use input::{
    AddressInput, InvoiceInput, InvoiceMetadata, LegacyInvoiceInput, LineItemInput,
    ModernInvoiceInput, TotalsInput, TransactionId, TransactionInput,
};
pub use normalize::{Normalizer, normalize};

pub use ledgerprint_layout::{Canvas, FontLibrary, ImageResource, LayoutConfig};
pub use ledgerprint_traits::{InMemoryResourceProvider, ResourceError, ResourceProvider};
pub use ledgerprint_types::{InvoiceDocument, LineItem, Totals};
