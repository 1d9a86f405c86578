//! Asset providers for invoice generation.
//!
//! - [`FilesystemResourceProvider`]: brand assets from a directory on disk
//! - [`InMemoryResourceProvider`]: re-exported from `ledgerprint-traits`

mod filesystem;

pub use filesystem::FilesystemResourceProvider;

pub use ledgerprint_traits::InMemoryResourceProvider;
