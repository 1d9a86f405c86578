//! Asset loading seam.
//!
//! Invoice generation needs a handful of binary assets (a brand logo, optional
//! TrueType faces). Where they come from is the embedding application's
//! business; the generator only sees a `ResourceProvider`.

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ResourceError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Failed to load resource '{path}': {message}")]
    LoadFailed { path: String, message: String },

    #[error("Invalid resource format: {0}")]
    InvalidFormat(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for ResourceError {
    fn from(err: std::io::Error) -> Self {
        ResourceError::Io(err.to_string())
    }
}

/// Reference-counted asset bytes.
pub type SharedResourceData = Arc<Vec<u8>>;

/// Loads invoice assets by path.
///
/// Implementations must be shareable across threads: one generator serves
/// many concurrent renders.
pub trait ResourceProvider: Send + Sync + Debug {
    fn load(&self, path: &str) -> Result<SharedResourceData, ResourceError>;

    /// Cheap presence check; callers use it to tell a missing asset from
    /// one that fails to load.
    fn exists(&self, path: &str) -> bool;

    /// Provider name, used in log lines.
    fn name(&self) -> &'static str;
}

/// A provider backed by a map of pre-registered assets.
///
/// Useful for tests and for applications that keep their brand assets
/// compiled into the binary.
#[derive(Debug, Default, Clone)]
pub struct InMemoryResourceProvider {
    resources: HashMap<String, SharedResourceData>,
}

impl InMemoryResourceProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `data` under `path`, replacing any earlier entry.
    pub fn with_resource(mut self, path: impl Into<String>, data: Vec<u8>) -> Self {
        self.resources.insert(path.into(), Arc::new(data));
        self
    }
}

impl ResourceProvider for InMemoryResourceProvider {
    fn load(&self, path: &str) -> Result<SharedResourceData, ResourceError> {
        self.resources
            .get(path)
            .cloned()
            .ok_or_else(|| ResourceError::NotFound(path.to_string()))
    }

    fn exists(&self, path: &str) -> bool {
        self.resources.contains_key(path)
    }

    fn name(&self) -> &'static str {
        "InMemoryResourceProvider"
    }
}
