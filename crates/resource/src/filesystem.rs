//! Assets directory on the local filesystem.
//!
//! Every lookup is confined to the configured root: absolute paths and
//! paths that climb out of the root with `..` are refused.

use ledgerprint_traits::{ResourceError, ResourceProvider, SharedResourceData};
use log::debug;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

#[derive(Debug)]
pub struct FilesystemResourceProvider {
    root: PathBuf,
    canonical_root: Option<PathBuf>,
}

impl FilesystemResourceProvider {
    /// The root does not need to exist yet; containment is then checked
    /// lexically instead of against the canonical path.
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        let root = root.as_ref().to_path_buf();
        let canonical_root = root.canonicalize().ok();
        Self {
            root,
            canonical_root,
        }
    }

    fn resolve(&self, path: &str) -> Result<PathBuf, ResourceError> {
        let requested = Path::new(path);
        let escapes = requested.is_absolute()
            || requested
                .components()
                .any(|c| matches!(c, Component::ParentDir | Component::Prefix(_)));
        if escapes {
            debug!("Refusing asset path outside '{}': {}", self.root.display(), path);
            return Err(ResourceError::NotFound(format!(
                "{} (outside asset root)",
                path
            )));
        }

        let joined = self.root.join(requested);
        // Symlinks may still point elsewhere.
        if let (Ok(canonical), Some(root)) = (joined.canonicalize(), &self.canonical_root) {
            if !canonical.starts_with(root) {
                debug!("Asset '{}' resolves outside the asset root", path);
                return Err(ResourceError::NotFound(format!(
                    "{} (outside asset root)",
                    path
                )));
            }
            return Ok(canonical);
        }
        Ok(joined)
    }
}

impl ResourceProvider for FilesystemResourceProvider {
    fn load(&self, path: &str) -> Result<SharedResourceData, ResourceError> {
        let full_path = self.resolve(path)?;
        debug!("Loading asset {}", full_path.display());
        std::fs::read(&full_path).map(Arc::new).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ResourceError::NotFound(path.to_string())
            } else {
                ResourceError::LoadFailed {
                    path: path.to_string(),
                    message: e.to_string(),
                }
            }
        })
    }

    fn exists(&self, path: &str) -> bool {
        self.resolve(path).map(|p| p.is_file()).unwrap_or(false)
    }

    fn name(&self) -> &'static str {
        "FilesystemResourceProvider"
    }
}
