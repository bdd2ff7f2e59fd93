//! Manifest loading service
//!
//! Reads a manifest file and builds the bundle hierarchy it describes.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::{Catalog, Manifest};
use crate::infrastructure::traits::FileSystem;

/// Service for turning manifest files into catalogs.
pub struct ManifestService {
    fs: Arc<dyn FileSystem>,
}

impl ManifestService {
    /// Create a new manifest service.
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    /// Parse a manifest file without building it.
    #[instrument(level = "debug", skip(self))]
    pub fn read(&self, path: &Path) -> ApplicationResult<Manifest> {
        let problem = if !self.fs.exists(path) {
            Some("file not found")
        } else if !self.fs.is_file(path) {
            Some("not a file")
        } else {
            None
        };
        if let Some(message) = problem {
            return Err(ApplicationError::ManifestNotFound {
                path: path.to_path_buf(),
                message: message.to_string(),
            });
        }
        let content = self
            .fs
            .read_to_string(path)
            .with_path_context("read manifest", path)?;

        Manifest::parse(&content).map_err(|e| ApplicationError::Manifest {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Load a manifest file and build its catalog.
    pub fn load(&self, path: &Path) -> ApplicationResult<Catalog> {
        let manifest = self.read(path)?;
        debug!(
            "load: {} products, {} bundles",
            manifest.products.len(),
            manifest.bundles.len()
        );
        Ok(Catalog::from_manifest(&manifest)?)
    }
}
