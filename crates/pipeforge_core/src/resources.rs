//! Resource directory management.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{GenerationError, GenerationResult};

/// Creates the subdirectory that holds pipeline documents.
#[derive(Debug, Clone)]
pub struct ResourcePaths {
    resources_path: String,
}

impl ResourcePaths {
    pub fn new(resources_path: impl Into<String>) -> Self {
        Self {
            resources_path: resources_path.into(),
        }
    }

    /// Where the resource directory lives under `base`.
    pub fn resolve(&self, base: &Path) -> PathBuf {
        base.join(&self.resources_path)
    }

    /// Create `base/<resources_path>`, including missing parents.
    ///
    /// The directory itself must not exist yet: a second call for the same
    /// base fails rather than silently reusing it.
    pub fn ensure_resource_dir(&self, base: &Path) -> GenerationResult<PathBuf> {
        let path = self.resolve(base);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| GenerationError::DirectoryCreation {
                path: path.clone(),
                reason: e.to_string(),
            })?;
        }

        fs::create_dir(&path).map_err(|e| GenerationError::DirectoryCreation {
            path: path.clone(),
            reason: match e.kind() {
                ErrorKind::AlreadyExists => "already exists".to_string(),
                _ => e.to_string(),
            },
        })?;

        info!("Created resource directory {:?}", path);
        Ok(path)
    }
}
