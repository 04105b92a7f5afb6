//! Artifact generators.
//!
//! Each generator renders one file and writes it under a target directory.
//! Generators are independent: a failed write is reported but earlier
//! writes are left in place.

mod compose;
mod environment;
mod makefile;
mod pipeline;

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use crate::config::ProjectSpec;
use crate::error::{GenerationError, GenerationResult};

pub use compose::{ComposeOverlayGenerator, COMPOSE_FILE_NAME, COMPOSE_OVERLAY};
pub use environment::EnvironmentGenerator;
pub use makefile::{MakefileGenerator, MAKEFILE_NAME};
pub use pipeline::PipelineGenerator;

/// The kinds of file a run produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ArtifactKind {
    Makefile,
    ComposeOverlay,
    EnvironmentDefinition,
    PipelineDefinition,
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ArtifactKind::Makefile => "Makefile",
            ArtifactKind::ComposeOverlay => "compose overlay",
            ArtifactKind::EnvironmentDefinition => "environment definition",
            ArtifactKind::PipelineDefinition => "pipeline definition",
        };
        write!(f, "{}", name)
    }
}

/// A file written by a generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedArtifact {
    pub kind: ArtifactKind,
    pub path: PathBuf,
    pub bytes: usize,
    /// Non-fatal issues noticed while generating
    pub warnings: Vec<String>,
}

impl GeneratedArtifact {
    pub fn with_warnings(mut self, warnings: Vec<String>) -> Self {
        self.warnings = warnings;
        self
    }
}

/// One routine that produces one artifact.
pub trait ArtifactGenerator {
    fn kind(&self) -> ArtifactKind;

    /// Render the artifact for `project` and write it under `target_dir`.
    fn generate(&self, project: &ProjectSpec, target_dir: &Path) -> GenerationResult<GeneratedArtifact>;
}

/// Write `content` to `path`, overwriting any previous file.
pub(crate) fn write_artifact(kind: ArtifactKind, path: PathBuf, content: &str) -> GenerationResult<GeneratedArtifact> {
    fs::write(&path, content).map_err(|source| GenerationError::FileWrite {
        artifact: kind,
        path: path.clone(),
        source,
    })?;

    debug!("Wrote {} to {:?} ({} bytes)", kind, path, content.len());
    Ok(GeneratedArtifact {
        kind,
        path,
        bytes: content.len(),
        warnings: Vec::new(),
    })
}
