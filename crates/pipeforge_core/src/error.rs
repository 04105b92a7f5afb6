//! Error types for the core module.

use std::path::PathBuf;

use pipeforge_templates::TemplateError;
use thiserror::Error;

use crate::engine::GenerationStep;
use crate::generators::ArtifactKind;

/// Result type alias for generation operations.
pub type GenerationResult<T> = Result<T, GenerationError>;

/// Errors that can occur while generating artifacts.
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Template error: {0}")]
    Template(#[from] TemplateError),

    #[error("Failed to create resource directory {path:?}: {reason}")]
    DirectoryCreation { path: PathBuf, reason: String },

    #[error("Failed to write {artifact} to {path:?}: {source}")]
    FileWrite {
        artifact: ArtifactKind,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Step '{step}' failed: {source}")]
    Step {
        step: GenerationStep,
        #[source]
        source: Box<GenerationError>,
    },

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl GenerationError {
    /// The step a run stopped at, if this error came out of the orchestrator.
    pub fn step(&self) -> Option<GenerationStep> {
        match self {
            GenerationError::Step { step, .. } => Some(*step),
            _ => None,
        }
    }

    /// The underlying error with any step wrapper removed.
    pub fn root(&self) -> &GenerationError {
        match self {
            GenerationError::Step { source, .. } => source.root(),
            other => other,
        }
    }

    /// Whether the error was caused by bad configuration rather than I/O.
    pub fn is_configuration(&self) -> bool {
        match self.root() {
            GenerationError::Configuration(_)
            | GenerationError::Yaml(_) => true,
            GenerationError::Template(e) => e.is_configuration(),
            _ => false,
        }
    }
}
