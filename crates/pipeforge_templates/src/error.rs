//! Error types for templates.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for template operations.
pub type TemplateResult<T> = Result<T, TemplateError>;

/// Errors that can occur while loading or rendering templates.
///
/// Every variant except `RenderingFailed` is a configuration problem: the
/// template set could not be brought up, so generation must not start.
#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("Templates directory not found: {0:?}")]
    DirectoryNotFound(PathBuf),

    #[error("Template not found: {name} (searched {dir:?})")]
    NotFound { name: String, dir: PathBuf },

    #[error("Invalid template {name}: {message}")]
    Invalid { name: String, message: String },

    #[error("Template not loaded: {0}")]
    NotLoaded(String),

    #[error("Template rendering failed for {name}: {message}")]
    RenderingFailed { name: String, message: String },
}

impl TemplateError {
    /// Whether this error happened while bringing the template set up, as
    /// opposed to while rendering an already compiled template.
    pub fn is_configuration(&self) -> bool {
        !matches!(self, TemplateError::RenderingFailed { .. })
    }
}

/// Flatten a tera error and its source chain into one line.
///
/// Tera reports the useful part (the parse position, the missing variable)
/// in nested sources, so the top-level message alone is rarely enough.
pub(crate) fn describe(err: &tera::Error) -> String {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(inner) = source {
        message.push_str(": ");
        message.push_str(&inner.to_string());
        source = inner.source();
    }
    message
}
