//! # pipeforge_templates
//!
//! Template loading and rendering for pipeforge.
//!
//! Templates are plain files in a single directory, compiled once per run with
//! [tera](https://keats.github.io/tera/). The pipeline and environment
//! definitions are both produced from templates in this directory.
//!
//! ## Example
//!
//! ```rust,no_run
//! use pipeforge_templates::{Context, TemplateLoader, TemplateSet};
//!
//! let set = TemplateSet::default();
//! let registry = TemplateLoader::new("templates").load_set(&set).unwrap();
//!
//! let mut vars = Context::new();
//! vars.insert("used_env", "json-env");
//! vars.insert("pipeline_name", "checkout-service");
//!
//! let json = registry.render_named(&set.environment_template, &vars).unwrap();
//! ```

pub mod error;
pub mod loader;
pub mod renderer;
pub mod set;

pub use error::{TemplateError, TemplateResult};
pub use loader::{TemplateLoader, TEMPLATE_SUFFIX};
pub use renderer::{jsonify, CompiledTemplate, TemplateRegistry};
pub use set::{TemplateSet, DEFAULT_ENVIRONMENT_TEMPLATE, DEFAULT_PIPELINE_TEMPLATE};
pub use tera::Context;
