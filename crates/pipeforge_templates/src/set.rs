//! The named templates a generation run depends on.

use serde::{Deserialize, Serialize};

/// Default file name of the pipeline-definition template.
pub const DEFAULT_PIPELINE_TEMPLATE: &str = "pipeline.gopipeline.json.template";

/// Default file name of the environment-definition template.
pub const DEFAULT_ENVIRONMENT_TEMPLATE: &str = "environment.goenvironment.json.template";

/// Template names resolved once per run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateSet {
    /// Template rendered into `<pipeline>.gopipeline.json`
    pub pipeline_template: String,
    /// Template rendered into `<env>.goenvironment.json`
    pub environment_template: String,
}

impl Default for TemplateSet {
    fn default() -> Self {
        Self {
            pipeline_template: DEFAULT_PIPELINE_TEMPLATE.to_string(),
            environment_template: DEFAULT_ENVIRONMENT_TEMPLATE.to_string(),
        }
    }
}

impl TemplateSet {
    pub fn new(pipeline_template: impl Into<String>, environment_template: impl Into<String>) -> Self {
        Self {
            pipeline_template: pipeline_template.into(),
            environment_template: environment_template.into(),
        }
    }

    /// Both template names, pipeline first.
    pub fn names(&self) -> [&str; 2] {
        [&self.pipeline_template, &self.environment_template]
    }
}
