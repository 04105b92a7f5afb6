//! GoCD environment definition.

use std::path::Path;

use pipeforge_templates::{Context, TemplateRegistry};

use crate::config::{GeneratorConfig, ProjectSpec};
use crate::error::GenerationResult;
use crate::generators::{write_artifact, ArtifactGenerator, ArtifactKind, GeneratedArtifact};

/// Renders the environment template into `<used_env>.<extension>`.
pub struct EnvironmentGenerator<'a> {
    templates: &'a TemplateRegistry,
    config: &'a GeneratorConfig,
}

impl<'a> EnvironmentGenerator<'a> {
    pub fn new(templates: &'a TemplateRegistry, config: &'a GeneratorConfig) -> Self {
        Self { templates, config }
    }

    pub fn file_name(&self) -> String {
        format!("{}.{}", self.config.used_env, self.config.environment_extension)
    }

    /// Pure rendering: the output depends only on the template, `used_env`
    /// and `pipeline_name`.
    pub fn render(&self, pipeline_name: &str) -> GenerationResult<String> {
        let mut vars = Context::new();
        vars.insert("used_env", &self.config.used_env);
        vars.insert("pipeline_name", pipeline_name);

        Ok(self
            .templates
            .render_named(&self.config.templates.environment_template, &vars)?)
    }
}

impl ArtifactGenerator for EnvironmentGenerator<'_> {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::EnvironmentDefinition
    }

    fn generate(&self, project: &ProjectSpec, target_dir: &Path) -> GenerationResult<GeneratedArtifact> {
        let content = self.render(project.pipeline_name())?;
        write_artifact(self.kind(), target_dir.join(self.file_name()), &content)
    }
}
