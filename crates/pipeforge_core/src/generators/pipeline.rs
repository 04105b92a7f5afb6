//! GoCD pipeline definition.

use std::path::Path;

use pipeforge_templates::{Context, TemplateRegistry};

use crate::config::{GeneratorConfig, ProjectSpec};
use crate::error::GenerationResult;
use crate::generators::{write_artifact, ArtifactGenerator, ArtifactKind, GeneratedArtifact};
use crate::teams::{TeamDirectory, TeamLookup};

/// Renders the pipeline template into `<pipeline_name>.<extension>`.
///
/// The owning team becomes the pipeline group, and its Slack channels are
/// exported as `SLACK_CHANNELS_SUCCESS` / `SLACK_CHANNELS_FAILURE` for the
/// compose overlay to pick up.
pub struct PipelineGenerator<'a> {
    templates: &'a TemplateRegistry,
    config: &'a GeneratorConfig,
    teams: &'a TeamDirectory,
}

impl<'a> PipelineGenerator<'a> {
    pub fn new(templates: &'a TemplateRegistry, config: &'a GeneratorConfig, teams: &'a TeamDirectory) -> Self {
        Self {
            templates,
            config,
            teams,
        }
    }

    pub fn file_name(&self, project: &ProjectSpec) -> String {
        format!("{}.{}", project.pipeline_name(), self.config.pipeline_extension)
    }

    pub fn git_url(&self, project: &ProjectSpec) -> String {
        format!(
            "{}/{}.git",
            self.config.git_base_url.trim_end_matches('/'),
            project.pipeline_name()
        )
    }

    /// Render the document, returning the team lookup it was built from.
    pub fn render(&self, project: &ProjectSpec) -> GenerationResult<(String, TeamLookup)> {
        let lookup = self.teams.lookup(project.team_name());

        let mut vars = Context::new();
        vars.insert("pipeline_name", project.pipeline_name());
        vars.insert("group", project.team_name());
        vars.insert("stages", project.stage_names());
        vars.insert("slack_channels_success", &lookup.success);
        vars.insert("slack_channels_failure", &lookup.failure);
        vars.insert("git_url", &self.git_url(project));

        let rendered = self
            .templates
            .render_named(&self.config.templates.pipeline_template, &vars)?;
        Ok((rendered, lookup))
    }
}

impl ArtifactGenerator for PipelineGenerator<'_> {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::PipelineDefinition
    }

    fn generate(&self, project: &ProjectSpec, target_dir: &Path) -> GenerationResult<GeneratedArtifact> {
        let (content, lookup) = self.render(project)?;
        let warnings = lookup.warnings.iter().map(ToString::to_string).collect();

        Ok(write_artifact(self.kind(), target_dir.join(self.file_name(project)), &content)?
            .with_warnings(warnings))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProjectOverrides;
    use crate::teams::TeamChannels;
    use pipeforge_templates::TemplateLoader;
    use std::fs;

    const PIPELINE: &str = r#"{"group": {{ group | jsonify }}, "stages": {{ stages | jsonify }}, "ok": {{ slack_channels_success | jsonify }}, "url": {{ git_url | jsonify }}}"#;

    fn registry(dir: &Path, config: &GeneratorConfig) -> TemplateRegistry {
        fs::write(dir.join(&config.templates.pipeline_template), PIPELINE).unwrap();
        fs::write(dir.join(&config.templates.environment_template), "{}").unwrap();
        TemplateLoader::new(dir).load_set(&config.templates).unwrap()
    }

    fn spec(config: &GeneratorConfig, team: &str) -> ProjectSpec {
        ProjectSpec::resolve(config, ProjectOverrides::new("checkout-service", team, "/tmp/w")).unwrap()
    }

    #[test]
    fn test_render_passes_group_stages_and_channels() {
        let temp = tempfile::tempdir().unwrap();
        let config = GeneratorConfig::default();
        let templates = registry(temp.path(), &config);
        let teams = TeamDirectory::empty().with_team("payments", TeamChannels::new(["#deploys"], ["#alerts"]));

        let (rendered, lookup) = PipelineGenerator::new(&templates, &config, &teams)
            .render(&spec(&config, "payments"))
            .unwrap();

        assert!(lookup.is_clean());
        let doc: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(doc["group"], "payments");
        assert_eq!(doc["stages"][3], "deploy-production");
        assert_eq!(doc["ok"][0], "#deploys");
        assert_eq!(doc["url"], "git@github.com:vevo/checkout-service.git");
    }

    #[test]
    fn test_generate_unknown_team_records_warning() {
        let temp = tempfile::tempdir().unwrap();
        let config = GeneratorConfig::default();
        let templates = registry(temp.path(), &config);
        let teams = TeamDirectory::empty();

        let artifact = PipelineGenerator::new(&templates, &config, &teams)
            .generate(&spec(&config, "ghost-team"), temp.path())
            .unwrap();

        assert_eq!(artifact.path, temp.path().join("checkout-service.gopipeline.json"));
        assert_eq!(artifact.warnings.len(), 1);
        assert!(artifact.warnings[0].contains("ghost-team"));
    }
}
