//! Generator configuration and the validated project model.
//!
//! Defaults live in [`GeneratorConfig`]. A caller describes one project with
//! [`ProjectOverrides`], which is merged over the configuration into an
//! immutable [`ProjectSpec`]. All validation happens during that merge, so a
//! `ProjectSpec` that exists is always safe to generate from.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use pipeforge_notify::QueueConfig;
use pipeforge_templates::TemplateSet;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{GenerationError, GenerationResult};

/// Config file picked up from the current directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "pipeforge.yaml";

/// Stage names used when a project does not list its own.
pub const DEFAULT_STAGES: [&str; 4] = ["build", "deploy-dev", "deploy-staging", "deploy-production"];

/// Placeholder commands, index-aligned with [`DEFAULT_STAGES`].
pub const DEFAULT_COMMANDS: [&str; 4] = [
    r#"@echo "building nothing""#,
    r#"@echo "deploy-dev nothing""#,
    r#"@echo "deploy-staging nothing""#,
    r#"@echo "deploy-production nothing""#,
];

/// Characters GoCD accepts in a pipeline name.
const PIPELINE_NAME_PATTERN: &str = r"^[A-Za-z0-9_.\-]+$";

fn pipeline_name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(PIPELINE_NAME_PATTERN).expect("pipeline name pattern is valid"))
}

/// Settings shared by every generation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Directory holding the template documents
    pub templates_dir: PathBuf,
    /// Template names for the pipeline and environment documents
    pub templates: TemplateSet,
    /// Subdirectory of the working directory for pipeline documents
    pub resources_path: String,
    /// Name of the GoCD environment the pipeline joins
    pub used_env: String,
    /// Extension of the environment document
    pub environment_extension: String,
    /// Extension of the pipeline document
    pub pipeline_extension: String,
    /// Prefix for the pipeline's git material, `<base>/<pipeline>.git`
    pub git_base_url: String,
    /// Optional JSON file mapping teams to notification channels
    pub teams_file: Option<PathBuf>,
    /// Queue receiving the completion notice
    pub queue: QueueConfig,
    /// Default stage names
    pub stages: Vec<String>,
    /// Default stage commands, index-aligned with `stages`
    pub commands: Vec<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            templates_dir: PathBuf::from("templates"),
            templates: TemplateSet::default(),
            resources_path: "resources".to_string(),
            used_env: "json-env".to_string(),
            environment_extension: "goenvironment.json".to_string(),
            pipeline_extension: "gopipeline.json".to_string(),
            git_base_url: "git@github.com:vevo".to_string(),
            teams_file: None,
            queue: QueueConfig::default(),
            stages: DEFAULT_STAGES.iter().map(|s| s.to_string()).collect(),
            commands: DEFAULT_COMMANDS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl GeneratorConfig {
    /// Parse a YAML config. Missing keys keep their defaults.
    pub fn from_yaml_str(content: &str) -> GenerationResult<Self> {
        let config: GeneratorConfig = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a YAML config file.
    pub fn from_yaml_file(path: &Path) -> GenerationResult<Self> {
        debug!("Loading generator config from {:?}", path);
        let content = fs::read_to_string(path).map_err(|e| {
            GenerationError::Configuration(format!("cannot read config {:?}: {}", path, e))
        })?;
        Self::from_yaml_str(&content)
    }

    /// Load `path` if given, else `pipeforge.yaml` in `cwd` if present, else defaults.
    pub fn load(path: Option<&Path>, cwd: &Path) -> GenerationResult<Self> {
        match path {
            Some(path) => Self::from_yaml_file(path),
            None => {
                let candidate = cwd.join(DEFAULT_CONFIG_FILE);
                if candidate.is_file() {
                    info!("Using config file {:?}", candidate);
                    Self::from_yaml_file(&candidate)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Check the defaults are usable on their own.
    pub fn validate(&self) -> GenerationResult<()> {
        validate_stages(&self.stages, &self.commands)?;

        if self.resources_path.trim().is_empty() {
            return Err(GenerationError::Configuration(
                "resources_path must not be empty".to_string(),
            ));
        }
        if self.used_env.trim().is_empty() {
            return Err(GenerationError::Configuration(
                "used_env must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

fn validate_stages(stages: &[String], commands: &[String]) -> GenerationResult<()> {
    if stages.is_empty() {
        return Err(GenerationError::Configuration(
            "at least one stage is required".to_string(),
        ));
    }
    if stages.len() != commands.len() {
        return Err(GenerationError::Configuration(format!(
            "{} stage name(s) but {} stage command(s); each stage needs exactly one command",
            stages.len(),
            commands.len()
        )));
    }
    if let Some(bad) = stages.iter().find(|s| !pipeline_name_pattern().is_match(s)) {
        return Err(GenerationError::Configuration(format!(
            "invalid stage name '{}'",
            bad
        )));
    }
    Ok(())
}

/// Per-project inputs, merged over [`GeneratorConfig`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectOverrides {
    pub pipeline_name: String,
    pub team_name: String,
    pub working_directory: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stages: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commands: Option<Vec<String>>,
}

impl ProjectOverrides {
    pub fn new(
        pipeline_name: impl Into<String>,
        team_name: impl Into<String>,
        working_directory: impl Into<PathBuf>,
    ) -> Self {
        Self {
            pipeline_name: pipeline_name.into(),
            team_name: team_name.into(),
            working_directory: working_directory.into(),
            stages: None,
            commands: None,
        }
    }

    pub fn stages<I, S>(mut self, stages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.stages = Some(stages.into_iter().map(Into::into).collect());
        self
    }

    pub fn commands<I, S>(mut self, commands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.commands = Some(commands.into_iter().map(Into::into).collect());
        self
    }
}

/// A validated project, ready for generation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectSpec {
    pipeline_name: String,
    team_name: String,
    working_directory: PathBuf,
    stage_names: Vec<String>,
    stage_commands: Vec<String>,
}

impl ProjectSpec {
    /// Merge `overrides` over `config` and validate the result.
    ///
    /// Stages and commands each fall back to the configured defaults
    /// independently, and must end up the same length.
    pub fn resolve(config: &GeneratorConfig, overrides: ProjectOverrides) -> GenerationResult<Self> {
        let pipeline_name = overrides.pipeline_name;
        if pipeline_name.trim().is_empty() {
            return Err(GenerationError::Configuration(
                "pipeline name must not be empty".to_string(),
            ));
        }
        if !pipeline_name_pattern().is_match(&pipeline_name) {
            return Err(GenerationError::Configuration(format!(
                "invalid pipeline name '{}': only letters, digits, '_', '-' and '.' are allowed",
                pipeline_name
            )));
        }

        let stage_names = overrides.stages.unwrap_or_else(|| config.stages.clone());
        let stage_commands = overrides.commands.unwrap_or_else(|| config.commands.clone());
        validate_stages(&stage_names, &stage_commands)?;

        Ok(Self {
            pipeline_name,
            team_name: overrides.team_name.trim().to_string(),
            working_directory: overrides.working_directory,
            stage_names,
            stage_commands,
        })
    }

    pub fn pipeline_name(&self) -> &str {
        &self.pipeline_name
    }

    pub fn team_name(&self) -> &str {
        &self.team_name
    }

    pub fn working_directory(&self) -> &Path {
        &self.working_directory
    }

    pub fn stage_names(&self) -> &[String] {
        &self.stage_names
    }

    pub fn stage_commands(&self) -> &[String] {
        &self.stage_commands
    }

    /// `(name, command)` pairs in stage order.
    pub fn stages(&self) -> impl Iterator<Item = (&str, &str)> {
        self.stage_names
            .iter()
            .zip(&self.stage_commands)
            .map(|(name, command)| (name.as_str(), command.as_str()))
    }
}
