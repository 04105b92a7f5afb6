//! CLI command definitions.
//!
//! This module defines the command structure for the pipeforge CLI.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::debug;

use pipeforge_core::{GeneratorConfig, TeamDirectory};

pub mod check_templates;
pub mod generate;
pub mod team;

/// pipeforge - GoCD pipeline scaffolding
#[derive(Parser)]
#[command(name = "pipeforge")]
#[command(version, about = "pipeforge - generate GoCD pipeline artifacts for a project")]
#[command(long_about = r#"
pipeforge writes the files a GoCD pipeline needs for a project (Makefile,
docker-compose Slack overlay, pipeline and environment definitions) and then
announces the new pipeline on a message queue.

COMMANDS:
  generate         → Generate all artifacts and publish the completion notice
  check-templates  → Load and trial-render the configured templates
  team             → Show the Slack channels resolved for a team

EXIT CODES:
  0 - Success
  1 - General error
  2 - Invalid arguments
  3 - Configuration error
  4 - Template error
  5 - Filesystem error
"#)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Config file (defaults to ./pipeforge.yaml when present)
    #[arg(short, long, global = true, env = "PIPEFORGE_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate pipeline artifacts for a project
    Generate(generate::GenerateArgs),

    /// Verify the configured templates load and render
    #[command(name = "check-templates")]
    CheckTemplates(check_templates::CheckTemplatesArgs),

    /// Show notification channels for a team
    Team(team::TeamArgs),
}

/// Locations shared by every command.
#[derive(Args, Debug, Default)]
pub struct SourceArgs {
    /// Templates directory
    #[arg(long, env = "PIPEFORGE_TEMPLATES_DIR")]
    pub templates_dir: Option<PathBuf>,

    /// JSON file mapping teams to Slack channels
    #[arg(long, env = "PIPEFORGE_TEAMS_FILE")]
    pub teams_file: Option<PathBuf>,
}

/// Load the config file and apply command-line overrides on top.
pub fn load_config(config_path: Option<&Path>, sources: &SourceArgs) -> Result<GeneratorConfig> {
    let current_dir = std::env::current_dir()?;
    let mut config =
        GeneratorConfig::load(config_path, &current_dir).context("Failed to load configuration")?;

    if let Some(dir) = &sources.templates_dir {
        config.templates_dir = dir.clone();
    }
    if let Some(file) = &sources.teams_file {
        config.teams_file = Some(file.clone());
    }

    debug!("Effective configuration: {:?}", config);
    Ok(config)
}

/// Load the team directory named by the config, or an empty one.
pub fn load_teams(config: &GeneratorConfig) -> Result<TeamDirectory> {
    match &config.teams_file {
        Some(path) => TeamDirectory::from_json_file(path)
            .with_context(|| format!("Failed to load team channels from {:?}", path)),
        None => Ok(TeamDirectory::empty()),
    }
}
