//! # pipeforge_core
//!
//! Artifact generation engine for pipeforge.
//!
//! Given a project name, an owning team and a working directory, this crate
//! writes everything a GoCD pipeline needs to pick the project up:
//!
//! - `Makefile` with one target per stage plus Slack notification hooks
//! - `docker-compose.slack.yml` overlay for the notifier container
//! - `resources/<env>.goenvironment.json`
//! - `resources/<pipeline>.gopipeline.json`
//!
//! and then announces completion on a message queue.
//!
//! # Architecture
//!
//! - **Config**: [`GeneratorConfig`] defaults, [`ProjectOverrides`] merged into a validated [`ProjectSpec`]
//! - **Teams**: [`TeamDirectory`] resolves Slack channels, degrading to blanks
//! - **Resources**: [`ResourcePaths`] creates the resources directory exactly once
//! - **Generators**: one [`ArtifactGenerator`] per file
//! - **Engine**: [`PipelineOrchestrator`] sequences the steps and notifies
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use pipeforge_core::{GeneratorConfig, PipelineOrchestrator, ProjectOverrides, ProjectSpec, TeamDirectory};
//! use pipeforge_notify::{CompletionNotifier, DryRunPublisher};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Arc::new(GeneratorConfig::default());
//! let orchestrator = PipelineOrchestrator::new(config.clone(), Arc::new(TeamDirectory::empty()))?;
//!
//! let project = ProjectSpec::resolve(
//!     &config,
//!     ProjectOverrides::new("checkout-service", "payments", "./checkout-service"),
//! )?;
//!
//! let notifier = CompletionNotifier::new(Arc::new(DryRunPublisher::new(&config.queue.queue)));
//! let report = orchestrator.run(&project, &notifier).await?;
//! println!("{} artifact(s) written", report.generation.artifacts.len());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod generators;
pub mod resources;
pub mod teams;

pub use config::{
    GeneratorConfig, ProjectOverrides, ProjectSpec, DEFAULT_COMMANDS, DEFAULT_CONFIG_FILE,
    DEFAULT_STAGES,
};
pub use engine::{
    GenerationReport, GenerationStep, NotificationStatus, PipelineOrchestrator, RunReport, RunState,
};
pub use error::{GenerationError, GenerationResult};
pub use generators::{
    ArtifactGenerator, ArtifactKind, ComposeOverlayGenerator, EnvironmentGenerator,
    GeneratedArtifact, MakefileGenerator, PipelineGenerator, COMPOSE_FILE_NAME, MAKEFILE_NAME,
};
pub use resources::ResourcePaths;
pub use teams::{LookupWarning, TeamChannels, TeamDirectory, TeamLookup};
