//! Pipeline orchestrator.
//!
//! Runs the generation steps for one project strictly in order:
//!
//! ```text
//! Start → MakefileWritten → ComposeOverlayWritten → ResourceDirEnsured
//!       → PipelineArtifactsWritten → NotificationSent → Done
//! ```
//!
//! The first failing step moves the run to `Errored` and stops it. Nothing
//! already written is rolled back. A failed notification is recorded in the
//! report but does not fail the run.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use pipeforge_notify::{CompletionNotifier, PublishReceipt};
use pipeforge_templates::{TemplateLoader, TemplateRegistry};
use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::config::{GeneratorConfig, ProjectSpec};
use crate::error::{GenerationError, GenerationResult};
use crate::generators::{
    ArtifactGenerator, ComposeOverlayGenerator, EnvironmentGenerator, GeneratedArtifact,
    MakefileGenerator, PipelineGenerator,
};
use crate::resources::ResourcePaths;
use crate::teams::TeamDirectory;

/// One step of a generation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum GenerationStep {
    Makefile,
    ComposeOverlay,
    ResourceDir,
    PipelineArtifacts,
    Notification,
}

impl GenerationStep {
    /// State reached once this step completes.
    pub fn completed_state(self) -> RunState {
        match self {
            GenerationStep::Makefile => RunState::MakefileWritten,
            GenerationStep::ComposeOverlay => RunState::ComposeOverlayWritten,
            GenerationStep::ResourceDir => RunState::ResourceDirEnsured,
            GenerationStep::PipelineArtifacts => RunState::PipelineArtifactsWritten,
            GenerationStep::Notification => RunState::NotificationSent,
        }
    }
}

impl fmt::Display for GenerationStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GenerationStep::Makefile => "makefile",
            GenerationStep::ComposeOverlay => "compose-overlay",
            GenerationStep::ResourceDir => "resource-dir",
            GenerationStep::PipelineArtifacts => "pipeline-artifacts",
            GenerationStep::Notification => "notification",
        };
        write!(f, "{}", name)
    }
}

/// Where a run is in its sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RunState {
    Start,
    MakefileWritten,
    ComposeOverlayWritten,
    ResourceDirEnsured,
    PipelineArtifactsWritten,
    NotificationSent,
    Done,
    Errored(GenerationStep),
}

impl RunState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, RunState::Done | RunState::Errored(_))
    }
}

/// Outcome of the notification step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum NotificationStatus {
    Sent(PublishReceipt),
    Failed { queue: String, reason: String },
}

impl NotificationStatus {
    pub fn is_sent(&self) -> bool {
        matches!(self, NotificationStatus::Sent(_))
    }
}

/// What the generation steps produced.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationReport {
    pub pipeline_name: String,
    pub state: RunState,
    pub resource_dir: PathBuf,
    /// Written artifacts, in the order they were written
    pub artifacts: Vec<GeneratedArtifact>,
}

impl GenerationReport {
    /// Warnings collected from every artifact.
    pub fn warnings(&self) -> Vec<&str> {
        self.artifacts
            .iter()
            .flat_map(|a| a.warnings.iter().map(String::as_str))
            .collect()
    }
}

/// Result of a full run, generation plus notification.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub generation: GenerationReport,
    pub notification: NotificationStatus,
    pub state: RunState,
}

/// Drives the generators for one project at a time.
pub struct PipelineOrchestrator {
    config: Arc<GeneratorConfig>,
    templates: TemplateRegistry,
    teams: Arc<TeamDirectory>,
    resources: ResourcePaths,
}

impl PipelineOrchestrator {
    /// Load the configured template set and build an orchestrator.
    ///
    /// Fails before anything is written if either template is missing or
    /// does not compile.
    pub fn new(config: Arc<GeneratorConfig>, teams: Arc<TeamDirectory>) -> GenerationResult<Self> {
        config.validate()?;
        let templates = TemplateLoader::new(&config.templates_dir).load_set(&config.templates)?;
        Ok(Self::with_templates(config, templates, teams))
    }

    /// Build an orchestrator around an already loaded registry.
    pub fn with_templates(
        config: Arc<GeneratorConfig>,
        templates: TemplateRegistry,
        teams: Arc<TeamDirectory>,
    ) -> Self {
        let resources = ResourcePaths::new(&config.resources_path);
        Self {
            config,
            templates,
            teams,
            resources,
        }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn templates(&self) -> &TemplateRegistry {
        &self.templates
    }

    pub fn teams(&self) -> &TeamDirectory {
        &self.teams
    }

    /// Write every artifact for `project`. Does not notify.
    pub fn generate(&self, project: &ProjectSpec) -> GenerationResult<GenerationReport> {
        let work_dir = project.working_directory();
        let mut state = RunState::Start;
        let mut artifacts = Vec::with_capacity(4);

        info!(
            "Generating pipeline artifacts for {} in {:?}",
            project.pipeline_name(),
            work_dir
        );

        artifacts.push(self.step(&mut state, GenerationStep::Makefile, || {
            MakefileGenerator.generate(project, work_dir)
        })?);

        artifacts.push(self.step(&mut state, GenerationStep::ComposeOverlay, || {
            ComposeOverlayGenerator.generate(project, work_dir)
        })?);

        let resource_dir = self.step(&mut state, GenerationStep::ResourceDir, || {
            self.resources.ensure_resource_dir(work_dir)
        })?;

        let documents = self.step(&mut state, GenerationStep::PipelineArtifacts, || {
            let environment = EnvironmentGenerator::new(&self.templates, &self.config)
                .generate(project, &resource_dir)?;
            let pipeline = PipelineGenerator::new(&self.templates, &self.config, &self.teams)
                .generate(project, &resource_dir)?;
            Ok([environment, pipeline])
        })?;
        artifacts.extend(documents);

        let report = GenerationReport {
            pipeline_name: project.pipeline_name().to_string(),
            state,
            resource_dir,
            artifacts,
        };

        info!(
            "Generated {} artifact(s) for {}",
            report.artifacts.len(),
            project.pipeline_name()
        );
        Ok(report)
    }

    /// Generate every artifact, then publish the completion notice.
    pub async fn run(
        &self,
        project: &ProjectSpec,
        notifier: &CompletionNotifier,
    ) -> GenerationResult<RunReport> {
        let generation = self.generate(project)?;

        debug!(step = %GenerationStep::Notification, "Starting step");
        let notification = match notifier.notify(project.pipeline_name()).await {
            Ok(receipt) => NotificationStatus::Sent(receipt),
            Err(e) => {
                warn!(
                    queue = %notifier.queue_name(),
                    "Continuing without notification for {}: {}",
                    project.pipeline_name(),
                    e
                );
                NotificationStatus::Failed {
                    queue: notifier.queue_name(),
                    reason: e.to_string(),
                }
            }
        };

        if notification.is_sent() {
            debug!("Run state: {:?}", GenerationStep::Notification.completed_state());
        }
        debug!("Run state: {:?}", RunState::Done);

        Ok(RunReport {
            generation,
            notification,
            state: RunState::Done,
        })
    }

    /// Run one step, advancing `state` on success.
    fn step<T>(
        &self,
        state: &mut RunState,
        step: GenerationStep,
        action: impl FnOnce() -> GenerationResult<T>,
    ) -> GenerationResult<T> {
        debug!(step = %step, "Starting step");

        match action() {
            Ok(value) => {
                *state = step.completed_state();
                debug!("Run state: {:?}", state);
                Ok(value)
            }
            Err(e) => {
                *state = RunState::Errored(step);
                error!(step = %step, error = %e, "Generation step failed");
                Err(GenerationError::Step {
                    step,
                    source: Box::new(e),
                })
            }
        }
    }
}
