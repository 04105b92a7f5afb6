//! Generate command - Write pipeline artifacts and announce them.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use pipeforge_core::{NotificationStatus, PipelineOrchestrator, ProjectOverrides, ProjectSpec};
use pipeforge_notify::{CompletionNotifier, DryRunPublisher, QueuePublisher, SqsPublisher};

use super::{load_config, load_teams, SourceArgs};

#[derive(Args)]
pub struct GenerateArgs {
    /// Pipeline (project) name
    #[arg(short, long)]
    name: String,

    /// Owning team; becomes the pipeline group
    #[arg(short, long)]
    team: String,

    /// Working directory to generate into (defaults to the current directory)
    #[arg(short, long)]
    path: Option<PathBuf>,

    /// Stage name, repeatable. Pairs with --command by position
    #[arg(long = "stage")]
    stages: Vec<String>,

    /// Stage command, repeatable. Pairs with --stage by position
    #[arg(long = "command")]
    commands: Vec<String>,

    /// Queue receiving the completion notice
    #[arg(long, env = "PIPEFORGE_QUEUE")]
    queue: Option<String>,

    /// Region of the queue
    #[arg(long, env = "PIPEFORGE_REGION")]
    region: Option<String>,

    /// Log the completion notice instead of publishing it
    #[arg(long)]
    no_notify: bool,

    #[command(flatten)]
    sources: SourceArgs,
}

pub async fn execute(args: GenerateArgs, config_path: Option<&Path>) -> Result<()> {
    info!("Generating pipeline: {}", args.name);

    let mut config = load_config(config_path, &args.sources)?;
    if let Some(queue) = &args.queue {
        config.queue.queue = queue.clone();
    }
    if let Some(region) = &args.region {
        config.queue.region = region.clone();
    }
    let config = Arc::new(config);

    let working_directory = match args.path {
        Some(path) => path,
        None => std::env::current_dir()?,
    };

    let mut overrides = ProjectOverrides::new(&args.name, &args.team, working_directory);
    if !args.stages.is_empty() {
        overrides = overrides.stages(args.stages);
    }
    if !args.commands.is_empty() {
        overrides = overrides.commands(args.commands);
    }
    let project = ProjectSpec::resolve(&config, overrides).context("Invalid project")?;

    let teams = Arc::new(load_teams(&config)?);
    let orchestrator = PipelineOrchestrator::new(config.clone(), teams)
        .context("Failed to load templates")?;

    let publisher: Arc<dyn QueuePublisher> = if args.no_notify {
        Arc::new(DryRunPublisher::new(&config.queue.queue))
    } else {
        // Connects on first send, after generation has finished.
        Arc::new(SqsPublisher::new(config.queue.clone()))
    };
    let notifier = CompletionNotifier::new(publisher);

    let report = orchestrator
        .run(&project, &notifier)
        .await
        .with_context(|| format!("Failed to generate pipeline '{}'", project.pipeline_name()))?;

    println!("✅ Pipeline '{}' generated", project.pipeline_name());
    println!();
    for artifact in &report.generation.artifacts {
        println!("  {:<24} {}", artifact.kind.to_string(), artifact.path.display());
    }

    let warnings = report.generation.warnings();
    if !warnings.is_empty() {
        println!();
        for warning in warnings {
            println!("⚠️  {}", warning);
        }
    }

    println!();
    match &report.notification {
        NotificationStatus::Sent(receipt) => {
            println!("📨 Notified queue '{}'", receipt.queue);
        }
        NotificationStatus::Failed { queue, reason } => {
            println!("⚠️  Could not notify queue '{}': {}", queue, reason);
        }
    }

    Ok(())
}

