//! Check-templates command - Verify the template set loads and renders.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use pipeforge_core::{
    EnvironmentGenerator, GeneratorConfig, PipelineGenerator, ProjectOverrides, ProjectSpec,
    TeamDirectory,
};
use pipeforge_templates::TemplateLoader;

use super::{load_config, SourceArgs};

#[derive(Args)]
pub struct CheckTemplatesArgs {
    /// Pipeline name used for the trial render
    #[arg(long, default_value = "template-check")]
    sample_name: String,

    #[command(flatten)]
    sources: SourceArgs,
}

pub fn execute(args: CheckTemplatesArgs, config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path, &args.sources)?;
    info!("Checking templates in {:?}", config.templates_dir);

    let loader = TemplateLoader::new(&config.templates_dir);
    let available = loader.list_available()?;
    println!(
        "📂 {} template file(s) in {:?}",
        available.len(),
        config.templates_dir
    );
    for name in &available {
        println!("   - {}", name);
    }
    println!();

    let registry = loader
        .load_set(&config.templates)
        .context("Failed to load template set")?;

    let project = sample_project(&config, &args.sample_name)?;
    let teams = TeamDirectory::empty();

    println!("Rendering {}...", config.templates.environment_template);
    let environment = EnvironmentGenerator::new(&registry, &config)
        .render(project.pipeline_name())
        .context("Environment template failed to render")?;
    check_json(&environment, &config.templates.environment_template)?;
    println!("   ✅ valid JSON");

    println!("Rendering {}...", config.templates.pipeline_template);
    let (pipeline, _) = PipelineGenerator::new(&registry, &config, &teams)
        .render(&project)
        .context("Pipeline template failed to render")?;
    check_json(&pipeline, &config.templates.pipeline_template)?;
    println!("   ✅ valid JSON");

    println!();
    println!("Templates OK");
    Ok(())
}

fn sample_project(config: &GeneratorConfig, name: &str) -> Result<ProjectSpec> {
    let overrides = ProjectOverrides::new(name, "template-check", std::env::temp_dir());
    ProjectSpec::resolve(config, overrides).context("Invalid sample project")
}

fn check_json(rendered: &str, template: &str) -> Result<()> {
    serde_json::from_str::<serde_json::Value>(rendered)
        .with_context(|| format!("Template {} did not render valid JSON", template))?;
    Ok(())
}
