//! Team command - Show the channels a team's pipelines notify.

use std::path::Path;

use anyhow::Result;
use clap::Args;

use super::{load_config, load_teams, SourceArgs};

#[derive(Args)]
pub struct TeamArgs {
    /// Team to look up
    name: String,

    /// Print the lookup as JSON
    #[arg(long)]
    json: bool,

    #[command(flatten)]
    sources: SourceArgs,
}

pub fn execute(args: TeamArgs, config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path, &args.sources)?;
    let teams = load_teams(&config)?;

    let lookup = teams.lookup(&args.name);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&lookup)?);
        return Ok(());
    }

    println!("Team: {}", lookup.team);
    println!("  success: {}", format_channels(&lookup.success));
    println!("  failure: {}", format_channels(&lookup.failure));

    for warning in &lookup.warnings {
        println!("⚠️  {}", warning);
    }

    Ok(())
}

fn format_channels(channels: &[String]) -> String {
    if channels.is_empty() {
        "(none)".to_string()
    } else {
        channels.join(", ")
    }
}
