//! Command-line driver for equimatch.
//!
//! Reads skill profiles and roles as JSON and prints scores, rankings and
//! suggestions as JSON.
//!
//! # Usage
//!
//! ```bash
//! # Score one profile against a requirement list
//! cargo run -p equimatch-cli -- score --candidate me.json --required task.json
//!
//! # Same, with a per-requirement breakdown
//! cargo run -p equimatch-cli -- score --candidate me.json --required task.json --explain
//!
//! # Rank roles, dropping anything under 40%
//! cargo run -p equimatch-cli -- rank --candidate me.json --roles roles.json --min 40
//!
//! # Suggest skills to add, using an extra related-skills table
//! cargo run -p equimatch-cli -- --table ./related.yaml suggest --candidate me.json
//!
//! # Look up a table entry
//! cargo run -p equimatch-cli -- related react
//! ```
//!
//! Set `RUST_LOG=debug` to see table loading and skipped input entries.

mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Score and rank roles against a skill profile.
#[derive(Parser, Debug)]
#[command(name = "equimatch", version, about)]
struct Args {
    /// Matcher configuration file (YAML).
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Extra related-skills table (YAML file or directory), overlaid on the configured one.
    #[arg(short, long, global = true)]
    table: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Score a candidate against a list of required skills.
    Score {
        /// JSON array of the candidate's skills.
        #[arg(long)]
        candidate: PathBuf,
        /// JSON array of required skills.
        #[arg(long)]
        required: PathBuf,
        /// Report how each requirement was met.
        #[arg(long)]
        explain: bool,
    },
    /// Rank roles for a candidate, best match first.
    Rank {
        /// JSON array of the candidate's skills.
        #[arg(long)]
        candidate: PathBuf,
        /// JSON array of roles.
        #[arg(long)]
        roles: PathBuf,
        /// Drop roles scoring below this percentage.
        #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=100))]
        min: u8,
    },
    /// Suggest related skills the candidate does not list yet.
    Suggest {
        /// JSON array of the candidate's skills.
        #[arg(long)]
        candidate: PathBuf,
    },
    /// Show the related skills for a name.
    Related {
        /// Skill name.
        name: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = args.config.as_deref().map(commands::expand_tilde);
    let table = args.table.as_deref().map(commands::expand_tilde);
    let matcher = commands::build_matcher(config.as_deref(), table.as_deref()).await?;

    let output = match args.command {
        Command::Score {
            candidate,
            required,
            explain,
        } => commands::score(&matcher, &candidate, &required, explain).await?,
        Command::Rank {
            candidate,
            roles,
            min,
        } => commands::rank(&matcher, &candidate, &roles, min).await?,
        Command::Suggest { candidate } => commands::suggest(&matcher, &candidate).await?,
        Command::Related { name } => commands::related(&matcher, &name),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
