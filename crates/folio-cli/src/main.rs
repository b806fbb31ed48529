//! Folio - replay page timelines against the scroll-section controller
//!
//! A small command line front-end for the page-state machines:
//! - Replay scripted user timelines with a simulated clock
//! - Print the effective configuration

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use folio_core::FolioConfig;

mod replay;
mod script;

/// Folio - scroll-section controller playground
#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Replay page timelines against the scroll-section controller", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file (defaults to ~/.folio/config.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a scripted timeline and print what the controllers did
    Simulate {
        /// TOML script with [[event]] entries
        script: PathBuf,

        /// Emit one JSON object per line instead of text
        #[arg(long)]
        json: bool,
    },

    /// Print the effective configuration as TOML
    Config,
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn describe(outcome: &replay::Outcome) -> String {
    use replay::Outcome;
    match outcome {
        Outcome::Request { index, origin } => format!("request  section {} ({})", index, origin),
        Outcome::Section { index } => format!("section  {}", index),
        Outcome::TransitionDone { offset } => format!("settled  offset {:.0}px", offset),
        Outcome::MenuButtonShown => "menu     button shown".to_string(),
        Outcome::Started => "loading  experience started".to_string(),
        Outcome::Audio {
            playing,
            muted,
            volume,
        } => format!(
            "audio    playing={} muted={} volume={:.3}",
            playing, muted, volume
        ),
    }
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let config = FolioConfig::load_or_default(cli.config.as_deref())
        .context("Failed to load configuration")?;

    match cli.command {
        Commands::Simulate { script, json } => {
            let script = script::Script::load(&script)?;
            tracing::info!(
                events = script.events.len(),
                pages = script.pages,
                "Replaying script"
            );

            let records = replay::run(&config, &script);
            for record in &records {
                if json {
                    println!("{}", serde_json::to_string(record)?);
                } else {
                    println!("{:>8} ms  {}", record.at_ms, describe(&record.outcome));
                }
            }
        }
        Commands::Config => {
            print!("{}", config.to_toml_string()?);
        }
    }

    Ok(())
}
