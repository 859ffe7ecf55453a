//! codelab - replay algorithm visualizations and search source files
//!
//! This is the main entry point. It parses CLI arguments and delegates
//! to the matching mode runner.

use anyhow::{Context, Result};
use clap::Parser;

use codelab::cli::{Cli, Commands};
use codelab::config::Config;
use codelab::{run, user_config};

fn main() -> Result<()> {
    // Logs go to stderr so they never mix with frames or search output
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = Config::default();
    user_config::configure(&mut config);
    cli.apply_to_config(&mut config);

    match &cli.command {
        Commands::Viz(args) => {
            let payload = run::load_payload(&args.payload)
                .with_context(|| format!("Failed to load {}", args.payload.display()))?;
            if args.headless {
                let mut stdout = std::io::stdout().lock();
                run::run_headless(payload, &config, &mut stdout)?;
            } else {
                run::run_interactive(payload, &config)?;
            }
        }
        Commands::Search(args) => {
            let mut stdout = std::io::stdout().lock();
            let count = run::run_search_mode(args, &config, &mut stdout)
                .with_context(|| format!("Search in {} failed", args.file.display()))?;
            if count == 0 {
                eprintln!("No matches found");
            }
        }
        Commands::Find(args) => {
            let saved = run::run_search_interactive(args, &config)
                .with_context(|| format!("Find in {} failed", args.file.display()))?;
            if saved {
                eprintln!("Wrote {}", args.file.display());
            }
        }
    }

    Ok(())
}
