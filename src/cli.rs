//! Command-line argument parsing.
//!
//! Flags given on the command line override the defaults installed by
//! `user_config`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::Config;

/// Replay recorded algorithm steps and search source files
#[derive(Debug, Parser)]
#[command(name = "codelab")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Replay a visualization payload
    Viz(VizArgs),

    /// Search a file, optionally replacing every match
    Search(SearchArgs),

    /// Browse and replace matches in a file interactively
    Find(FindArgs),
}

#[derive(Debug, Args)]
pub struct VizArgs {
    /// JSON file holding a `{type, data}` payload or an analyze-code response
    pub payload: PathBuf,

    /// Print every frame to stdout instead of running interactively
    #[arg(long)]
    pub headless: bool,

    /// Playback interval in milliseconds (overrides the per-kind default)
    #[arg(long, value_name = "MS")]
    pub interval_ms: Option<u64>,
}

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// File to search
    pub file: PathBuf,

    /// Search term (a regular expression with --regex)
    pub term: String,

    /// Match case exactly
    #[arg(short = 'c', long)]
    pub case_sensitive: bool,

    /// Only match whole words (ignored with --regex)
    #[arg(short = 'w', long)]
    pub whole_word: bool,

    /// Treat the term as a regular expression
    #[arg(short = 'r', long)]
    pub regex: bool,

    /// Replace every match with this text
    #[arg(long, value_name = "TEXT")]
    pub replace: Option<String>,

    /// Write the replaced text back to the file
    #[arg(long, requires = "replace")]
    pub in_place: bool,

    /// Show the replacement as a line diff instead of the full text
    #[arg(long, requires = "replace", conflicts_with = "in_place")]
    pub diff: bool,
}

#[derive(Debug, Args)]
pub struct FindArgs {
    /// File to open
    pub file: PathBuf,

    /// Term to search for on start
    pub term: Option<String>,

    /// Match case exactly
    #[arg(short = 'c', long)]
    pub case_sensitive: bool,

    /// Only match whole words (ignored with --regex)
    #[arg(short = 'w', long)]
    pub whole_word: bool,

    /// Treat terms as regular expressions
    #[arg(short = 'r', long)]
    pub regex: bool,

    /// Save replacements back to the file on exit
    #[arg(long)]
    pub write: bool,
}

impl Cli {
    /// Apply CLI overrides to the config
    pub fn apply_to_config(&self, config: &mut Config) {
        match &self.command {
            Commands::Viz(args) => {
                if let Some(ms) = args.interval_ms {
                    let ms = i64::try_from(ms).unwrap_or(i64::MAX);
                    config.set("sorting_interval_ms", ms);
                    config.set("searching_interval_ms", ms);
                }
            }
            Commands::Search(args) => {
                set_search_flags(config, args.case_sensitive, args.whole_word, args.regex);
            }
            Commands::Find(args) => {
                set_search_flags(config, args.case_sensitive, args.whole_word, args.regex);
            }
        }
    }
}

fn set_search_flags(config: &mut Config, case_sensitive: bool, whole_word: bool, regex: bool) {
    if case_sensitive {
        config.set("search_case_sensitive", true);
    }
    if whole_word {
        config.set("search_whole_word", true);
    }
    if regex {
        config.set("search_use_regex", true);
    }
}
