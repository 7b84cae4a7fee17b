//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Collect DOIs and fetch paper recommendations.
///
/// Oshima pulls DOIs out of pasted text and BibTeX/RIS exports, merges them
/// into one deduplicated list, and asks a recommendation service for related
/// papers.
#[derive(Parser, Debug)]
#[command(name = "oshima")]
#[command(author, version, about)]
#[command(
    after_help = "Exit codes:\n  0 = all inputs processed\n  1 = partial success (some files could not be read)\n  2 = complete failure or fatal error"
)]
pub struct Cli {
    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored log output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Extract DOIs from text and bibliography files and print them
    Extract(InputArgs),

    /// Submit extracted DOIs and print paper recommendations
    Recommend(RecommendArgs),

    /// Inspect configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Config subcommands.
#[derive(Subcommand, Debug, Clone, Copy)]
pub enum ConfigCommand {
    /// Print the effective configuration and where it came from
    Show,
}

/// Inputs shared by `extract` and `recommend`.
#[derive(Args, Debug, Clone, Default)]
pub struct InputArgs {
    /// Text containing DOIs; reads stdin when omitted and stdin is piped
    #[arg(value_name = "TEXT")]
    pub text: Vec<String>,

    /// Bibliography file to include (.bib, .bibtex, .ris); repeatable
    #[arg(short = 'f', long = "file", value_name = "PATH")]
    pub files: Vec<PathBuf>,

    /// Maximum number of DOIs to print or submit (1-500)
    #[arg(short = 'n', long, value_parser = clap::value_parser!(u16).range(1..=500))]
    pub limit: Option<u16>,

    /// Print JSON instead of plain text
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `recommend`.
#[derive(Args, Debug, Clone, Default)]
pub struct RecommendArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Base URL of the recommendation service (overrides OSHIMA_API_URL)
    #[arg(long, value_name = "URL")]
    pub api_url: Option<String>,

    /// Endpoint name under the base URL
    #[arg(long, value_name = "NAME")]
    pub endpoint: Option<String>,
}
