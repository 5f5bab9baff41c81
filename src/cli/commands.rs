//! CLI commands and argument parsing

use crate::query::SearchParams;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Hypothesis annotation search CLI
#[derive(Parser, Debug)]
#[command(name = "hypothesis")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Client configuration file (YAML or JSON)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// API token (anonymous when unset)
    #[arg(long, global = true, env = "H_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Stream annotations matching a query
    Search(SearchArgs),

    /// Show the profile of the token's owner
    Profile,
}

/// Arguments for `search`
#[derive(Args, Debug, Clone, Default)]
pub struct SearchArgs {
    /// Full-text match against any field
    #[arg(long)]
    pub any: Option<String>,

    /// Restrict to one user (acct:name@authority)
    #[arg(long)]
    pub user: Option<String>,

    /// Group id (defaults to the public group)
    #[arg(long, env = "H_GROUP")]
    pub group: Option<String>,

    /// Required tag; repeat for several
    #[arg(long = "tag")]
    pub tags: Vec<String>,

    /// Exact target URI
    #[arg(long)]
    pub uri: Option<String>,

    /// Target URI pattern; ignored when --uri is set
    #[arg(long)]
    pub wildcard_uri: Option<String>,

    /// Cap on the whole session; overrides --max-results
    #[arg(long)]
    pub limit: Option<usize>,

    /// Maximum records to deliver (0 = default)
    #[arg(short = 'n', long, default_value = "0")]
    pub max_results: usize,

    /// Resume after this cursor
    #[arg(long)]
    pub search_after: Option<String>,
}

impl SearchArgs {
    /// Query described by these arguments
    pub fn to_params(&self) -> SearchParams {
        SearchParams {
            search_after: self.search_after.clone(),
            limit: self.limit,
            any: self.any.clone(),
            user: self.user.clone(),
            group: self.group.clone(),
            uri: self.uri.clone(),
            wildcard_uri: self.wildcard_uri.clone(),
            tags: self.tags.clone(),
        }
    }
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one record per line)
    Json,
    /// Human-readable output
    Pretty,
}
