//! CLI parse: clap types for Bazaar. No behavior; definitions only.

use crate::search::SearchOptions;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Bazaar CLI - search the agent marketplace and manage your agents
#[derive(Parser)]
#[command(name = "bazaar")]
#[command(about = "Search the agent marketplace and manage local agent identities")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (overrides $XDG_CONFIG_HOME/bazaar/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging to stderr (default: off)
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Log output (stderr, file, both)
    #[arg(long, global = true)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search marketplace agents
    Search(SearchArgs),
    /// Manage local agent identities
    Agent {
        #[command(subcommand)]
        command: AgentCommands,
    },
}

/// Arguments of `bazaar search`
#[derive(Args, Debug, Clone)]
pub struct SearchArgs {
    /// Search text
    pub query: String,

    /// Search mode (hybrid, vector, keyword)
    #[arg(long)]
    pub mode: Option<String>,

    /// Only online agents (default: true)
    #[arg(long, value_name = "BOOL", num_args = 0..=1, default_missing_value = "true")]
    pub online: Option<bool>,

    /// Only graduated agents (default: true)
    #[arg(long, value_name = "BOOL", num_args = 0..=1, default_missing_value = "true")]
    pub graduated: Option<bool>,

    /// Filter on the high-risk flag (not sent unless given)
    #[arg(long, value_name = "BOOL", num_args = 0..=1, default_missing_value = "true")]
    pub high_risk: Option<bool>,

    /// Restrict to a cluster
    #[arg(long)]
    pub cluster: Option<String>,

    /// Full-text keywords the agent must contain
    #[arg(long)]
    pub contains: Option<String>,

    /// How --contains keywords combine (all, any)
    #[arg(long = "match", value_name = "MODE")]
    pub match_mode: Option<String>,

    /// Enable server-side reranking
    #[arg(long, value_name = "BOOL", num_args = 0..=1, default_missing_value = "true")]
    pub rerank: Option<bool>,

    /// Reranking weight given to agent performance
    #[arg(long)]
    pub performance_weight: Option<f64>,

    /// Minimum dense similarity score
    #[arg(long)]
    pub similarity_cutoff: Option<f64>,

    /// Minimum sparse (keyword) score
    #[arg(long)]
    pub sparse_cutoff: Option<f64>,

    /// Output format (text or json)
    #[arg(long, default_value = "text")]
    pub format: String,
}

impl SearchArgs {
    pub fn options(&self) -> SearchOptions {
        SearchOptions {
            mode: self.mode.clone(),
            online: self.online,
            graduated: self.graduated,
            high_risk: self.high_risk,
            cluster: self.cluster.clone(),
            contains: self.contains.clone(),
            match_mode: self.match_mode.clone(),
            rerank: self.rerank,
            performance_weight: self.performance_weight,
            similarity_cutoff: self.similarity_cutoff,
            sparse_cutoff: self.sparse_cutoff,
        }
    }
}

#[derive(Subcommand)]
pub enum AgentCommands {
    /// List your agents (refreshed from the marketplace when reachable)
    List {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Make an agent active and issue it a fresh API key
    Switch {
        /// Agent name or id (prompted for when omitted on a terminal)
        name: Option<String>,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Create a new agent and make it active
    Create {
        /// Agent name
        name: String,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Show the active agent
    Current {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}
