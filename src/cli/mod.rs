//! CLI module for ambari-inventory
//!
//! This module provides the command-line interface, following the contract
//! Ansible expects from an inventory script (`--list`, `--host <name>`).

pub mod commands;
pub mod output;

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Ansible dynamic inventory for Apache Ambari clusters
///
/// Reads an `*ambari.yml` configuration file, queries the Ambari server and
/// prints the inventory on stdout.
#[derive(Parser, Debug, Clone)]
#[command(name = "ambari-inventory")]
#[command(version)]
#[command(about = "Ansible dynamic inventory for Apache Ambari", long_about = None)]
pub struct Cli {
    /// Path to the plugin configuration file (*ambari.yml / *ambari.yaml)
    #[arg(short = 'i', long, env = "AMBARI_INVENTORY")]
    pub inventory: PathBuf,

    /// Print the whole inventory (default)
    #[arg(long, conflicts_with_all = ["host", "graph"])]
    pub list: bool,

    /// Print the variables of a single host
    #[arg(long, value_name = "NAME", conflicts_with = "graph")]
    pub host: Option<String>,

    /// Print the group tree
    #[arg(long)]
    pub graph: bool,

    /// Print YAML instead of JSON
    #[arg(long)]
    pub yaml: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Format of the diagnostics written to stderr
    #[arg(long, value_enum, default_value = "text", env = "AMBARI_INVENTORY_LOG_FORMAT")]
    pub log_format: LogFormat,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

/// Format of log lines on stderr
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

/// What the invocation asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Full inventory document
    List,
    /// Variables of one host
    Host(String),
    /// Group tree
    Graph,
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }

    /// Get the effective verbosity level (0-4)
    pub fn verbosity(&self) -> u8 {
        self.verbose.min(4)
    }

    /// Requested output mode
    pub fn mode(&self) -> Mode {
        match (&self.host, self.graph) {
            (Some(name), _) => Mode::Host(name.clone()),
            (None, true) => Mode::Graph,
            (None, false) => Mode::List,
        }
    }
}
