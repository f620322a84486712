//! Command implementations for the ambari-inventory CLI

pub mod inventory;

use crate::cli::output::OutputFormatter;
use crate::cli::Cli;
use anyhow::Result;
use std::path::PathBuf;

/// Common context shared between commands
pub struct CommandContext {
    /// Output formatter
    pub output: OutputFormatter,
    /// Plugin configuration path
    pub inventory_path: PathBuf,
}

impl CommandContext {
    /// Create a new command context from CLI arguments
    pub fn new(cli: &Cli) -> Self {
        Self {
            output: OutputFormatter::new(!cli.no_color, cli.verbosity()),
            inventory_path: cli.inventory.clone(),
        }
    }
}

/// Trait for runnable commands
#[async_trait::async_trait]
pub trait Runnable {
    /// Run the command and return the process exit code
    async fn run(&self, ctx: &mut CommandContext) -> Result<i32>;
}
