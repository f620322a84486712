//! ambari-inventory - Ansible dynamic inventory for Apache Ambari
//!
//! This is the entry point of the inventory executable. The inventory
//! document goes to stdout, every diagnostic goes to stderr.

mod cli;

use anyhow::Result;
use cli::commands::inventory::InventoryCommand;
use cli::commands::{CommandContext, Runnable};
use cli::{Cli, LogFormat};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Application version information
const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse_args();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity(), cli.log_format, !cli.no_color);

    tracing::debug!("ambari-inventory v{}", VERSION);

    let mut ctx = CommandContext::new(&cli);
    let exit_code = InventoryCommand::from_cli(&cli).run(&mut ctx).await?;

    std::process::exit(exit_code);
}

/// Initialize logging based on verbosity level.
///
/// `RUST_LOG` overrides the verbosity flags.
fn init_logging(verbosity: u8, format: LogFormat, use_color: bool) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));
    let registry = tracing_subscriber::registry().with(env_filter);

    match format {
        LogFormat::Text => registry
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(use_color)
                    .with_target(verbosity >= 3),
            )
            .init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
    }
}
