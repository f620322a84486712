//! Inventory command - `--list`, `--host` and `--graph`

use super::{CommandContext, Runnable};
use crate::cli::{Cli, Mode};
use ambari_inventory::ambari::AmbariError;
use ambari_inventory::inventory::plugins::create_plugin_from_file;
use ambari_inventory::inventory::{Inventory, InventoryError, InventoryResult};
use anyhow::Result;

/// Print the Ambari inventory in the requested form
#[derive(Debug, Clone)]
pub struct InventoryCommand {
    /// What to print
    pub mode: Mode,
    /// Print YAML instead of JSON
    pub yaml: bool,
}

impl InventoryCommand {
    /// Build the command from parsed arguments
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            mode: cli.mode(),
            yaml: cli.yaml,
        }
    }

    /// Execute the command
    pub async fn execute(&self, ctx: &mut CommandContext) -> Result<i32> {
        let inventory = match load(ctx).await {
            Ok(inventory) => inventory,
            Err(err) => {
                ctx.output.error(&err.to_string());
                if let Some(hint) = hint_for(&err) {
                    ctx.output.hint(hint);
                }
                return Ok(err.exit_code());
            }
        };

        ctx.output.info(&format!(
            "{} host(s) in {} group(s) from {}",
            inventory.host_count(),
            inventory.group_count(),
            inventory.source().unwrap_or("Ambari")
        ));

        if let Mode::Host(name) = &self.mode {
            if inventory.get_host(name).is_none() {
                ctx.output
                    .warning(&format!("Host '{}' is not part of the inventory", name));
            }
        }

        println!("{}", render(&inventory, &self.mode, self.yaml)?);
        Ok(0)
    }
}

async fn load(ctx: &CommandContext) -> InventoryResult<Inventory> {
    let plugin = create_plugin_from_file(&ctx.inventory_path)?;
    plugin.parse().await
}

/// Render the inventory for the given mode
pub fn render(inventory: &Inventory, mode: &Mode, yaml: bool) -> Result<String> {
    let document = match mode {
        Mode::Graph => return Ok(inventory.graph().trim_end().to_string()),
        Mode::List => inventory.to_ansible_json(),
        Mode::Host(name) => match inventory.host_vars(name) {
            Ok(vars) => serde_json::to_value(vars)?,
            Err(InventoryError::HostNotFound(_)) => serde_json::json!({}),
            Err(err) => return Err(err.into()),
        },
    };

    if yaml {
        Ok(serde_yaml::to_string(&document)?.trim_end().to_string())
    } else {
        Ok(serde_json::to_string_pretty(&document)?)
    }
}

/// Remediation hint shown under the error message
fn hint_for(err: &InventoryError) -> Option<&'static str> {
    match err {
        InventoryError::Config(_) => {
            Some("the file must be named *ambari.yml or *ambari.yaml and declare 'plugin: ambari'")
        }
        InventoryError::Ambari(AmbariError::Connection { .. }) => {
            Some("check hostname, port and protocol in the inventory file")
        }
        InventoryError::Ambari(AmbariError::Tls { .. }) => {
            Some("set 'validate_ssl: false' for self-signed certificates")
        }
        InventoryError::Ambari(AmbariError::Authentication { .. }) => {
            Some("check username and password in the inventory file")
        }
        _ => None,
    }
}

#[async_trait::async_trait]
impl Runnable for InventoryCommand {
    async fn run(&self, ctx: &mut CommandContext) -> Result<i32> {
        self.execute(ctx).await
    }
}
