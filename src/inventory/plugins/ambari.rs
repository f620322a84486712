//! Apache Ambari Dynamic Inventory Plugin
//!
//! This plugin reads the cluster managed by an Ambari server and builds an
//! inventory where every service and every component becomes a group.
//!
//! # Configuration
//!
//! ```yaml
//! plugin: ambari
//! hostname: ambari-server.makayel.local
//! port: 8443
//! username: localuser
//! password: localpass
//! protocol: https
//! validate_ssl: False
//! ansible_user: nodesuser
//! ansible_ssh_pass: nodespass
//! ```
//!
//! # Groups
//!
//! - one group per service (`hdfs`, `yarn`, ...)
//! - one group per component (`datanode`, `namenode`, ...), child of its
//!   service group when the names differ
//! - `ambari_server`, holding the Ambari server itself
//!
//! # Host variables
//!
//! - `ansible_host`: the Ambari host name
//! - host attributes reported by Ambari (`cpu_count`, `ip`, `os_type`, ...)
//! - `configurations`: current configuration of every service, keyed by
//!   lowercase service name then configuration type
//! - `ansible_user` / `ansible_ssh_pass` when configured

use super::config::AmbariConfig;
use super::{DynamicInventoryPlugin, PluginOption, PluginOptionType};
use crate::ambari::{AmbariClient, ClusterHost, ClusterSnapshot};
use crate::inventory::{Inventory, InventoryResult};
use async_trait::async_trait;
use serde_json::{json, Value};

/// Group holding the Ambari server
pub const AMBARI_SERVER_GROUP: &str = "ambari_server";

/// Host variable carrying the Ambari connection settings
pub const AMBARI_CONFIG_VAR: &str = "ambari_config";

/// Host variable carrying the current service configurations
pub const CONFIGURATIONS_VAR: &str = "configurations";

/// Host attributes never copied into host variables
const EXCLUDED_PREFIXES: [&str; 2] = ["host", "last"];
const EXCLUDED_FIELDS: [&str; 1] = ["desired_configs"];

/// Apache Ambari dynamic inventory plugin
#[derive(Debug, Clone)]
pub struct AmbariPlugin {
    config: AmbariConfig,
    client: AmbariClient,
}

impl AmbariPlugin {
    /// Create a new plugin with the given configuration
    pub fn new(config: AmbariConfig) -> InventoryResult<Self> {
        let client = config.client()?;
        Ok(Self { config, client })
    }

    /// The validated configuration
    pub fn config(&self) -> &AmbariConfig {
        &self.config
    }

    /// The REST client used to reach Ambari
    pub fn client(&self) -> &AmbariClient {
        &self.client
    }
}

#[async_trait]
impl DynamicInventoryPlugin for AmbariPlugin {
    fn name(&self) -> &str {
        "ambari"
    }

    fn description(&self) -> &str {
        "Apache Ambari cluster dynamic inventory plugin"
    }

    fn verify(&self) -> InventoryResult<()> {
        if self.config.validate_ssl && self.client.base_url().scheme() == "http" {
            tracing::warn!(
                "Ambari plugin: validate_ssl is set but {} uses plain http",
                self.client.base_url()
            );
        }
        Ok(())
    }

    async fn parse(&self) -> InventoryResult<Inventory> {
        tracing::info!("Ambari plugin: querying {}", self.client.base_url());

        let snapshot = self.client.snapshot(self.config.healthy_only).await?;
        let inventory = build_inventory(&self.config, &snapshot)?;

        tracing::info!(
            "Ambari plugin: cluster '{}' yielded {} host(s) in {} group(s)",
            snapshot.cluster_name,
            inventory.host_count(),
            inventory.group_count()
        );

        Ok(inventory)
    }

    fn options_documentation(&self) -> Vec<PluginOption> {
        options_documentation()
    }
}

/// Option reference for the `ambari` plugin
pub fn options_documentation() -> Vec<PluginOption> {
    vec![
        PluginOption::required_string("hostname", "Ambari server host name (alias: host_name)"),
        PluginOption {
            option_type: PluginOptionType::Int,
            ..PluginOption::required_string("port", "Ambari server port")
        },
        PluginOption::required_string("username", "Ambari user"),
        PluginOption::required_string("password", "Ambari password"),
        PluginOption::optional_string("protocol", "Ambari protocol (http or https)", "http"),
        PluginOption::optional_bool("validate_ssl", "Validate the server TLS certificate", false),
        PluginOption::optional_string("ansible_user", "SSH user set on every host", ""),
        PluginOption::optional_string("ansible_ssh_pass", "SSH password set on every host", ""),
        PluginOption {
            option_type: PluginOptionType::Int,
            ..PluginOption::optional_string("timeout", "Request timeout in seconds", "30")
        },
        PluginOption::optional_bool("healthy_only", "Only list hosts reported HEALTHY", false),
    ]
}

/// Build the inventory from everything fetched off the Ambari server
pub fn build_inventory(config: &AmbariConfig, snapshot: &ClusterSnapshot) -> InventoryResult<Inventory> {
    let mut inventory = Inventory::new().with_source(config.base_url());

    populate_groups(&mut inventory, snapshot)?;

    let configurations = configurations_var(snapshot);
    for cluster_host in &snapshot.hosts {
        populate_host(&mut inventory, config, cluster_host, &configurations)?;
    }

    populate_ambari_server(&mut inventory, config, &snapshot.cluster_name)?;

    Ok(inventory)
}

fn populate_groups(inventory: &mut Inventory, snapshot: &ClusterSnapshot) -> InventoryResult<()> {
    for (service, components) in &snapshot.services {
        let service_group = service.to_lowercase();
        inventory.add_group(&service_group);

        for component in components {
            let component_group = component.to_lowercase();
            inventory.add_group(&component_group);
            if component_group != service_group {
                inventory.add_child(&service_group, &component_group)?;
            }
        }
    }
    Ok(())
}

/// `{lower(service): {type: properties}}`, identical for every host
fn configurations_var(snapshot: &ClusterSnapshot) -> Value {
    let mut services = serde_json::Map::new();
    for service in snapshot.services.keys() {
        let current = snapshot
            .configurations
            .get(service)
            .map(|types| json!(types))
            .unwrap_or_else(|| json!({}));
        services.insert(service.to_lowercase(), current);
    }
    Value::Object(services)
}

fn is_exported_field(key: &str) -> bool {
    !EXCLUDED_PREFIXES.iter().any(|prefix| key.starts_with(prefix)) && !EXCLUDED_FIELDS.contains(&key)
}

fn populate_host(
    inventory: &mut Inventory,
    config: &AmbariConfig,
    cluster_host: &ClusterHost,
    configurations: &Value,
) -> InventoryResult<()> {
    let host = inventory.add_host(&cluster_host.name);

    host.set_var(CONFIGURATIONS_VAR, configurations.clone());
    host.ansible_host = Some(cluster_host.name.clone());

    for (key, value) in &cluster_host.details {
        if is_exported_field(key) {
            host.set_var(key.as_str(), value.clone());
        }
    }

    apply_ssh(host, config);

    for component in &cluster_host.components {
        inventory.add_host_to_group(&cluster_host.name, &component.to_lowercase())?;
    }

    tracing::debug!(
        "Ambari plugin: host {} runs {} component(s)",
        cluster_host.name,
        cluster_host.components.len()
    );
    Ok(())
}

fn populate_ambari_server(
    inventory: &mut Inventory,
    config: &AmbariConfig,
    cluster_name: &str,
) -> InventoryResult<()> {
    inventory.add_group(AMBARI_SERVER_GROUP);

    let host = inventory.add_host(&config.hostname);
    host.set_var(
        AMBARI_CONFIG_VAR,
        json!({
            "protocol": config.protocol.to_string(),
            "port": config.port,
            "username": config.username,
            "password": config.password,
            "validate_ssl": config.validate_ssl,
            "cluster_name": cluster_name,
        }),
    );
    apply_ssh(host, config);

    inventory.add_host_to_group(&config.hostname, AMBARI_SERVER_GROUP)
}

fn apply_ssh(host: &mut crate::inventory::Host, config: &AmbariConfig) {
    if let Some(user) = &config.ansible_user {
        host.set_user(user);
    }
    if let Some(password) = &config.ansible_ssh_pass {
        host.set_password(password);
    }
}
