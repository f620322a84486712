//! Inventory management.
//!
//! This module provides the in-memory inventory built by the Ambari plugin:
//! - Hosts with connection variables and host variables
//! - Groups with parent/child relationships
//! - Rendering as an Ansible dynamic inventory document (`--list`, `--host`)
//! - Rendering as a group tree (`--graph`)

pub mod group;
pub mod host;
pub mod plugins;

pub use group::Group;
pub use host::{Host, SshParams};

use indexmap::IndexMap;
use std::collections::BTreeMap;
use thiserror::Error;

use crate::ambari::AmbariError;
use plugins::PluginConfigError;

/// Name of the group every host belongs to
pub const ALL_GROUP: &str = "all";

/// Name of the group holding hosts without any other group
pub const UNGROUPED_GROUP: &str = "ungrouped";

/// Errors that can occur during inventory operations
#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid plugin configuration: {0}")]
    Config(#[from] PluginConfigError),

    #[error(transparent)]
    Ambari(#[from] AmbariError),

    #[error("host not found: {0}")]
    HostNotFound(String),

    #[error("group not found: {0}")]
    GroupNotFound(String),

    #[error("circular group dependency detected: {0}")]
    CircularDependency(String),
}

impl InventoryError {
    /// Process exit code for this error category
    pub fn exit_code(&self) -> i32 {
        match self {
            InventoryError::Config(_) => 2,
            InventoryError::Ambari(err) => match err {
                AmbariError::Connection { .. } => 3,
                AmbariError::Tls { .. } => 4,
                AmbariError::Authentication { .. } => 5,
                AmbariError::Api { .. } | AmbariError::NoCluster | AmbariError::Decode { .. } => 6,
                AmbariError::Client(_) | AmbariError::Url(_) => 2,
            },
            _ => 1,
        }
    }
}

/// Result type for inventory operations
pub type InventoryResult<T> = Result<T, InventoryError>;

/// The main inventory structure holding all hosts and groups
#[derive(Debug, Clone)]
pub struct Inventory {
    /// All hosts indexed by name
    hosts: BTreeMap<String, Host>,

    /// All groups indexed by name
    groups: BTreeMap<String, Group>,

    /// Source the inventory was built from
    source: Option<String>,
}

impl Default for Inventory {
    fn default() -> Self {
        Self::new()
    }
}

impl Inventory {
    /// Create a new empty inventory with default groups
    pub fn new() -> Self {
        let mut inventory = Self {
            hosts: BTreeMap::new(),
            groups: BTreeMap::new(),
            source: None,
        };

        inventory.groups.insert(ALL_GROUP.to_string(), Group::all());
        inventory
            .groups
            .insert(UNGROUPED_GROUP.to_string(), Group::ungrouped());

        inventory
    }

    /// Record where the inventory came from
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Source the inventory was built from
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Add a group if it does not exist yet and return it
    pub fn add_group(&mut self, name: &str) -> &mut Group {
        self.groups
            .entry(name.to_string())
            .or_insert_with(|| Group::new(name))
    }

    /// Make `child` a child group of `parent`; both must exist
    pub fn add_child(&mut self, parent: &str, child: &str) -> InventoryResult<()> {
        if !self.groups.contains_key(parent) {
            return Err(InventoryError::GroupNotFound(parent.to_string()));
        }
        if !self.groups.contains_key(child) {
            return Err(InventoryError::GroupNotFound(child.to_string()));
        }
        if parent == child || self.is_ancestor(child, parent) {
            return Err(InventoryError::CircularDependency(format!(
                "{} -> {}",
                parent, child
            )));
        }

        if let Some(group) = self.groups.get_mut(parent) {
            group.add_child(child);
        }
        if let Some(group) = self.groups.get_mut(child) {
            group.add_parent(parent);
        }
        Ok(())
    }

    /// Whether `ancestor` is reachable from `group` through parent links
    fn is_ancestor(&self, ancestor: &str, group: &str) -> bool {
        let mut pending = vec![group.to_string()];
        let mut seen = std::collections::HashSet::new();

        while let Some(name) = pending.pop() {
            if !seen.insert(name.clone()) {
                continue;
            }
            if let Some(g) = self.groups.get(&name) {
                for parent in &g.parents {
                    if parent == ancestor {
                        return true;
                    }
                    pending.push(parent.clone());
                }
            }
        }
        false
    }

    /// Add a host if it does not exist yet and return it.
    ///
    /// New hosts join `all` and `ungrouped`.
    pub fn add_host(&mut self, name: &str) -> &mut Host {
        let groups = &mut self.groups;
        self.hosts.entry(name.to_string()).or_insert_with(|| {
            let mut host = Host::new(name);
            for special in [ALL_GROUP, UNGROUPED_GROUP] {
                host.add_to_group(special);
                if let Some(group) = groups.get_mut(special) {
                    group.add_host(name);
                }
            }
            host
        })
    }

    /// Put an existing host into a group, creating the group if needed
    pub fn add_host_to_group(&mut self, host: &str, group: &str) -> InventoryResult<()> {
        let entry = self
            .hosts
            .get_mut(host)
            .ok_or_else(|| InventoryError::HostNotFound(host.to_string()))?;

        entry.add_to_group(group);
        if group != ALL_GROUP && group != UNGROUPED_GROUP {
            entry.remove_from_group(UNGROUPED_GROUP);
            if let Some(ungrouped) = self.groups.get_mut(UNGROUPED_GROUP) {
                ungrouped.remove_host(host);
            }
        }

        self.add_group(group).add_host(host);
        Ok(())
    }

    /// Get a host by name
    pub fn get_host(&self, name: &str) -> Option<&Host> {
        self.hosts.get(name)
    }

    /// Get a group by name
    pub fn get_group(&self, name: &str) -> Option<&Group> {
        self.groups.get(name)
    }

    /// Get the number of hosts
    pub fn host_count(&self) -> usize {
        self.hosts.len()
    }

    /// Get the number of groups (including `all` and `ungrouped`)
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Variables of one host as Ansible sees them
    pub fn host_vars(&self, name: &str) -> InventoryResult<IndexMap<String, serde_json::Value>> {
        self.hosts
            .get(name)
            .map(Host::hostvars)
            .ok_or_else(|| InventoryError::HostNotFound(name.to_string()))
    }

    /// Groups directly under `all`
    fn top_level_groups(&self) -> Vec<&str> {
        self.groups
            .values()
            .filter(|g| g.name != ALL_GROUP && g.parents.is_empty())
            .map(|g| g.name.as_str())
            .collect()
    }

    /// Render the Ansible dynamic inventory `--list` document.
    ///
    /// `all` lists every host and the top-level groups as children;
    /// `_meta.hostvars` carries each host's variables.
    pub fn to_ansible_json(&self) -> serde_json::Value {
        let mut document = serde_json::Map::new();

        let mut hostvars = serde_json::Map::new();
        for host in self.hosts.values() {
            hostvars.insert(host.name.clone(), serde_json::json!(host.hostvars()));
        }
        document.insert(
            "_meta".to_string(),
            serde_json::json!({ "hostvars": hostvars }),
        );

        for group in self.groups.values() {
            let mut object = group.to_ansible_json();
            if group.name == ALL_GROUP {
                if let serde_json::Value::Object(map) = &mut object {
                    map.insert(
                        "children".to_string(),
                        serde_json::json!(self.top_level_groups()),
                    );
                }
            }
            document.insert(group.name.clone(), object);
        }

        serde_json::Value::Object(document)
    }

    /// Render the group tree in the style of `ansible-inventory --graph`
    pub fn graph(&self) -> String {
        let mut out = String::new();
        out.push_str("@all:\n");
        for name in self.top_level_groups() {
            self.graph_group(name, 1, &mut out);
        }
        out
    }

    fn graph_group(&self, name: &str, depth: usize, out: &mut String) {
        let Some(group) = self.groups.get(name) else {
            return;
        };

        let indent = "  |".repeat(depth);
        out.push_str(&format!("{}--@{}:\n", indent, name));

        let child_indent = "  |".repeat(depth + 1);
        for child in &group.children {
            self.graph_group(child, depth + 1, out);
        }
        for host in &group.hosts {
            out.push_str(&format!("{}--{}\n", child_indent, host));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_empty_inventory() {
        let inv = Inventory::new();
        assert_eq!(inv.host_count(), 0);
        assert_eq!(inv.group_count(), 2);
        assert!(inv.get_group(ALL_GROUP).is_some());
        assert!(inv.get_group(UNGROUPED_GROUP).is_some());
    }

    #[test]
    fn test_add_host_is_idempotent() {
        let mut inv = Inventory::new();
        inv.add_host("node1").set_var("rack_info", json!("/r1"));
        inv.add_host("node1");

        assert_eq!(inv.host_count(), 1);
        assert_eq!(
            inv.get_host("node1").unwrap().get_var("rack_info"),
            Some(&json!("/r1"))
        );
        assert!(inv.get_group(ALL_GROUP).unwrap().has_host("node1"));
        assert!(inv.get_group(UNGROUPED_GROUP).unwrap().has_host("node1"));
    }

    #[test]
    fn test_grouped_host_leaves_ungrouped() {
        let mut inv = Inventory::new();
        inv.add_host("node1");
        inv.add_host_to_group("node1", "datanode").unwrap();

        let host = inv.get_host("node1").unwrap();
        assert!(host.in_group("datanode"));
        assert!(host.in_group(ALL_GROUP));
        assert!(!host.in_group(UNGROUPED_GROUP));
        assert!(!inv.get_group(UNGROUPED_GROUP).unwrap().has_host("node1"));
    }

    #[test]
    fn test_add_host_to_group_unknown_host() {
        let mut inv = Inventory::new();
        let err = inv.add_host_to_group("ghost", "datanode").unwrap_err();
        assert!(matches!(err, InventoryError::HostNotFound(name) if name == "ghost"));
    }

    #[test]
    fn test_add_child_links_parent() {
        let mut inv = Inventory::new();
        inv.add_group("hdfs");
        inv.add_group("datanode");
        inv.add_child("hdfs", "datanode").unwrap();

        assert!(inv.get_group("hdfs").unwrap().has_child("datanode"));
        assert!(inv.get_group("datanode").unwrap().has_parent("hdfs"));
        assert!(matches!(
            inv.add_child("hdfs", "missing"),
            Err(InventoryError::GroupNotFound(_))
        ));
    }

    #[test]
    fn test_add_child_rejects_cycles() {
        let mut inv = Inventory::new();
        inv.add_group("a");
        inv.add_group("b");
        inv.add_child("a", "b").unwrap();
        assert!(matches!(
            inv.add_child("b", "a"),
            Err(InventoryError::CircularDependency(_))
        ));
        assert!(matches!(
            inv.add_child("a", "a"),
            Err(InventoryError::CircularDependency(_))
        ));
    }

    #[test]
    fn test_to_ansible_json() {
        let mut inv = Inventory::new();
        inv.add_group("hdfs");
        inv.add_group("datanode");
        inv.add_child("hdfs", "datanode").unwrap();
        {
            let host = inv.add_host("node1");
            host.ansible_host = Some("node1".to_string());
            host.set_user("nodesuser");
        }
        inv.add_host_to_group("node1", "datanode").unwrap();
        inv.add_host("orphan");

        assert_eq!(
            inv.to_ansible_json(),
            json!({
                "_meta": {
                    "hostvars": {
                        "node1": {"ansible_host": "node1", "ansible_user": "nodesuser"},
                        "orphan": {}
                    }
                },
                "all": {
                    "hosts": ["node1", "orphan"],
                    "children": ["hdfs", "ungrouped"]
                },
                "datanode": {"hosts": ["node1"]},
                "hdfs": {"children": ["datanode"]},
                "ungrouped": {"hosts": ["orphan"]}
            })
        );
    }

    #[test]
    fn test_host_vars_unknown_host() {
        let inv = Inventory::new();
        assert!(matches!(
            inv.host_vars("nope"),
            Err(InventoryError::HostNotFound(_))
        ));
    }

    #[test]
    fn test_graph() {
        let mut inv = Inventory::new();
        inv.add_group("hdfs");
        inv.add_group("datanode");
        inv.add_child("hdfs", "datanode").unwrap();
        inv.add_host("node1");
        inv.add_host_to_group("node1", "datanode").unwrap();

        assert_eq!(
            inv.graph(),
            "@all:\n  |--@hdfs:\n  |  |--@datanode:\n  |  |  |--node1\n  |--@ungrouped:\n"
        );
    }

    #[test]
    fn test_exit_codes_are_distinct_per_category() {
        let config: InventoryError =
            PluginConfigError::MissingField("port".to_string()).into();
        let connection: InventoryError = AmbariError::Connection {
            url: "http://a:8080".to_string(),
            message: "refused".to_string(),
        }
        .into();
        let tls: InventoryError = AmbariError::Tls {
            url: "https://a:8443".to_string(),
            message: "UnknownIssuer".to_string(),
        }
        .into();
        let auth: InventoryError = AmbariError::Authentication {
            username: "u".to_string(),
            status: 403,
        }
        .into();
        let api: InventoryError = AmbariError::NoCluster.into();

        let codes = [
            config.exit_code(),
            connection.exit_code(),
            tls.exit_code(),
            auth.exit_code(),
            api.exit_code(),
        ];
        assert_eq!(codes, [2, 3, 4, 5, 6]);
    }
}
