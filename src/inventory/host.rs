//! Host definition for the inventory.
//!
//! This module provides the `Host` structure representing a managed node
//! with its SSH connection variables, host variables, and group membership.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// SSH connection variables handed to Ansible
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SshParams {
    /// SSH user (`ansible_user`)
    #[serde(rename = "ansible_user", skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,

    /// SSH password (`ansible_ssh_pass`)
    #[serde(rename = "ansible_ssh_pass", skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

/// A managed host in the inventory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Host {
    /// Inventory host name
    pub name: String,

    /// Actual hostname or IP to connect to (if different from name)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ansible_host: Option<String>,

    /// SSH connection variables
    #[serde(flatten)]
    pub ssh: SshParams,

    /// Host-specific variables
    #[serde(default)]
    pub vars: IndexMap<String, serde_json::Value>,

    /// Groups this host belongs to
    #[serde(skip)]
    pub groups: BTreeSet<String>,
}

impl Host {
    /// Create a new host with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ansible_host: None,
            ssh: SshParams::default(),
            vars: IndexMap::new(),
            groups: BTreeSet::new(),
        }
    }

    /// Set a variable on this host
    pub fn set_var(&mut self, key: impl Into<String>, value: serde_json::Value) {
        self.vars.insert(key.into(), value);
    }

    /// Get a variable from this host
    pub fn get_var(&self, key: &str) -> Option<&serde_json::Value> {
        self.vars.get(key)
    }

    /// Check if host has a specific variable
    pub fn has_var(&self, key: &str) -> bool {
        self.vars.contains_key(key)
    }

    /// Add this host to a group
    pub fn add_to_group(&mut self, group: impl Into<String>) {
        self.groups.insert(group.into());
    }

    /// Remove this host from a group
    pub fn remove_from_group(&mut self, group: &str) {
        self.groups.remove(group);
    }

    /// Check if host belongs to a specific group
    pub fn in_group(&self, group: &str) -> bool {
        self.groups.contains(group)
    }

    /// Set SSH user
    pub fn set_user(&mut self, user: impl Into<String>) {
        self.ssh.user = Some(user.into());
    }

    /// Set SSH password
    pub fn set_password(&mut self, password: impl Into<String>) {
        self.ssh.password = Some(password.into());
    }

    /// All variables as Ansible sees them (`_meta.hostvars` entry).
    ///
    /// Connection variables come first, followed by host variables. A host
    /// variable never overrides a connection variable.
    pub fn hostvars(&self) -> IndexMap<String, serde_json::Value> {
        let mut vars = IndexMap::new();

        if let Some(address) = &self.ansible_host {
            vars.insert("ansible_host".to_string(), serde_json::Value::String(address.clone()));
        }
        if let Some(user) = &self.ssh.user {
            vars.insert("ansible_user".to_string(), serde_json::Value::String(user.clone()));
        }
        if let Some(password) = &self.ssh.password {
            vars.insert(
                "ansible_ssh_pass".to_string(),
                serde_json::Value::String(password.clone()),
            );
        }

        for (key, value) in &self.vars {
            vars.entry(key.clone()).or_insert_with(|| value.clone());
        }

        vars
    }
}

impl PartialEq for Host {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Host {}

impl std::hash::Hash for Host {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_host_new() {
        let host = Host::new("node1");
        assert_eq!(host.name, "node1");
        assert!(host.ansible_host.is_none());
        assert_eq!(host.ssh, SshParams::default());
        assert!(host.hostvars().is_empty());
    }

    #[test]
    fn test_host_groups() {
        let mut host = Host::new("test");
        host.add_to_group("datanode");
        host.add_to_group("namenode");
        assert!(host.in_group("datanode"));
        assert!(!host.in_group("zookeeper_server"));
        host.remove_from_group("datanode");
        assert!(!host.in_group("datanode"));
    }

    #[test]
    fn test_hostvars_order_and_precedence() {
        let mut host = Host::new("node1");
        host.ansible_host = Some("node1".to_string());
        host.set_var("rack_info", json!("/default-rack"));
        host.set_var("ansible_user", json!("ignored"));
        host.set_user("nodesuser");
        host.set_password("nodespass");

        let vars = host.hostvars();
        let keys: Vec<&str> = vars.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            vec!["ansible_host", "ansible_user", "ansible_ssh_pass", "rack_info"]
        );
        assert_eq!(vars["ansible_user"], json!("nodesuser"));
    }

    #[test]
    fn test_host_serialization_uses_ansible_names() {
        let mut host = Host::new("node1");
        host.set_user("nodesuser");
        let value = serde_json::to_value(&host).unwrap();
        assert_eq!(value["ansible_user"], json!("nodesuser"));
        assert!(value.get("ansible_ssh_pass").is_none());
    }
}
