//! Group definition for the inventory.
//!
//! This module provides the `Group` structure representing a logical grouping
//! of hosts with shared variables and parent-child relationships.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A group of hosts in the inventory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    /// Group name
    pub name: String,

    /// Host names belonging to this group
    #[serde(default)]
    pub hosts: BTreeSet<String>,

    /// Child group names
    #[serde(default)]
    pub children: BTreeSet<String>,

    /// Parent group names (maintained by the inventory when children are linked)
    #[serde(skip)]
    pub parents: BTreeSet<String>,

    /// Group-specific variables
    #[serde(default)]
    pub vars: IndexMap<String, serde_json::Value>,
}

impl Group {
    /// Create a new group with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hosts: BTreeSet::new(),
            children: BTreeSet::new(),
            parents: BTreeSet::new(),
            vars: IndexMap::new(),
        }
    }

    /// Create the special "all" group
    pub fn all() -> Self {
        Self::new("all")
    }

    /// Create the special "ungrouped" group
    pub fn ungrouped() -> Self {
        Self::new("ungrouped")
    }

    /// Add a host to this group
    pub fn add_host(&mut self, host: impl Into<String>) {
        self.hosts.insert(host.into());
    }

    /// Remove a host from this group
    pub fn remove_host(&mut self, host: &str) -> bool {
        self.hosts.remove(host)
    }

    /// Check if a host belongs to this group
    pub fn has_host(&self, host: &str) -> bool {
        self.hosts.contains(host)
    }

    /// Add a child group
    pub fn add_child(&mut self, child: impl Into<String>) {
        self.children.insert(child.into());
    }

    /// Check if a group is a child of this group
    pub fn has_child(&self, child: &str) -> bool {
        self.children.contains(child)
    }

    /// Add a parent group (internal use for reverse lookups)
    pub fn add_parent(&mut self, parent: impl Into<String>) {
        self.parents.insert(parent.into());
    }

    /// Check if a group is a parent of this group
    pub fn has_parent(&self, parent: &str) -> bool {
        self.parents.contains(parent)
    }

    /// Set a variable on this group
    pub fn set_var(&mut self, key: impl Into<String>, value: serde_json::Value) {
        self.vars.insert(key.into(), value);
    }

    /// Render the group as an Ansible dynamic inventory group object
    pub fn to_ansible_json(&self) -> serde_json::Value {
        let mut object = serde_json::Map::new();
        if !self.hosts.is_empty() {
            object.insert("hosts".to_string(), serde_json::json!(self.hosts));
        }
        if !self.children.is_empty() {
            object.insert("children".to_string(), serde_json::json!(self.children));
        }
        if !self.vars.is_empty() {
            object.insert("vars".to_string(), serde_json::json!(self.vars));
        }
        serde_json::Value::Object(object)
    }
}

impl PartialEq for Group {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Group {}

impl std::hash::Hash for Group {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}
