//! Apache Ambari REST API support.
//!
//! - [`client`]: async HTTP client for `/api/v1`
//! - [`models`]: serde models of the API responses
//! - [`error`]: error categories (connectivity, TLS, authentication, API)

pub mod client;
pub mod error;
pub mod models;

pub use client::{AmbariClient, AmbariClientBuilder, AmbariClientConfig, HEALTHY_STATUS};
pub use error::{AmbariError, AmbariResult};
pub use models::ServiceConfigurations;

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// One cluster member with its attributes and installed components
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClusterHost {
    /// Host name as registered in Ambari
    pub name: String,
    /// Raw attributes from `GET /hosts/{name}`
    pub details: serde_json::Map<String, serde_json::Value>,
    /// Component names installed on the host
    pub components: Vec<String>,
}

impl ClusterHost {
    /// Create a host with no attributes or components
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Add an installed component
    pub fn with_component(mut self, component: impl Into<String>) -> Self {
        self.components.push(component.into());
        self
    }

    /// Set a raw attribute
    pub fn with_detail(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.details.insert(key.into(), value);
        self
    }
}

/// Everything fetched from Ambari during one inventory run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClusterSnapshot {
    /// Name of the managed cluster
    pub cluster_name: String,
    /// Service name to its component names
    pub services: BTreeMap<String, BTreeSet<String>>,
    /// Service name to its current configuration
    pub configurations: BTreeMap<String, ServiceConfigurations>,
    /// Cluster members
    pub hosts: Vec<ClusterHost>,
}
