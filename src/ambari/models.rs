//! Response models for the Ambari REST API v1.
//!
//! Ambari wraps every collection in `{ "href": ..., "items": [...] }` and nests
//! each resource's attributes under a capitalised key (`Clusters`, `Hosts`,
//! `HostRoles`, ...).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Generic Ambari collection envelope.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Collection<T> {
    #[serde(default)]
    pub href: Option<String>,
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ClusterInfo {
    pub cluster_name: String,
    #[serde(default)]
    pub version: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ClusterItem {
    #[serde(rename = "Clusters")]
    pub cluster: ClusterInfo,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ServiceInfo {
    pub service_name: String,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ServiceComponentInfo {
    pub component_name: String,
    #[serde(default)]
    pub service_name: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ServiceComponent {
    #[serde(rename = "ServiceComponentInfo")]
    pub info: ServiceComponentInfo,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ServiceItem {
    #[serde(rename = "ServiceInfo")]
    pub service: ServiceInfo,
    #[serde(default)]
    pub components: Vec<ServiceComponent>,
}

/// Summary of a cluster member as listed under `/clusters/{name}/hosts`.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct HostSummary {
    pub host_name: String,
    #[serde(default)]
    pub host_status: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ClusterHostItem {
    #[serde(rename = "Hosts")]
    pub host: HostSummary,
}

/// `GET /hosts/{name}` keeps the host attributes opaque.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct HostDetail {
    #[serde(rename = "Hosts")]
    pub host: serde_json::Map<String, serde_json::Value>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct HostRoles {
    pub component_name: String,
    #[serde(default)]
    pub host_name: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct HostComponentItem {
    #[serde(rename = "HostRoles")]
    pub host_roles: HostRoles,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ConfigurationEntry {
    #[serde(rename = "type")]
    pub config_type: String,
    #[serde(default)]
    pub properties: serde_json::Map<String, serde_json::Value>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ServiceConfigVersion {
    #[serde(default)]
    pub service_name: Option<String>,
    #[serde(default)]
    pub group_name: Option<String>,
    #[serde(default)]
    pub configurations: Vec<ConfigurationEntry>,
}

/// Configuration type (e.g. `hdfs-site`) to its properties.
pub type ServiceConfigurations = BTreeMap<String, serde_json::Map<String, serde_json::Value>>;

impl ServiceConfigVersion {
    /// Fold the configuration entries into a `type -> properties` map.
    pub fn to_configurations(&self) -> ServiceConfigurations {
        self.configurations
            .iter()
            .map(|c| (c.config_type.clone(), c.properties.clone()))
            .collect()
    }
}
