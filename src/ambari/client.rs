//! Ambari REST API Client
//!
//! This module provides an async HTTP client for the Apache Ambari REST API
//! (`/api/v1`). It includes:
//!
//! - HTTP basic authentication on every request
//! - The `X-Requested-By` header Ambari expects from API clients
//! - Per-request timeout
//! - Optional TLS certificate validation (`validate_ssl`)
//!
//! Requests are issued one after another and never retried; every failure is
//! surfaced to the caller as an [`AmbariError`].

use std::collections::{BTreeMap, BTreeSet};
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, info};
use url::Url;

use super::error::{AmbariError, AmbariResult};
use super::models::{
    ClusterHostItem, ClusterItem, Collection, HostComponentItem, HostDetail, ServiceConfigVersion,
    ServiceConfigurations, ServiceItem,
};
use super::{ClusterHost, ClusterSnapshot};

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Host status Ambari reports for a host with a live agent.
pub const HEALTHY_STATUS: &str = "HEALTHY";

/// Maximum number of response body bytes echoed into an error message
const MAX_ERROR_BODY: usize = 512;

/// Configuration for the Ambari client
#[derive(Debug, Clone)]
pub struct AmbariClientConfig {
    /// Server base URL, e.g. `https://ambari.example.com:8443/`
    pub base_url: Url,
    /// Basic auth user
    pub username: String,
    /// Basic auth password
    pub password: String,
    /// Whether TLS certificates must be valid
    pub validate_ssl: bool,
    /// Request timeout
    pub timeout: Duration,
    /// User agent string
    pub user_agent: String,
}

/// Builder for creating an [`AmbariClient`]
pub struct AmbariClientBuilder {
    base_url: String,
    username: String,
    password: String,
    validate_ssl: bool,
    timeout: Duration,
    user_agent: String,
}

impl AmbariClientBuilder {
    /// Create a new builder for the server at `base_url`
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            username: String::new(),
            password: String::new(),
            validate_ssl: false,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: format!("ambari-inventory/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Set the basic auth credentials
    pub fn credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = username.into();
        self.password = password.into();
        self
    }

    /// Require valid TLS certificates
    pub fn validate_ssl(mut self, validate: bool) -> Self {
        self.validate_ssl = validate;
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Build the client
    pub fn build(self) -> AmbariResult<AmbariClient> {
        let base_url = Url::parse(&self.base_url)?;
        AmbariClient::from_config(AmbariClientConfig {
            base_url,
            username: self.username,
            password: self.password,
            validate_ssl: self.validate_ssl,
            timeout: self.timeout,
            user_agent: self.user_agent,
        })
    }
}

/// HTTP client for the Ambari REST API
#[derive(Debug, Clone)]
pub struct AmbariClient {
    client: Client,
    config: AmbariClientConfig,
}

impl AmbariClient {
    /// Create a new builder
    pub fn builder(base_url: impl Into<String>) -> AmbariClientBuilder {
        AmbariClientBuilder::new(base_url)
    }

    fn from_config(config: AmbariClientConfig) -> AmbariResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert("X-Requested-By", HeaderValue::from_static("ambari"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .default_headers(headers)
            .danger_accept_invalid_certs(!config.validate_ssl)
            .build()
            .map_err(|e| AmbariError::Client(e.to_string()))?;

        if !config.validate_ssl && config.base_url.scheme() == "https" {
            debug!(
                server = %config.base_url,
                "TLS certificate validation disabled for Ambari server"
            );
        }

        Ok(Self { client, config })
    }

    /// Get the server base URL
    pub fn base_url(&self) -> &Url {
        &self.config.base_url
    }

    /// Whether TLS certificates are validated
    pub fn validates_certificates(&self) -> bool {
        self.config.validate_ssl
    }

    /// Resolve API path segments (relative to `/api/v1/`) to a full URL.
    ///
    /// Each segment is percent-encoded on its own, so a cluster or host name
    /// containing `/`, `?` or `#` stays a single path segment.
    pub fn endpoint(&self, segments: &[&str], query: Option<&str>) -> AmbariResult<Url> {
        let mut url = self.config.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| AmbariError::Client(format!("{} cannot be a base URL", self.config.base_url)))?
            .pop_if_empty()
            .extend(["api", "v1"])
            .extend(segments);
        url.set_query(query);
        Ok(url)
    }

    /// GET an API URL and decode the JSON body
    async fn get<T: DeserializeOwned>(&self, url: Url) -> AmbariResult<T> {
        debug!(url = %url, "GET");

        let response = self
            .client
            .get(url.clone())
            .basic_auth(&self.config.username, Some(&self.config.password))
            .send()
            .await
            .map_err(|e| AmbariError::from_transport(url.as_str(), e))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(AmbariError::Authentication {
                username: self.config.username.clone(),
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| AmbariError::from_transport(url.as_str(), e))?;

        if !status.is_success() {
            return Err(AmbariError::Api {
                url: url.to_string(),
                status: status.as_u16(),
                message: truncate(&body, MAX_ERROR_BODY),
            });
        }

        // Ambari does not always label its JSON as application/json
        serde_json::from_str(&body).map_err(|e| AmbariError::Decode {
            url: url.to_string(),
            message: e.to_string(),
        })
    }

    /// Names of the clusters managed by this server
    pub async fn clusters(&self) -> AmbariResult<Vec<String>> {
        let clusters: Collection<ClusterItem> = self.get(self.endpoint(&["clusters"], None)?).await?;
        Ok(clusters
            .items
            .into_iter()
            .map(|item| item.cluster.cluster_name)
            .collect())
    }

    /// Name of the first cluster managed by this server
    pub async fn cluster_name(&self) -> AmbariResult<String> {
        self.clusters()
            .await?
            .into_iter()
            .next()
            .ok_or(AmbariError::NoCluster)
    }

    /// Installed services and their components.
    ///
    /// Services without any component are left out.
    pub async fn services(&self, cluster: &str) -> AmbariResult<BTreeMap<String, BTreeSet<String>>> {
        let url = self.endpoint(
            &["clusters", cluster, "services"],
            Some("fields=components/ServiceComponentInfo/component_name,components/ServiceComponentInfo/service_name"),
        )?;
        let services: Collection<ServiceItem> = self.get(url).await?;

        let mut result: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for item in services.items {
            for component in item.components {
                let service_name = component
                    .info
                    .service_name
                    .unwrap_or_else(|| item.service.service_name.clone());
                result
                    .entry(service_name)
                    .or_default()
                    .insert(component.info.component_name);
            }
        }
        Ok(result)
    }

    /// Sorted, deduplicated names of the cluster's hosts
    pub async fn cluster_hosts(&self, cluster: &str, healthy_only: bool) -> AmbariResult<Vec<String>> {
        let url = self.endpoint(
            &["clusters", cluster, "hosts"],
            Some("fields=Hosts/host_name,Hosts/host_status"),
        )?;
        let hosts: Collection<ClusterHostItem> = self.get(url).await?;

        let names: BTreeSet<String> = hosts
            .items
            .into_iter()
            .filter(|item| !healthy_only || item.host.host_status.as_deref() == Some(HEALTHY_STATUS))
            .map(|item| item.host.host_name)
            .collect();
        Ok(names.into_iter().collect())
    }

    /// Attributes of a single host
    pub async fn host_details(&self, host: &str) -> AmbariResult<serde_json::Map<String, serde_json::Value>> {
        let detail: HostDetail = self.get(self.endpoint(&["hosts", host], None)?).await?;
        Ok(detail.host)
    }

    /// Components installed on a host
    pub async fn host_components(&self, cluster: &str, host: &str) -> AmbariResult<Vec<String>> {
        let url = self.endpoint(&["clusters", cluster, "hosts", host, "host_components"], None)?;
        let components: Collection<HostComponentItem> = self.get(url).await?;
        Ok(components
            .items
            .into_iter()
            .map(|item| item.host_roles.component_name)
            .collect())
    }

    /// Current configuration of a service.
    ///
    /// When Ambari returns several current versions (one per config group)
    /// the last one wins.
    pub async fn service_configurations(
        &self,
        cluster: &str,
        service: &str,
    ) -> AmbariResult<ServiceConfigurations> {
        let query = format!("service_name.in({})&is_current=true", service);
        let url = self.endpoint(
            &["clusters", cluster, "configurations", "service_config_versions"],
            Some(&query),
        )?;
        let versions: Collection<ServiceConfigVersion> = self.get(url).await?;
        Ok(versions
            .items
            .last()
            .map(ServiceConfigVersion::to_configurations)
            .unwrap_or_default())
    }

    /// Fetch everything the inventory needs in one linear pass
    pub async fn snapshot(&self, healthy_only: bool) -> AmbariResult<ClusterSnapshot> {
        let cluster_name = self.cluster_name().await?;
        info!(cluster = %cluster_name, server = %self.config.base_url, "Querying Ambari cluster");

        let services = self.services(&cluster_name).await?;

        let mut configurations = BTreeMap::new();
        for service in services.keys() {
            let config = self.service_configurations(&cluster_name, service).await?;
            configurations.insert(service.clone(), config);
        }

        let host_names = self.cluster_hosts(&cluster_name, healthy_only).await?;
        let mut hosts = Vec::with_capacity(host_names.len());
        for name in host_names {
            let details = self.host_details(&name).await?;
            let components = self.host_components(&cluster_name, &name).await?;
            hosts.push(ClusterHost {
                name,
                details,
                components,
            });
        }

        info!(
            cluster = %cluster_name,
            services = services.len(),
            hosts = hosts.len(),
            "Ambari cluster snapshot complete"
        );

        Ok(ClusterSnapshot {
            cluster_name,
            services,
            configurations,
            hosts,
        })
    }
}

fn truncate(body: &str, max: usize) -> String {
    let trimmed = body.trim();
    if trimmed.len() <= max {
        return trimmed.to_string();
    }
    let mut end = max;
    while !trimmed.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &trimmed[..end])
}
