//! Plugin Configuration for the Ambari Dynamic Inventory
//!
//! This module loads and validates the YAML configuration file consumed by
//! the Ambari plugin. The file name must end with `ambari.yml` or
//! `ambari.yaml` and the file must declare `plugin: ambari`.
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

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

use crate::ambari::client::DEFAULT_TIMEOUT_SECS;
use crate::ambari::{AmbariClient, AmbariResult};

/// Value the `plugin` key must carry
pub const PLUGIN_NAME: &str = "ambari";

/// Accepted configuration file name suffixes
pub const FILE_SUFFIXES: [&str; 2] = ["ambari.yml", "ambari.yaml"];

/// Errors that can occur when loading plugin configuration
#[derive(Debug, Error)]
pub enum PluginConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Config declares plugin '{found}', expected 'ambari'")]
    WrongPlugin { found: String },

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("'{}' is not an Ambari inventory source (file name must end with ambari.yml or ambari.yaml)", .0.display())]
    UnsupportedFile(PathBuf),
}

/// Result type for plugin configuration operations
pub type PluginConfigResult<T> = Result<T, PluginConfigError>;

/// Whether `path` is possibly a valid file for this plugin to consume.
///
/// The file must exist, be readable, and its name must end with
/// `ambari.yml` or `ambari.yaml`.
pub fn verify_file(path: &Path) -> bool {
    let name_matches = path
        .file_name()
        .and_then(|n| n.to_str())
        .map(|n| FILE_SUFFIXES.iter().any(|suffix| n.ends_with(suffix)))
        .unwrap_or(false);

    name_matches && path.is_file() && std::fs::File::open(path).is_ok()
}

/// Protocol used to reach the Ambari server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    #[default]
    Http,
    Https,
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Protocol::Http => write!(f, "http"),
            Protocol::Https => write!(f, "https"),
        }
    }
}

impl FromStr for Protocol {
    type Err = PluginConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "http" => Ok(Protocol::Http),
            "https" => Ok(Protocol::Https),
            other => Err(PluginConfigError::Invalid(format!(
                "protocol must be 'http' or 'https', got '{}'",
                other
            ))),
        }
    }
}

/// Configuration file as written by the user
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AmbariPluginConfig {
    /// Plugin name, must be `ambari`
    #[serde(default)]
    pub plugin: Option<String>,

    /// Ambari server host name (`host_name` is accepted too)
    #[serde(default, alias = "host_name", deserialize_with = "deserialize_scalar")]
    pub hostname: Option<String>,

    /// Ambari server port
    #[serde(default, deserialize_with = "deserialize_scalar")]
    pub port: Option<String>,

    /// Ambari user
    #[serde(default, deserialize_with = "deserialize_scalar")]
    pub username: Option<String>,

    /// Ambari password
    #[serde(default, deserialize_with = "deserialize_scalar")]
    pub password: Option<String>,

    /// `http` (default) or `https`
    #[serde(default, deserialize_with = "deserialize_scalar")]
    pub protocol: Option<String>,

    /// Validate the server's TLS certificate (default: false)
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub validate_ssl: Option<bool>,

    /// SSH user injected into every host
    #[serde(default, deserialize_with = "deserialize_scalar")]
    pub ansible_user: Option<String>,

    /// SSH password injected into every host
    #[serde(default, deserialize_with = "deserialize_scalar")]
    pub ansible_ssh_pass: Option<String>,

    /// Request timeout in seconds
    #[serde(default, deserialize_with = "deserialize_scalar")]
    pub timeout: Option<String>,

    /// Only list hosts whose status is HEALTHY
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub healthy_only: Option<bool>,
}

impl AmbariPluginConfig {
    /// Load configuration from a YAML file
    pub fn from_file(path: &Path) -> PluginConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML string
    pub fn from_yaml(yaml: &str) -> PluginConfigResult<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Create a builder for this config
    pub fn builder() -> AmbariPluginConfigBuilder {
        AmbariPluginConfigBuilder::default()
    }

    /// Validate the configuration and resolve defaults
    pub fn validate(&self) -> PluginConfigResult<AmbariConfig> {
        match self.plugin.as_deref().map(str::trim) {
            None | Some("") => return Err(PluginConfigError::MissingField("plugin".to_string())),
            Some(PLUGIN_NAME) => {}
            Some(other) => {
                return Err(PluginConfigError::WrongPlugin {
                    found: other.to_string(),
                })
            }
        }

        let hostname = required(&self.hostname, "hostname")?;
        let port = parse_port(&required(&self.port, "port")?)?;
        let username = required(&self.username, "username")?;
        let password = required(&self.password, "password")?;

        let protocol = match self.protocol.as_deref() {
            Some(p) if !p.trim().is_empty() => p.parse()?,
            _ => Protocol::default(),
        };

        let timeout_secs = match non_empty(&self.timeout) {
            Some(raw) => parse_timeout(&raw)?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(AmbariConfig {
            hostname,
            port,
            username,
            password,
            protocol,
            validate_ssl: self.validate_ssl.unwrap_or(false),
            ansible_user: non_empty(&self.ansible_user),
            ansible_ssh_pass: non_empty(&self.ansible_ssh_pass),
            timeout: Duration::from_secs(timeout_secs),
            healthy_only: self.healthy_only.unwrap_or(false),
        })
    }
}

fn required(value: &Option<String>, field: &str) -> PluginConfigResult<String> {
    non_empty(value).ok_or_else(|| PluginConfigError::MissingField(field.to_string()))
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}

fn parse_port(value: &str) -> PluginConfigResult<u16> {
    match value.parse::<u16>() {
        Ok(port) if port > 0 => Ok(port),
        _ => Err(PluginConfigError::Invalid(format!(
            "port must be between 1 and 65535, got '{}'",
            value
        ))),
    }
}

fn parse_timeout(value: &str) -> PluginConfigResult<u64> {
    match value.parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(secs),
        _ => Err(PluginConfigError::Invalid(format!(
            "timeout must be a whole number of seconds (at least 1), got '{}'",
            value
        ))),
    }
}

/// Accept any YAML scalar (string, number, bool) as a string
fn deserialize_scalar<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match Option::<serde_yaml::Value>::deserialize(deserializer)? {
        None | Some(serde_yaml::Value::Null) => Ok(None),
        Some(serde_yaml::Value::String(s)) => Ok(Some(s)),
        Some(serde_yaml::Value::Number(n)) => Ok(Some(n.to_string())),
        Some(serde_yaml::Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(other) => Err(D::Error::custom(format!(
            "expected a scalar value, got {:?}",
            other
        ))),
    }
}

/// Accept YAML booleans and the usual Ansible spellings (yes/no, on/off, 1/0)
fn deserialize_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match Option::<serde_yaml::Value>::deserialize(deserializer)? {
        None | Some(serde_yaml::Value::Null) => Ok(None),
        Some(serde_yaml::Value::Bool(b)) => Ok(Some(b)),
        Some(serde_yaml::Value::Number(n)) => match n.as_i64() {
            Some(1) => Ok(Some(true)),
            Some(0) => Ok(Some(false)),
            _ => Err(D::Error::custom(format!("expected a boolean, got {}", n))),
        },
        Some(serde_yaml::Value::String(s)) => parse_flag(&s)
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("expected a boolean, got '{}'", s))),
        Some(other) => Err(D::Error::custom(format!("expected a boolean, got {:?}", other))),
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "yes" | "y" | "true" | "t" | "on" | "1" => Some(true),
        "no" | "n" | "false" | "f" | "off" | "0" => Some(false),
        _ => None,
    }
}

/// Validated configuration used by the plugin
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmbariConfig {
    pub hostname: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub protocol: Protocol,
    pub validate_ssl: bool,
    pub ansible_user: Option<String>,
    pub ansible_ssh_pass: Option<String>,
    pub timeout: Duration,
    pub healthy_only: bool,
}

impl AmbariConfig {
    /// Load, check, and validate a configuration file
    pub fn from_file(path: &Path) -> PluginConfigResult<Self> {
        if !verify_file(path) {
            if !path.exists() {
                return Err(PluginConfigError::Io(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("Path not found: {}", path.display()),
                )));
            }
            return Err(PluginConfigError::UnsupportedFile(path.to_path_buf()));
        }

        AmbariPluginConfig::from_file(path)?.validate()
    }

    /// Server base URL, e.g. `https://ambari.example.com:8443`
    pub fn base_url(&self) -> String {
        format!("{}://{}:{}", self.protocol, self.hostname, self.port)
    }

    /// Build a REST client for the configured server
    pub fn client(&self) -> AmbariResult<AmbariClient> {
        AmbariClient::builder(self.base_url())
            .credentials(&self.username, &self.password)
            .validate_ssl(self.validate_ssl)
            .timeout(self.timeout)
            .build()
    }
}

/// Builder for plugin configuration
#[derive(Debug, Clone)]
pub struct AmbariPluginConfigBuilder {
    config: AmbariPluginConfig,
}

impl Default for AmbariPluginConfigBuilder {
    fn default() -> Self {
        Self {
            config: AmbariPluginConfig {
                plugin: Some(PLUGIN_NAME.to_string()),
                ..Default::default()
            },
        }
    }
}

impl AmbariPluginConfigBuilder {
    /// Set the Ambari server host name
    pub fn hostname(mut self, hostname: impl Into<String>) -> Self {
        self.config.hostname = Some(hostname.into());
        self
    }

    /// Set the Ambari server port
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = Some(port.to_string());
        self
    }

    /// Set the Ambari credentials
    pub fn credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.config.username = Some(username.into());
        self.config.password = Some(password.into());
        self
    }

    /// Set the protocol
    pub fn protocol(mut self, protocol: Protocol) -> Self {
        self.config.protocol = Some(protocol.to_string());
        self
    }

    /// Require valid TLS certificates
    pub fn validate_ssl(mut self, validate: bool) -> Self {
        self.config.validate_ssl = Some(validate);
        self
    }

    /// Set the SSH credentials injected into every host
    pub fn ssh_credentials(mut self, user: impl Into<String>, password: impl Into<String>) -> Self {
        self.config.ansible_user = Some(user.into());
        self.config.ansible_ssh_pass = Some(password.into());
        self
    }

    /// Set the request timeout in seconds
    pub fn timeout(mut self, secs: u64) -> Self {
        self.config.timeout = Some(secs.to_string());
        self
    }

    /// Only list HEALTHY hosts
    pub fn healthy_only(mut self, healthy_only: bool) -> Self {
        self.config.healthy_only = Some(healthy_only);
        self
    }

    /// Build the configuration
    pub fn build(self) -> PluginConfigResult<AmbariConfig> {
        self.config.validate()
    }
}
