//! Inventory Plugins
//!
//! A dynamic inventory plugin turns a YAML configuration file into an
//! [`Inventory`] by querying an external system. The only plugin shipped is
//! [`ambari`], which reads the hosts and services of an Apache Ambari
//! cluster.
//!
//! # Usage
//!
//! ```rust,ignore
//! use ambari_inventory::inventory::plugins::create_plugin_from_file;
//!
//! let plugin = create_plugin_from_file(Path::new("prod.ambari.yml"))?;
//! let inventory = plugin.parse().await?;
//! ```

pub mod ambari;
pub mod config;

pub use ambari::{build_inventory, AmbariPlugin, AMBARI_SERVER_GROUP};
pub use config::{
    verify_file, AmbariConfig, AmbariPluginConfig, AmbariPluginConfigBuilder, PluginConfigError,
    PluginConfigResult, Protocol, PLUGIN_NAME,
};

use super::{Inventory, InventoryResult};
use async_trait::async_trait;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

/// Common trait for all dynamic inventory plugins
#[async_trait]
pub trait DynamicInventoryPlugin: Send + Sync + fmt::Debug {
    /// Get the plugin name
    fn name(&self) -> &str;

    /// Get the plugin version
    fn version(&self) -> &str {
        crate::VERSION
    }

    /// Get the plugin description
    fn description(&self) -> &str;

    /// Verify plugin configuration
    fn verify(&self) -> InventoryResult<()>;

    /// Parse and return the inventory
    async fn parse(&self) -> InventoryResult<Inventory>;

    /// Get plugin-specific options documentation
    fn options_documentation(&self) -> Vec<PluginOption>;
}

/// Documentation for a plugin option
#[derive(Debug, Clone)]
pub struct PluginOption {
    /// Option name
    pub name: String,
    /// Option description
    pub description: String,
    /// Whether the option is required
    pub required: bool,
    /// Default value (if any)
    pub default: Option<String>,
    /// Option type
    pub option_type: PluginOptionType,
}

impl PluginOption {
    /// Create a new required string option
    pub fn required_string(name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            required: true,
            default: None,
            option_type: PluginOptionType::String,
        }
    }

    /// Create a new optional string option with default
    pub fn optional_string(name: &str, description: &str, default: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            required: false,
            default: (!default.is_empty()).then(|| default.to_string()),
            option_type: PluginOptionType::String,
        }
    }

    /// Create a new optional boolean option
    pub fn optional_bool(name: &str, description: &str, default: bool) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            required: false,
            default: Some(default.to_string()),
            option_type: PluginOptionType::Bool,
        }
    }
}

impl fmt::Display for PluginOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}", self.name, self.option_type)?;
        if self.required {
            write!(f, ", required")?;
        } else if let Some(default) = &self.default {
            write!(f, ", default: {}", default)?;
        }
        write!(f, "): {}", self.description)
    }
}

/// Type of plugin option
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PluginOptionType {
    /// String value
    String,
    /// Boolean value
    Bool,
    /// Integer value
    Int,
}

impl fmt::Display for PluginOptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PluginOptionType::String => write!(f, "string"),
            PluginOptionType::Bool => write!(f, "bool"),
            PluginOptionType::Int => write!(f, "int"),
        }
    }
}

/// Create a plugin from a configuration file
pub fn create_plugin_from_file(path: &Path) -> InventoryResult<Arc<dyn DynamicInventoryPlugin>> {
    tracing::debug!("Loading inventory source {}", path.display());
    let config = AmbariConfig::from_file(path)?;
    create_plugin_from_config(config)
}

/// Create a plugin from a validated configuration
pub fn create_plugin_from_config(
    config: AmbariConfig,
) -> InventoryResult<Arc<dyn DynamicInventoryPlugin>> {
    let plugin = AmbariPlugin::new(config)?;
    plugin.verify()?;
    Ok(Arc::new(plugin))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_plugin_option_builders() {
        let opt = PluginOption::required_string("hostname", "Ambari server host name");
        assert!(opt.required);
        assert_eq!(opt.option_type, PluginOptionType::String);
        assert_eq!(opt.to_string(), "hostname (string, required): Ambari server host name");

        let opt = PluginOption::optional_bool("validate_ssl", "Validate certificates", false);
        assert!(!opt.required);
        assert_eq!(opt.default, Some("false".to_string()));
        assert_eq!(opt.to_string(), "validate_ssl (bool, default: false): Validate certificates");

        let opt = PluginOption::optional_string("ansible_user", "SSH user", "");
        assert_eq!(opt.default, None);
    }

    #[test]
    fn test_create_plugin_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cluster.ambari.yaml");
        fs::write(
            &path,
            "plugin: ambari\nhostname: ambari.local\nport: 8080\nusername: admin\npassword: admin\n",
        )
        .unwrap();

        let plugin = create_plugin_from_file(&path).unwrap();
        assert_eq!(plugin.name(), "ambari");
        assert_eq!(plugin.version(), crate::VERSION);
    }

    #[test]
    fn test_create_plugin_from_file_rejects_other_plugins() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cluster.ambari.yml");
        fs::write(
            &path,
            "plugin: aws_ec2\nhostname: ambari.local\nport: 8080\nusername: admin\npassword: admin\n",
        )
        .unwrap();

        let err = create_plugin_from_file(&path).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("aws_ec2"));
    }
}
