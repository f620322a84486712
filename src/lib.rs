//! # ambari-inventory - Ansible dynamic inventory for Apache Ambari
//!
//! Reads a YAML configuration file named `*ambari.yml` (or `*ambari.yaml`),
//! queries an Ambari server over its REST API for the hosts of the managed
//! cluster, and maps them into an Ansible inventory whose hosts carry the
//! configured SSH connection variables.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌──────────────────┐   ┌──────────────────┐   ┌──────────────────┐   ┌──────────────────┐
//! │  Plugin config   │──►│  Ambari client   │──►│ Inventory mapper │──►│   CLI output     │
//! │ (*ambari.yml)    │   │ (REST, reqwest)  │   │ (groups + vars)  │   │ (--list/--host)  │
//! └──────────────────┘   └──────────────────┘   └──────────────────┘   └──────────────────┘
//! ```
//!
//! ## Quick Example
//!
//! ```rust,ignore
//! use ambari_inventory::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> InventoryResult<()> {
//!     let plugin = create_plugin_from_file(Path::new("prod.ambari.yml"))?;
//!     let inventory = plugin.parse().await?;
//!     println!("{}", serde_json::to_string_pretty(&inventory.to_ansible_json())?);
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod prelude {
    //! Convenient re-exports of commonly used types and traits.

    pub use crate::ambari::{AmbariClient, AmbariError, AmbariResult, ClusterSnapshot};
    pub use crate::inventory::plugins::{
        create_plugin_from_config, create_plugin_from_file, verify_file, AmbariConfig,
        AmbariPlugin, AmbariPluginConfig, DynamicInventoryPlugin, PluginConfigError, Protocol,
    };
    pub use crate::inventory::{Group, Host, Inventory, InventoryError, InventoryResult};
}

/// Client for the Apache Ambari REST API.
///
/// Talks to `/api/v1` with HTTP basic authentication and collects everything
/// the inventory needs into a [`ClusterSnapshot`](ambari::ClusterSnapshot).
pub mod ambari;

/// Host and group inventory model, plus the Ambari dynamic inventory plugin.
pub mod inventory;

/// Current version of the crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
