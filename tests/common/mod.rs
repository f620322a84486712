//! Shared fixtures for the ambari-inventory test suite.
//!
//! - [`MockAmbari`]: a wiremock server answering the Ambari REST API
//! - [`write_config`]: writes a plugin configuration file pointing at it
//!
//! ```rust,ignore
//! mod common;
//! use common::*;
//! ```

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const CLUSTER: &str = "makayel";
pub const USERNAME: &str = "localuser";
pub const PASSWORD: &str = "localpass";
pub const SSH_USER: &str = "nodesuser";
pub const SSH_PASS: &str = "nodespass";

/// One cluster member served by the mock
#[derive(Debug, Clone)]
pub struct MockHost {
    pub name: &'static str,
    pub status: &'static str,
    pub components: Vec<&'static str>,
}

impl MockHost {
    pub fn healthy(name: &'static str, components: &[&'static str]) -> Self {
        Self {
            name,
            status: "HEALTHY",
            components: components.to_vec(),
        }
    }

    pub fn unhealthy(name: &'static str, components: &[&'static str]) -> Self {
        Self {
            name,
            status: "UNHEALTHY",
            components: components.to_vec(),
        }
    }
}

/// Wiremock server speaking the Ambari REST API
pub struct MockAmbari {
    pub server: MockServer,
}

impl MockAmbari {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn port(&self) -> u16 {
        self.server.address().port()
    }

    pub fn base_url(&self) -> String {
        self.server.uri()
    }

    /// Serve a cluster with HDFS and ZOOKEEPER installed on `hosts`
    pub async fn mount_cluster(&self, hosts: &[MockHost]) {
        self.mount_clusters(&[CLUSTER]).await;

        Mock::given(method("GET"))
            .and(path(format!("/api/v1/clusters/{}/services", CLUSTER)))
            .respond_with(ResponseTemplate::new(200).set_body_json(services_body()))
            .mount(&self.server)
            .await;

        Mock::given(method("GET"))
            .and(path(format!(
                "/api/v1/clusters/{}/configurations/service_config_versions",
                CLUSTER
            )))
            .and(query_param("service_name.in(HDFS)", ""))
            .respond_with(ResponseTemplate::new(200).set_body_json(hdfs_config_body()))
            .mount(&self.server)
            .await;

        Mock::given(method("GET"))
            .and(path(format!(
                "/api/v1/clusters/{}/configurations/service_config_versions",
                CLUSTER
            )))
            .and(query_param("service_name.in(ZOOKEEPER)", ""))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
            .mount(&self.server)
            .await;

        let items: Vec<Value> = hosts
            .iter()
            .map(|h| json!({"Hosts": {"host_name": h.name, "host_status": h.status}}))
            .collect();
        Mock::given(method("GET"))
            .and(path(format!("/api/v1/clusters/{}/hosts", CLUSTER)))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": items })))
            .mount(&self.server)
            .await;

        for (index, host) in hosts.iter().enumerate() {
            Mock::given(method("GET"))
                .and(path(format!("/api/v1/hosts/{}", host.name)))
                .respond_with(
                    ResponseTemplate::new(200).set_body_json(host_detail_body(host, index)),
                )
                .mount(&self.server)
                .await;

            let components: Vec<Value> = host
                .components
                .iter()
                .map(|c| {
                    json!({"HostRoles": {
                        "cluster_name": CLUSTER,
                        "component_name": c,
                        "host_name": host.name
                    }})
                })
                .collect();
            Mock::given(method("GET"))
                .and(path(format!(
                    "/api/v1/clusters/{}/hosts/{}/host_components",
                    CLUSTER, host.name
                )))
                .respond_with(
                    ResponseTemplate::new(200).set_body_json(json!({ "items": components })),
                )
                .mount(&self.server)
                .await;
        }
    }

    /// Serve `GET /clusters` only
    pub async fn mount_clusters(&self, names: &[&str]) {
        let items: Vec<Value> = names
            .iter()
            .map(|n| json!({"Clusters": {"cluster_name": n, "version": "HDP-3.1"}}))
            .collect();
        Mock::given(method("GET"))
            .and(path("/api/v1/clusters"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": items })))
            .mount(&self.server)
            .await;
    }

    /// Answer every request with `status`
    pub async fn mount_status(&self, status: u16) {
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(status).set_body_string("server says no"))
            .mount(&self.server)
            .await;
    }
}

fn services_body() -> Value {
    json!({
        "items": [
            {
                "ServiceInfo": {"cluster_name": CLUSTER, "service_name": "HDFS"},
                "components": [
                    {"ServiceComponentInfo": {"component_name": "DATANODE", "service_name": "HDFS"}},
                    {"ServiceComponentInfo": {"component_name": "NAMENODE", "service_name": "HDFS"}}
                ]
            },
            {
                "ServiceInfo": {"cluster_name": CLUSTER, "service_name": "ZOOKEEPER"},
                "components": [
                    {"ServiceComponentInfo": {"component_name": "ZOOKEEPER_SERVER", "service_name": "ZOOKEEPER"}}
                ]
            }
        ]
    })
}

fn hdfs_config_body() -> Value {
    json!({
        "items": [
            {
                "service_name": "HDFS",
                "group_name": "Default",
                "is_current": true,
                "configurations": [
                    {"type": "hdfs-site", "tag": "version1", "properties": {"dfs.replication": "3"}},
                    {"type": "core-site", "tag": "version1", "properties": {"fs.defaultFS": "hdfs://node1:8020"}}
                ]
            }
        ]
    })
}

fn host_detail_body(host: &MockHost, index: usize) -> Value {
    json!({
        "href": format!("http://ambari/api/v1/hosts/{}", host.name),
        "Hosts": {
            "cluster_name": CLUSTER,
            "cpu_count": 4,
            "desired_configs": null,
            "host_name": host.name,
            "host_status": host.status,
            "ip": format!("10.0.0.{}", 11 + index),
            "last_heartbeat_time": 1_700_000_000_000u64,
            "os_type": "centos7",
            "public_host_name": host.name,
            "rack_info": "/default-rack"
        }
    })
}

/// Write a plugin configuration for a server on `127.0.0.1:port`
pub fn write_config(dir: &Path, file_name: &str, port: u16, extra: &str) -> PathBuf {
    let path = dir.join(file_name);
    let content = format!(
        "plugin: ambari\nhostname: 127.0.0.1\nport: {}\nusername: {}\npassword: {}\nprotocol: http\nvalidate_ssl: False\nansible_user: {}\nansible_ssh_pass: {}\n{}",
        port, USERNAME, PASSWORD, SSH_USER, SSH_PASS, extra
    );
    fs::write(&path, content).unwrap();
    path
}

/// A local port nothing listens on
pub fn closed_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}
