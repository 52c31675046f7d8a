//! Ansible dynamic-inventory document and the builder that fills it.

use indexmap::IndexMap;
use serde::Serialize;

use crate::config::InventoryConfig;
use crate::error::InventoryError;
use crate::instance::Instance;
use crate::providers::{DescribeRequest, InstanceSource};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Inventory {
    pub all: Group,
    #[serde(rename = "_meta")]
    pub meta: Meta,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Group {
    pub hosts: Vec<String>,
    pub vars: IndexMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Meta {
    pub hostvars: IndexMap<String, HostVars>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HostVars {
    pub ansible_host: String,
    pub ansible_ssh_private_key_file: String,
    pub ansible_user: String,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one instance. Returns `false` if its host id was already present.
    pub fn add_instance(&mut self, instance: &Instance, config: &InventoryConfig) -> bool {
        let host = instance.host_id();
        if self.meta.hostvars.contains_key(host) {
            return false;
        }

        self.all.hosts.push(host.to_string());
        self.meta.hostvars.insert(
            host.to_string(),
            HostVars {
                ansible_host: instance.address().to_string(),
                ansible_ssh_private_key_file: config.ssh_private_key_file.clone(),
                ansible_user: config.ssh_user.clone(),
            },
        );
        true
    }

    pub fn host_vars(&self, host: &str) -> Option<&HostVars> {
        self.meta.hostvars.get(host)
    }
}

/// Resolves credentials, lists tagged instances once and reshapes them.
///
/// Fails with [`InventoryError::Config`] before touching `source` when a
/// credential is missing or empty.
pub async fn build_inventory(
    config: &InventoryConfig,
    source: &dyn InstanceSource,
) -> Result<Inventory, InventoryError> {
    let credentials = config.credentials()?;

    let request = DescribeRequest {
        credentials,
        region: config.region.clone(),
        tag_filter: config.tag_filter.clone(),
    };

    let instances = source.describe_instances(&request).await?;

    let mut inventory = Inventory::new();
    for instance in &instances {
        if !inventory.add_instance(instance, config) {
            tracing::warn!(
                host = instance.host_id(),
                instance_id = %instance.instance_id,
                "duplicate host id, keeping first instance"
            );
        }
    }

    tracing::info!(
        source = source.name(),
        hosts = inventory.all.hosts.len(),
        "inventory built"
    );

    Ok(inventory)
}
