//! Guest agent configuration document.
//!
//! The document is pushed to a guest's metadata disk as JSON and read back
//! from its `USER_DATA` attribute. Provider-opaque sections stay as
//! [`serde_json::Value`] so unknown keys round-trip untouched.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::SoftLayerError;

/// Configuration consumed by the agent running inside a guest.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct AgentEnv {
    /// Identifier the agent reports to the director.
    pub agent_id: String,
    /// Identity of the guest the document belongs to.
    pub vm: VmIdentity,
    /// Message bus URL.
    pub mbus: String,
    /// NTP servers.
    pub ntp: Vec<String>,
    /// Blobstore settings.
    pub blobstore: Blobstore,
    /// Network settings keyed by network name.
    pub networks: BTreeMap<String, Value>,
    /// Disk layout.
    pub disks: Disks,
    /// Free-form deployment environment.
    pub env: AgentEnvironment,
}

/// Name and provider identifier of a guest.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct VmIdentity {
    /// Guest host name.
    pub name: String,
    /// Guest identifier, as a string.
    pub id: String,
}

/// Blobstore provider and its options.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Blobstore {
    /// Provider name (for example `dav`).
    pub provider: String,
    /// Provider specific options.
    pub options: BTreeMap<String, Value>,
}

/// Disks attached to the guest.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Disks {
    /// System disk device.
    pub system: String,
    /// Ephemeral disk device, when one was ordered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ephemeral: Option<String>,
    /// Persistent disks keyed by disk identifier.
    pub persistent: BTreeMap<String, Value>,
}

/// Deployment environment passed through to the agent.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct AgentEnvironment {
    /// SSH public keys to authorise inside the guest.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ssh_keys: Vec<String>,
    /// Any other environment settings.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl AgentEnv {
    /// Creates an environment for the given agent and guest.
    #[must_use]
    pub fn new(agent_id: impl Into<String>, vm_name: impl Into<String>, vm_id: u64) -> Self {
        Self {
            agent_id: agent_id.into(),
            vm: VmIdentity {
                name: vm_name.into(),
                id: vm_id.to_string(),
            },
            ..Self::default()
        }
    }

    /// Adds SSH public keys not already present, preserving order.
    pub fn merge_ssh_keys<I, S>(&mut self, keys: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for candidate in keys {
            let key = candidate.into();
            if !self.env.ssh_keys.contains(&key) {
                self.env.ssh_keys.push(key);
            }
        }
    }

    /// Sets the ephemeral disk device.
    #[must_use]
    pub fn with_ephemeral_disk(mut self, device: impl Into<String>) -> Self {
        self.disks.ephemeral = Some(device.into());
        self
    }

    /// Serialises the document.
    ///
    /// # Errors
    ///
    /// Returns [`SoftLayerError::Protocol`] when serialisation fails.
    pub fn to_json(&self) -> Result<String, SoftLayerError> {
        serde_json::to_string(self).map_err(|err| SoftLayerError::Protocol {
            message: format!("failed to encode agent env: {err}"),
            payload: String::new(),
        })
    }

    /// Parses a document.
    ///
    /// # Errors
    ///
    /// Returns [`SoftLayerError::Protocol`] when the bytes are not an agent
    /// env document.
    pub fn from_json(bytes: &[u8]) -> Result<Self, SoftLayerError> {
        crate::codec::decode("agent env", bytes)
    }
}
