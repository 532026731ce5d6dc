use serde::{Deserialize, Serialize};

use super::Timestamp;

/// SSH public key registered with the account.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct SshKey {
    /// Key identifier.
    pub id: u64,
    /// Label given when the key was registered.
    pub label: String,
    /// Key fingerprint.
    pub fingerprint: String,
    /// Public key material.
    pub key: String,
    /// Registration time.
    pub create_date: Option<Timestamp>,
    /// Last modification time.
    pub modify_date: Option<Timestamp>,
}
