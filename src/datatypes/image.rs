use serde::{Deserialize, Serialize};

use super::Timestamp;

/// Image template (stemcell) stored in the account.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct BlockDeviceTemplateGroup {
    /// Template identifier.
    pub id: u64,
    /// Template name.
    pub name: String,
    /// Global identifier used when booting guests from the template.
    pub global_identifier: String,
    /// Owning account.
    pub account_id: u64,
    /// Provider status identifier.
    pub status_id: u64,
    /// Creation time.
    pub create_date: Option<Timestamp>,
}
