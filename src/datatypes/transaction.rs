use serde::{Deserialize, Serialize};

use super::Timestamp;
use crate::codec::null_as_default;

/// A provider-tracked unit of asynchronous work against a guest.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Transaction {
    /// Transaction identifier.
    pub id: u64,
    /// Guest the transaction applies to.
    pub guest_id: u64,
    /// Hardware the transaction applies to, zero for virtual guests.
    #[serde(deserialize_with = "null_as_default")]
    pub hardware_id: u64,
    /// Creation time.
    pub create_date: Option<Timestamp>,
    /// Last modification time.
    pub modify_date: Option<Timestamp>,
    /// Time of the last status change.
    pub status_change_date: Option<Timestamp>,
    /// Seconds elapsed since the transaction started.
    pub elapsed_seconds: u64,
    /// Group describing the overall operation.
    pub transaction_group: TransactionGroup,
    /// Current step of the operation.
    pub transaction_status: TransactionStatus,
}

/// Operation a transaction belongs to.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct TransactionGroup {
    /// Operation name.
    pub name: String,
    /// Average completion time as reported by the provider (minutes, decimal string).
    pub average_time_to_complete: String,
}

/// Current step of a transaction.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct TransactionStatus {
    /// Machine readable step name.
    pub name: String,
    /// Human readable step name.
    pub friendly_name: String,
    /// Average step duration (decimal string).
    pub average_duration: String,
}
