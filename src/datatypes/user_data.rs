use serde::{Deserialize, Serialize};

/// A user-data record attached to a guest.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct UserDataAttribute {
    /// Opaque payload, base64 encoded by convention.
    pub value: String,
    /// Kind of record.
    #[serde(rename = "type")]
    pub attribute_type: UserDataAttributeType,
}

/// Kind of a user-data record.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct UserDataAttributeType {
    /// Human readable name (for example `User Data`).
    pub name: String,
    /// Machine readable key (for example `USER_DATA`).
    pub keyname: String,
}
