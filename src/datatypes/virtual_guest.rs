use serde::{Deserialize, Serialize};

use super::Timestamp;
use crate::codec::null_as_default;
use crate::error::SoftLayerError;

/// A provisioned virtual guest as reported by the provider.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct VirtualGuest {
    /// Provider assigned identifier.
    pub id: u64,
    /// Owning account identifier.
    #[serde(deserialize_with = "null_as_default")]
    pub account_id: u64,
    /// Short host name.
    pub hostname: String,
    /// DNS domain.
    pub domain: String,
    /// Host name joined with the domain, derived by the provider.
    pub fully_qualified_domain_name: String,
    /// CPU count requested at creation.
    #[serde(deserialize_with = "null_as_default")]
    pub start_cpus: u32,
    /// Maximum CPU count.
    #[serde(deserialize_with = "null_as_default")]
    pub max_cpu: u32,
    /// Unit for `max_cpu` (for example `CORE`).
    pub max_cpu_units: String,
    /// Memory in megabytes.
    #[serde(deserialize_with = "null_as_default")]
    pub max_memory: u32,
    /// Free-form notes.
    pub notes: String,
    /// Whether the guest is billed hourly.
    pub hourly_billing_flag: bool,
    /// Whether the guest uses local rather than SAN disks.
    pub local_disk_flag: bool,
    /// Whether the guest runs on an account-dedicated host.
    pub dedicated_account_host_only_flag: bool,
    /// Public IPv4 address.
    pub primary_ip_address: String,
    /// Private IPv4 address.
    pub primary_backend_ip_address: String,
    /// Creation time.
    pub create_date: Option<Timestamp>,
    /// Last modification time.
    pub modify_date: Option<Timestamp>,
    /// Last verification time; absent when never verified.
    pub last_verified_date: Option<Timestamp>,
    /// Last metric poll time.
    pub metric_poll_date: Option<Timestamp>,
    /// Provider status identifier.
    #[serde(deserialize_with = "null_as_default")]
    pub status_id: u64,
    /// Last observed power state identifier.
    #[serde(deserialize_with = "null_as_default")]
    pub last_power_state_id: u64,
    /// Hypervisor UUID.
    pub uuid: String,
    /// Global identifier.
    pub global_identifier: String,
    /// Placement location.
    pub location: Location,
    /// Datacenter, when the response includes it.
    pub datacenter: Option<Datacenter>,
    /// Installed operating system.
    pub operating_system: Option<OperatingSystem>,
}

/// A datacenter referenced by name.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Datacenter {
    /// Short datacenter name (for example `ams01`).
    pub name: String,
}

/// Placement location of a guest.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Location {
    /// Location identifier.
    pub id: u64,
    /// Short name.
    pub name: String,
    /// Descriptive name.
    pub long_name: String,
}

/// Operating system installed on a guest.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct OperatingSystem {
    /// Credentials provisioned for the operating system.
    pub passwords: Vec<Password>,
}

/// Operating system credential.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Password {
    /// Account name.
    pub username: String,
    /// Account password.
    pub password: String,
}

/// Power state of a guest.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct PowerState {
    /// Machine readable state (for example `RUNNING`, `HALTED`).
    pub key_name: String,
    /// Human readable state.
    pub name: String,
}

/// User data entry attached to a creation request.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct TemplateUserData {
    /// Payload delivered to the guest.
    pub value: String,
}

/// Creation request for a new virtual guest.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VirtualGuestTemplate {
    /// Short host name. Required.
    pub hostname: String,
    /// DNS domain. Required.
    pub domain: String,
    /// CPU count. Required.
    pub start_cpus: u32,
    /// Memory in megabytes. Required.
    pub max_memory: u32,
    /// Target datacenter. Required.
    pub datacenter: Datacenter,
    /// Whether to bill hourly.
    pub hourly_billing_flag: bool,
    /// Whether to use local disks.
    pub local_disk_flag: bool,
    /// Whether to run on an account-dedicated host.
    pub dedicated_account_host_only_flag: bool,
    /// Whether the guest only gets a private network.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub private_network_only_flag: bool,
    /// Operating system reference code, when booting a stock image.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operating_system_reference_code: Option<String>,
    /// Image template to boot from, referenced by global identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_device_template_group: Option<TemplateGroupReference>,
    /// SSH keys to install, referenced by identifier.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ssh_keys: Vec<SshKeyReference>,
    /// User data delivered on first boot.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub user_data: Vec<TemplateUserData>,
}

/// Reference to an image template by global identifier.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TemplateGroupReference {
    /// Global identifier of the image template.
    pub global_identifier: String,
}

/// Reference to an SSH key by identifier.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct SshKeyReference {
    /// Key identifier.
    pub id: u64,
}

impl VirtualGuestTemplate {
    /// Checks that every required field is present.
    ///
    /// All missing fields are reported together so callers can fix them in
    /// one pass.
    ///
    /// # Errors
    ///
    /// Returns [`SoftLayerError::Validation`] naming each missing field.
    pub fn validate(&self) -> Result<(), SoftLayerError> {
        let checks = [
            ("Hostname", self.hostname.trim().is_empty()),
            ("Domain", self.domain.trim().is_empty()),
            ("StartCpus", self.start_cpus == 0),
            ("MaxMemory", self.max_memory == 0),
            ("Datacenter", self.datacenter.name.trim().is_empty()),
        ];
        let missing: Vec<&str> = checks
            .iter()
            .filter(|(_, absent)| *absent)
            .map(|(field, _)| *field)
            .collect();

        if missing.is_empty() {
            return Ok(());
        }
        Err(SoftLayerError::Validation(format!(
            "missing required fields for SoftLayer_Virtual_Guest::createObject: {}",
            missing.join(", ")
        )))
    }

    /// Boots the guest from the given image template.
    #[must_use]
    pub fn with_image_template(mut self, global_identifier: impl Into<String>) -> Self {
        self.block_device_template_group = Some(TemplateGroupReference {
            global_identifier: global_identifier.into(),
        });
        self
    }
}

/// Partial update applied through `editObject`. Unset fields are untouched.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VirtualGuestEdit {
    /// New host name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    /// New domain.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    /// New notes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}
