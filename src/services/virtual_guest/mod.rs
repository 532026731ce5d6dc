//! `SoftLayer_Virtual_Guest` operations.

mod ephemeral_disk;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use chrono::Utc;
use serde_json::{Value, json};
use tracing::{debug, info};

use crate::client::{ApiRequest, SharedClient};
use crate::codec;
use crate::datatypes::{
    ItemPrice, PowerState, ProductOrder, SshKey, Transaction, UserDataAttribute, VirtualGuest,
    VirtualGuestEdit, VirtualGuestTemplate,
};
use crate::error::SoftLayerError;
use crate::services::ProductOrderService;

pub use ephemeral_disk::{
    CapacityExtractor, EPHEMERAL_DISK_CATEGORY_CODE, EphemeralDiskSelector, ItemCapacityExtractor,
    ZeroSizePolicy,
};

const SERVICE: &str = "SoftLayer_Virtual_Guest";

const UPGRADE_ITEM_PRICES_MASK: &str =
    "mask[id,categories[categoryCode],item[id,description,capacity,units]]";

/// Typed operations on a single virtual guest.
#[derive(Clone)]
pub struct VirtualGuestService {
    client: SharedClient,
    disk_selector: EphemeralDiskSelector,
}

impl VirtualGuestService {
    /// Creates the service with the default ephemeral disk selector.
    #[must_use]
    pub fn new(client: SharedClient) -> Self {
        Self {
            client,
            disk_selector: EphemeralDiskSelector::default(),
        }
    }

    /// Replaces the ephemeral disk selector.
    #[must_use]
    pub fn with_disk_selector(mut self, selector: EphemeralDiskSelector) -> Self {
        self.disk_selector = selector;
        self
    }

    /// Returns the selector used for ephemeral disk orders.
    #[must_use]
    pub const fn disk_selector(&self) -> &EphemeralDiskSelector {
        &self.disk_selector
    }

    /// Returns the provider service name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        SERVICE
    }

    async fn call(
        &self,
        method: &str,
        id: Option<u64>,
        parameters: Vec<Value>,
    ) -> Result<Vec<u8>, SoftLayerError> {
        let mut request = ApiRequest::new(SERVICE, method).parameters(parameters);
        if let Some(object_id) = id {
            request = request.object_id(object_id);
        }
        debug!(method, object_id = ?id, "calling {SERVICE}");
        self.client.invoke(&request).await
    }

    async fn call_with_mask(
        &self,
        method: &str,
        id: u64,
        mask: &str,
    ) -> Result<Vec<u8>, SoftLayerError> {
        let request = ApiRequest::new(SERVICE, method)
            .object_id(id)
            .object_mask(mask);
        self.client.invoke(&request).await
    }

    /// Invokes a state-changing method whose provider answer is a boolean.
    /// `false` means the change did not happen and is surfaced as
    /// [`SoftLayerError::Rejected`].
    async fn invoke_action(
        &self,
        id: u64,
        method: &str,
        action: &str,
        parameters: Vec<Value>,
    ) -> Result<bool, SoftLayerError> {
        let body = self.call(method, Some(id), parameters).await?;
        if codec::decode_bool(&format!("{SERVICE}::{method}"), &body)? {
            info!(id, action, "virtual guest action accepted");
            return Ok(true);
        }
        Err(SoftLayerError::Rejected {
            action: action.to_owned(),
            id,
        })
    }

    /// Creates a guest after checking every required template field.
    ///
    /// # Errors
    ///
    /// Returns [`SoftLayerError::Validation`] listing all missing fields
    /// before any remote call, or a remote failure.
    pub async fn create_object(
        &self,
        template: &VirtualGuestTemplate,
    ) -> Result<VirtualGuest, SoftLayerError> {
        template.validate()?;
        let parameter = codec::encode("virtual guest template", template)?;
        let body = self.call("createObject", None, vec![parameter]).await?;
        let guest: VirtualGuest = codec::decode("SoftLayer_Virtual_Guest::createObject", &body)?;
        info!(id = guest.id, hostname = %guest.hostname, "virtual guest created");
        Ok(guest)
    }

    /// Fetches a guest.
    ///
    /// # Errors
    ///
    /// Returns [`SoftLayerError`] when the call fails or cannot be decoded.
    pub async fn get_object(&self, id: u64) -> Result<VirtualGuest, SoftLayerError> {
        let body = self.call("getObject", Some(id), Vec::new()).await?;
        codec::decode("SoftLayer_Virtual_Guest::getObject", &body)
    }

    /// Applies a partial edit. A `false` answer is returned, not raised.
    ///
    /// # Errors
    ///
    /// Returns [`SoftLayerError`] when the call fails or the answer is not a
    /// boolean.
    pub async fn edit_object(&self, id: u64, edit: &VirtualGuestEdit) -> Result<bool, SoftLayerError> {
        let parameter = codec::encode("virtual guest edit", edit)?;
        let body = self.call("editObject", Some(id), vec![parameter]).await?;
        codec::decode_bool("SoftLayer_Virtual_Guest::editObject", &body)
    }

    /// Deletes a guest.
    ///
    /// # Errors
    ///
    /// Returns [`SoftLayerError::Rejected`] when the provider answers `false`.
    pub async fn delete_object(&self, id: u64) -> Result<bool, SoftLayerError> {
        self.invoke_action(id, "deleteObject", "delete", Vec::new())
            .await
    }

    /// Reports the guest's power state.
    ///
    /// # Errors
    ///
    /// Returns [`SoftLayerError`] when the call fails or cannot be decoded.
    pub async fn get_power_state(&self, id: u64) -> Result<PowerState, SoftLayerError> {
        let body = self.call("getPowerState", Some(id), Vec::new()).await?;
        codec::decode("SoftLayer_Virtual_Guest::getPowerState", &body)
    }

    /// Reports the guest's public IP address.
    ///
    /// # Errors
    ///
    /// Returns [`SoftLayerError`] when the call fails.
    pub async fn get_primary_ip_address(&self, id: u64) -> Result<String, SoftLayerError> {
        let body = self.call("getPrimaryIpAddress", Some(id), Vec::new()).await?;
        codec::decode_string("SoftLayer_Virtual_Guest::getPrimaryIpAddress", &body)
    }

    /// Power cycles the guest.
    ///
    /// # Errors
    ///
    /// Returns [`SoftLayerError::Rejected`] when the provider answers `false`.
    pub async fn power_cycle(&self, id: u64) -> Result<bool, SoftLayerError> {
        self.invoke_action(id, "powerCycle", "power cycle", Vec::new())
            .await
    }

    /// Powers the guest off.
    ///
    /// # Errors
    ///
    /// Returns [`SoftLayerError::Rejected`] when the provider answers `false`.
    pub async fn power_off(&self, id: u64) -> Result<bool, SoftLayerError> {
        self.invoke_action(id, "powerOff", "power off", Vec::new())
            .await
    }

    /// Powers the guest off gracefully.
    ///
    /// # Errors
    ///
    /// Returns [`SoftLayerError::Rejected`] when the provider answers `false`.
    pub async fn power_off_soft(&self, id: u64) -> Result<bool, SoftLayerError> {
        self.invoke_action(id, "powerOffSoft", "soft power off", Vec::new())
            .await
    }

    /// Powers the guest on.
    ///
    /// # Errors
    ///
    /// Returns [`SoftLayerError::Rejected`] when the provider answers `false`.
    pub async fn power_on(&self, id: u64) -> Result<bool, SoftLayerError> {
        self.invoke_action(id, "powerOn", "power on", Vec::new())
            .await
    }

    /// Reboots the guest using the provider's default strategy.
    ///
    /// # Errors
    ///
    /// Returns [`SoftLayerError::Rejected`] when the provider answers `false`.
    pub async fn reboot_default(&self, id: u64) -> Result<bool, SoftLayerError> {
        self.invoke_action(id, "rebootDefault", "default reboot", Vec::new())
            .await
    }

    /// Reboots the guest gracefully.
    ///
    /// # Errors
    ///
    /// Returns [`SoftLayerError::Rejected`] when the provider answers `false`.
    pub async fn reboot_soft(&self, id: u64) -> Result<bool, SoftLayerError> {
        self.invoke_action(id, "rebootSoft", "soft reboot", Vec::new())
            .await
    }

    /// Reboots the guest forcefully.
    ///
    /// # Errors
    ///
    /// Returns [`SoftLayerError::Rejected`] when the provider answers `false`.
    pub async fn reboot_hard(&self, id: u64) -> Result<bool, SoftLayerError> {
        self.invoke_action(id, "rebootHard", "hard reboot", Vec::new())
            .await
    }

    /// Writes metadata to the guest's metadata disk. The payload is base64
    /// encoded before transmission.
    ///
    /// # Errors
    ///
    /// Returns [`SoftLayerError::Rejected`] when the provider answers `false`.
    pub async fn set_metadata(&self, id: u64, payload: &str) -> Result<bool, SoftLayerError> {
        let encoded = STANDARD.encode(payload.as_bytes());
        self.invoke_action(
            id,
            "setUserMetadata",
            "set metadata on",
            vec![json!([encoded])],
        )
        .await
    }

    /// Reads the guest's user-data attributes in provider order.
    ///
    /// # Errors
    ///
    /// Returns [`SoftLayerError`] when the call fails or cannot be decoded.
    pub async fn get_user_data(&self, id: u64) -> Result<Vec<UserDataAttribute>, SoftLayerError> {
        let body = self.call("getUserData", Some(id), Vec::new()).await?;
        codec::decode("SoftLayer_Virtual_Guest::getUserData", &body)
    }

    /// Lists the transactions in flight for the guest; empty when quiescent.
    ///
    /// # Errors
    ///
    /// Returns [`SoftLayerError`] when the call fails or cannot be decoded.
    pub async fn get_active_transactions(
        &self,
        id: u64,
    ) -> Result<Vec<Transaction>, SoftLayerError> {
        let body = self.call("getActiveTransactions", Some(id), Vec::new()).await?;
        codec::decode("SoftLayer_Virtual_Guest::getActiveTransactions", &body)
    }

    /// Returns the first transaction in flight for the guest.
    ///
    /// # Errors
    ///
    /// Returns [`SoftLayerError::NoActiveTransaction`] when the guest is
    /// quiescent.
    pub async fn get_active_transaction(&self, id: u64) -> Result<Transaction, SoftLayerError> {
        self.get_active_transactions(id)
            .await?
            .into_iter()
            .next()
            .ok_or(SoftLayerError::NoActiveTransaction { id })
    }

    /// Lists the SSH keys installed on the guest.
    ///
    /// # Errors
    ///
    /// Returns [`SoftLayerError`] when the call fails or cannot be decoded.
    pub async fn get_ssh_keys(&self, id: u64) -> Result<Vec<SshKey>, SoftLayerError> {
        let body = self.call("getSshKeys", Some(id), Vec::new()).await?;
        codec::decode("SoftLayer_Virtual_Guest::getSshKeys", &body)
    }

    /// Reports whether the guest answers pings. Both answers are successful
    /// outcomes.
    ///
    /// # Errors
    ///
    /// Returns the transport failure unchanged, or
    /// [`SoftLayerError::Protocol`] when the answer is not a boolean token.
    pub async fn is_pingable(&self, id: u64) -> Result<bool, SoftLayerError> {
        let body = self.call("isPingable", Some(id), Vec::new()).await?;
        codec::decode_bool("isPingable", &body).map_err(|_| {
            SoftLayerError::protocol("Failed to checking that virtual guest is pingable", &body)
        })
    }

    /// Starts provisioning of the guest's metadata disk.
    ///
    /// # Errors
    ///
    /// Returns [`SoftLayerError`] when the call fails or cannot be decoded.
    pub async fn configure_metadata_disk(&self, id: u64) -> Result<Transaction, SoftLayerError> {
        let body = self.call("configureMetadataDisk", Some(id), Vec::new()).await?;
        codec::decode("SoftLayer_Virtual_Guest::configureMetadataDisk", &body)
    }

    /// Lists the paid upgrades available to the guest.
    ///
    /// # Errors
    ///
    /// Returns [`SoftLayerError`] when the call fails or cannot be decoded.
    pub async fn get_upgrade_item_prices(&self, id: u64) -> Result<Vec<ItemPrice>, SoftLayerError> {
        let body = self
            .call_with_mask("getUpgradeItemPrices", id, UPGRADE_ITEM_PRICES_MASK)
            .await?;
        codec::decode("SoftLayer_Virtual_Guest::getUpgradeItemPrices", &body)
    }

    /// Orders the smallest ephemeral disk tier that holds `size_gb`.
    ///
    /// # Errors
    ///
    /// Returns [`SoftLayerError::Validation`] for negative sizes,
    /// [`SoftLayerError::Capacity`] when no tier is large enough, or a remote
    /// failure from the price query or order placement.
    pub async fn attach_ephemeral_disk(&self, id: u64, size_gb: i64) -> Result<(), SoftLayerError> {
        let Some(requested) = self.disk_selector.requested_size(size_gb)? else {
            debug!(id, "no ephemeral disk requested");
            return Ok(());
        };

        let prices = self.get_upgrade_item_prices(id).await?;
        let price = self
            .disk_selector
            .select(&prices, requested)
            .ok_or(SoftLayerError::Capacity { size_gb })?;

        let order = ProductOrder::guest_upgrade(id, price, Utc::now().fixed_offset());
        ProductOrderService::new(self.client.clone())
            .place_order(&order)
            .await?;
        info!(id, size_gb, price_id = price.id, "ephemeral disk ordered");
        Ok(())
    }
}

#[cfg(test)]
mod tests;
