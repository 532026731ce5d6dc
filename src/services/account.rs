//! `SoftLayer_Account` listing calls.

use crate::client::{ApiRequest, SharedClient};
use crate::codec;
use crate::datatypes::{BlockDeviceTemplateGroup, VirtualGuest};
use crate::error::SoftLayerError;

const SERVICE: &str = "SoftLayer_Account";

const VIRTUAL_GUEST_MASK: &str = concat!(
    "mask[id,hostname,domain,fullyQualifiedDomainName,startCpus,maxMemory,",
    "primaryIpAddress,primaryBackendIpAddress,createDate,modifyDate,globalIdentifier]"
);

/// Account-wide listings.
///
/// Listings are the only view guaranteed to include very recently created
/// objects, which is why finders use them instead of per-id fetches.
#[derive(Clone)]
pub struct AccountService {
    client: SharedClient,
}

impl AccountService {
    /// Creates the service.
    #[must_use]
    pub const fn new(client: SharedClient) -> Self {
        Self { client }
    }

    /// Returns the provider service name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        SERVICE
    }

    /// Lists every virtual guest in the account.
    ///
    /// # Errors
    ///
    /// Returns [`SoftLayerError`] when the call fails or cannot be decoded.
    pub async fn get_virtual_guests(&self) -> Result<Vec<VirtualGuest>, SoftLayerError> {
        let request = ApiRequest::new(SERVICE, "getVirtualGuests").object_mask(VIRTUAL_GUEST_MASK);
        let body = self.client.invoke(&request).await?;
        codec::decode("SoftLayer_Account::getVirtualGuests", &body)
    }

    /// Lists every private image template in the account.
    ///
    /// # Errors
    ///
    /// Returns [`SoftLayerError`] when the call fails or cannot be decoded.
    pub async fn get_block_device_template_groups(
        &self,
    ) -> Result<Vec<BlockDeviceTemplateGroup>, SoftLayerError> {
        let request = ApiRequest::new(SERVICE, "getBlockDeviceTemplateGroups");
        let body = self.client.invoke(&request).await?;
        codec::decode("SoftLayer_Account::getBlockDeviceTemplateGroups", &body)
    }
}
