//! `SoftLayer_Virtual_Guest_Block_Device_Template_Group` calls.

use crate::client::{ApiRequest, SharedClient};
use crate::codec;
use crate::datatypes::Transaction;
use crate::error::SoftLayerError;

const SERVICE: &str = "SoftLayer_Virtual_Guest_Block_Device_Template_Group";

/// Manages image templates (stemcells).
#[derive(Clone)]
pub struct ImageTemplateService {
    client: SharedClient,
}

impl ImageTemplateService {
    /// Creates the service.
    #[must_use]
    pub const fn new(client: SharedClient) -> Self {
        Self { client }
    }

    /// Deletes an image template.
    ///
    /// The provider answers with the deletion transaction, or with a bare
    /// boolean on older endpoints; `false` is an error.
    ///
    /// # Errors
    ///
    /// Returns [`SoftLayerError::Rejected`] when the provider answers `false`
    /// and [`SoftLayerError::Protocol`] for any other unexpected payload.
    pub async fn delete_object(&self, id: u64) -> Result<Option<Transaction>, SoftLayerError> {
        let request = ApiRequest::new(SERVICE, "deleteObject").object_id(id);
        let body = self.client.invoke(&request).await?;
        match codec::decode_bool("deleteObject", &body) {
            Ok(true) => Ok(None),
            Ok(false) => Err(SoftLayerError::Rejected {
                action: String::from("delete image template of"),
                id,
            }),
            Err(_) => codec::decode(&format!("{SERVICE}::deleteObject"), &body).map(Some),
        }
    }
}
