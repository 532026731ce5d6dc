//! Stemcell (image template) handles and lookup.

use tracing::{debug, info};

use crate::client::{ClientFuture, SharedClient};
use crate::error::SoftLayerError;
use crate::services::{AccountService, ImageTemplateService};

/// A stemcell known to exist in the account.
#[derive(Clone)]
pub struct Stemcell {
    id: u64,
    uuid: String,
    service: ImageTemplateService,
}

impl std::fmt::Debug for Stemcell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stemcell")
            .field("id", &self.id)
            .field("uuid", &self.uuid)
            .finish_non_exhaustive()
    }
}

impl Stemcell {
    /// Creates a handle for an image template.
    #[must_use]
    pub fn new(id: u64, uuid: impl Into<String>, client: SharedClient) -> Self {
        Self {
            id,
            uuid: uuid.into(),
            service: ImageTemplateService::new(client),
        }
    }

    /// Image template identifier.
    #[must_use]
    pub const fn id(&self) -> u64 {
        self.id
    }

    /// Global identifier used when booting guests from this stemcell.
    #[must_use]
    pub fn uuid(&self) -> &str {
        &self.uuid
    }

    /// Deletes the image template.
    ///
    /// # Errors
    ///
    /// Returns the provider failure, including a `false` answer.
    pub async fn delete(&self) -> Result<(), SoftLayerError> {
        let transaction = self.service.delete_object(self.id).await?;
        info!(
            id = self.id,
            transaction_id = transaction.map(|txn| txn.id),
            "stemcell deleted"
        );
        Ok(())
    }
}

/// Looks up stemcells by identifier.
pub trait StemcellFinder: Send + Sync {
    /// Finds the stemcell with the given identifier; `Ok(None)` when absent.
    fn find_by_id(&self, id: u64) -> ClientFuture<'_, Option<Stemcell>>;
}

/// Finder backed by the account's image template listing.
#[derive(Clone)]
pub struct SoftLayerStemcellFinder {
    client: SharedClient,
    account: AccountService,
}

impl SoftLayerStemcellFinder {
    /// Creates the finder.
    #[must_use]
    pub fn new(client: SharedClient) -> Self {
        Self {
            account: AccountService::new(client.clone()),
            client,
        }
    }

    async fn find_stemcell(&self, id: u64) -> Result<Option<Stemcell>, SoftLayerError> {
        let groups = self.account.get_block_device_template_groups().await?;
        debug!(id, listed = groups.len(), "searching account image templates");
        Ok(groups
            .into_iter()
            .find(|group| group.id == id)
            .map(|group| Stemcell::new(group.id, group.global_identifier, self.client.clone())))
    }
}

impl StemcellFinder for SoftLayerStemcellFinder {
    fn find_by_id(&self, id: u64) -> ClientFuture<'_, Option<Stemcell>> {
        Box::pin(self.find_stemcell(id))
    }
}
