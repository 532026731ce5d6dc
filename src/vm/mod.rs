//! Virtual machine handles and lookup.

mod agent_env_service;
mod finder;

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use tracing::info;

use crate::client::SharedClient;
use crate::error::SoftLayerError;
use crate::services::VirtualGuestService;
use crate::transactions::{PollPolicy, TransactionTracker};

pub use agent_env_service::{
    AgentEnvService, SoftLayerAgentEnvService, SoftLayerAgentEnvServiceFactory, USER_DATA_KEYNAME,
};
pub use finder::{Finder, SoftLayerFinder};

/// Key/value metadata attached to a guest by the orchestrator.
pub type VmMetadata = BTreeMap<String, String>;

/// A virtual guest known to exist, bound to its identifier.
#[derive(Clone)]
pub struct Vm {
    id: u64,
    service: VirtualGuestService,
    tracker: TransactionTracker,
    agent_env: Arc<dyn AgentEnvService>,
    policy: PollPolicy,
}

impl fmt::Debug for Vm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Vm").field("id", &self.id).finish_non_exhaustive()
    }
}

impl Vm {
    /// Creates a handle for the given guest.
    #[must_use]
    pub fn new(
        id: u64,
        client: SharedClient,
        agent_env: Arc<dyn AgentEnvService>,
        policy: PollPolicy,
    ) -> Self {
        let service = VirtualGuestService::new(client);
        Self {
            id,
            tracker: TransactionTracker::new(service.clone()),
            service,
            agent_env,
            policy,
        }
    }

    /// Provider identifier of the guest.
    #[must_use]
    pub const fn id(&self) -> u64 {
        self.id
    }

    /// Agent environment of the guest.
    #[must_use]
    pub fn agent_env(&self) -> &dyn AgentEnvService {
        self.agent_env.as_ref()
    }

    /// Deletes the guest once it has no work in flight.
    ///
    /// # Errors
    ///
    /// Returns the wait or delete failure.
    pub async fn delete(&self) -> Result<(), SoftLayerError> {
        self.tracker
            .wait_until_quiescent(self.id, &self.policy)
            .await?;
        self.service.delete_object(self.id).await?;
        info!(id = self.id, "virtual guest deleted");
        Ok(())
    }

    /// Soft reboots the guest.
    ///
    /// # Errors
    ///
    /// Returns [`SoftLayerError::Rejected`] when the provider refuses.
    pub async fn reboot(&self) -> Result<(), SoftLayerError> {
        self.service.reboot_soft(self.id).await?;
        Ok(())
    }

    /// Writes orchestrator metadata to the guest.
    ///
    /// # Errors
    ///
    /// Returns [`SoftLayerError::Rejected`] when the provider refuses.
    pub async fn set_metadata(&self, metadata: &VmMetadata) -> Result<(), SoftLayerError> {
        let payload = serde_json::to_string(metadata).map_err(|err| SoftLayerError::Protocol {
            message: format!("failed to encode vm metadata: {err}"),
            payload: String::new(),
        })?;
        self.service.set_metadata(self.id, &payload).await?;
        Ok(())
    }

    /// Orders an ephemeral disk and waits for the upgrade to finish.
    ///
    /// # Errors
    ///
    /// Returns the selection, order, or wait failure.
    pub async fn attach_ephemeral_disk(&self, size_gb: i64) -> Result<(), SoftLayerError> {
        self.service.attach_ephemeral_disk(self.id, size_gb).await?;
        self.wait_until_ready().await
    }

    /// Waits until the guest has no active transactions.
    ///
    /// # Errors
    ///
    /// Returns [`SoftLayerError::Timeout`] when the poll policy runs out.
    pub async fn wait_until_ready(&self) -> Result<(), SoftLayerError> {
        self.tracker
            .wait_until_quiescent(self.id, &self.policy)
            .await
    }
}
