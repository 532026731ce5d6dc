//! Virtual guest lookup by identifier.

use std::sync::Arc;

use tracing::debug;

use super::{SoftLayerAgentEnvServiceFactory, Vm};
use crate::client::{ClientFuture, SharedClient};
use crate::error::SoftLayerError;
use crate::services::AccountService;
use crate::transactions::PollPolicy;

/// Looks up guests by identifier.
///
/// `Ok(None)` means the provider does not know the guest; `Err` means the
/// lookup itself failed and nothing can be said about existence.
pub trait Finder: Send + Sync {
    /// Finds the guest with the given identifier.
    fn find(&self, id: u64) -> ClientFuture<'_, Option<Vm>>;
}

/// Finder backed by the account's guest listing.
///
/// Per-id fetches can fail for guests that are still provisioning, so the
/// listing is the source of truth.
#[derive(Clone)]
pub struct SoftLayerFinder {
    client: SharedClient,
    account: AccountService,
    agent_env_factory: SoftLayerAgentEnvServiceFactory,
    policy: PollPolicy,
}

impl SoftLayerFinder {
    /// Creates a finder; found guests inherit the poll policy.
    #[must_use]
    pub fn new(client: SharedClient, policy: PollPolicy) -> Self {
        Self {
            account: AccountService::new(client.clone()),
            agent_env_factory: SoftLayerAgentEnvServiceFactory::new(client.clone(), policy),
            client,
            policy,
        }
    }

    async fn find_vm(&self, id: u64) -> Result<Option<Vm>, SoftLayerError> {
        let guests = self.account.get_virtual_guests().await?;
        debug!(id, listed = guests.len(), "searching account guests");
        Ok(guests.iter().any(|guest| guest.id == id).then(|| {
            Vm::new(
                id,
                self.client.clone(),
                Arc::new(self.agent_env_factory.new_service(id)),
                self.policy,
            )
        }))
    }
}

impl Finder for SoftLayerFinder {
    fn find(&self, id: u64) -> ClientFuture<'_, Option<Vm>> {
        Box::pin(self.find_vm(id))
    }
}
