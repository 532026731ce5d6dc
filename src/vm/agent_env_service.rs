//! Reads and writes a guest's agent environment.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use tracing::{debug, info};

use crate::agent_env::AgentEnv;
use crate::client::{ClientFuture, SharedClient};
use crate::error::SoftLayerError;
use crate::services::VirtualGuestService;
use crate::transactions::{PollPolicy, TransactionTracker};

/// User-data attribute keyname carrying the agent environment.
pub const USER_DATA_KEYNAME: &str = "USER_DATA";

/// Access to the agent environment of one guest.
pub trait AgentEnvService: Send + Sync {
    /// Reads the environment currently attached to the guest.
    fn fetch(&self) -> ClientFuture<'_, AgentEnv>;

    /// Replaces the environment attached to the guest.
    fn update<'a>(&'a self, env: &'a AgentEnv) -> ClientFuture<'a, ()>;
}

/// Agent environment stored in the guest's user data and metadata disk.
#[derive(Clone)]
pub struct SoftLayerAgentEnvService {
    vm_id: u64,
    service: VirtualGuestService,
    tracker: TransactionTracker,
    policy: PollPolicy,
}

impl SoftLayerAgentEnvService {
    /// Creates the service for one guest.
    #[must_use]
    pub fn new(vm_id: u64, client: SharedClient, policy: PollPolicy) -> Self {
        let service = VirtualGuestService::new(client);
        Self {
            vm_id,
            tracker: TransactionTracker::new(service.clone()),
            service,
            policy,
        }
    }

    /// Guest this service is bound to.
    #[must_use]
    pub const fn vm_id(&self) -> u64 {
        self.vm_id
    }

    async fn fetch_env(&self) -> Result<AgentEnv, SoftLayerError> {
        let attributes = self.service.get_user_data(self.vm_id).await?;
        let attribute = attributes
            .iter()
            .find(|attribute| attribute.attribute_type.keyname == USER_DATA_KEYNAME)
            .ok_or_else(|| SoftLayerError::UserDataMissing {
                id: self.vm_id,
                keyname: USER_DATA_KEYNAME.to_owned(),
            })?;

        let decoded = STANDARD.decode(attribute.value.trim()).map_err(|err| {
            SoftLayerError::protocol(
                format!("failed to base64 decode {USER_DATA_KEYNAME}: {err}"),
                attribute.value.as_bytes(),
            )
        })?;
        AgentEnv::from_json(&decoded)
    }

    async fn update_env(&self, env: &AgentEnv) -> Result<(), SoftLayerError> {
        let keys = self.service.get_ssh_keys(self.vm_id).await?;
        let mut document = env.clone();
        document.merge_ssh_keys(keys.into_iter().map(|key| key.key));

        self.service
            .set_metadata(self.vm_id, &document.to_json()?)
            .await?;
        let transaction = self.service.configure_metadata_disk(self.vm_id).await?;
        debug!(
            vm_id = self.vm_id,
            transaction_id = transaction.id,
            "metadata disk configuration started"
        );
        self.tracker
            .wait_until_quiescent(self.vm_id, &self.policy)
            .await?;
        info!(vm_id = self.vm_id, "agent env updated");
        Ok(())
    }
}

impl AgentEnvService for SoftLayerAgentEnvService {
    fn fetch(&self) -> ClientFuture<'_, AgentEnv> {
        Box::pin(self.fetch_env())
    }

    fn update<'a>(&'a self, env: &'a AgentEnv) -> ClientFuture<'a, ()> {
        Box::pin(self.update_env(env))
    }
}

/// Builds agent env services bound to individual guests.
#[derive(Clone)]
pub struct SoftLayerAgentEnvServiceFactory {
    client: SharedClient,
    policy: PollPolicy,
}

impl SoftLayerAgentEnvServiceFactory {
    /// Creates a factory sharing one client across the services it builds.
    #[must_use]
    pub const fn new(client: SharedClient, policy: PollPolicy) -> Self {
        Self { client, policy }
    }

    /// Builds a service for the given guest.
    #[must_use]
    pub fn new_service(&self, vm_id: u64) -> SoftLayerAgentEnvService {
        SoftLayerAgentEnvService::new(vm_id, self.client.clone(), self.policy)
    }
}
