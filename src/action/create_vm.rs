use tracing::info;

use super::{ActionError, StemcellCid, VmCid};
use crate::agent_env::AgentEnv;
use crate::client::SharedClient;
use crate::datatypes::VirtualGuestTemplate;
use crate::error::SoftLayerError;
use crate::services::{EphemeralDiskSelector, VirtualGuestService};
use crate::transactions::{PollPolicy, TransactionTracker};
use crate::vm::{AgentEnvService, SoftLayerAgentEnvServiceFactory};

/// Everything needed to bring up one virtual machine.
#[derive(Clone, Debug, PartialEq)]
pub struct CreateVmRequest {
    /// Agent identifier written into the agent environment.
    pub agent_id: String,
    /// Global identifier of the stemcell to boot.
    pub stemcell_uuid: String,
    /// Guest shape and placement.
    pub template: VirtualGuestTemplate,
    /// Requested ephemeral disk in GB; the disk selector decides what zero
    /// means.
    pub ephemeral_disk_gb: i64,
    /// Agent environment; identity fields are filled in by the action.
    pub agent_env: AgentEnv,
}

/// Creates a virtual machine and hands it its agent environment.
#[derive(Clone)]
pub struct CreateVm {
    service: VirtualGuestService,
    tracker: TransactionTracker,
    agent_env_factory: SoftLayerAgentEnvServiceFactory,
    policy: PollPolicy,
}

impl CreateVm {
    /// Creates the action.
    #[must_use]
    pub fn new(client: SharedClient, policy: PollPolicy) -> Self {
        let service = VirtualGuestService::new(client.clone());
        Self {
            tracker: TransactionTracker::new(service.clone()),
            service,
            agent_env_factory: SoftLayerAgentEnvServiceFactory::new(client, policy),
            policy,
        }
    }

    /// Replaces the selector deciding which ephemeral disk tier to order.
    #[must_use]
    pub fn with_disk_selector(mut self, selector: EphemeralDiskSelector) -> Self {
        self.service = self.service.with_disk_selector(selector);
        self.tracker = TransactionTracker::new(self.service.clone());
        self
    }

    /// Runs the action and returns the new VM's identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::Failed`] naming the step that failed. A
    /// template missing required fields or a negative ephemeral disk size
    /// fails before any remote call.
    pub async fn run(
        &self,
        stemcell: StemcellCid,
        request: &CreateVmRequest,
    ) -> Result<VmCid, ActionError> {
        let template = request
            .template
            .clone()
            .with_image_template(request.stemcell_uuid.clone());
        template
            .validate()
            .map_err(ActionError::wrap("Validating VM template"))?;
        let disk_gb = self
            .service
            .disk_selector()
            .requested_size(request.ephemeral_disk_gb)
            .map_err(ActionError::wrap("Validating VM template"))?;

        let guest = self
            .service
            .create_object(&template)
            .await
            .map_err(ActionError::wrap(format!(
                "Creating VM from stemcell '{stemcell}'"
            )))?;
        let cid = VmCid(guest.id);
        info!(%cid, hostname = %guest.hostname, "vm created");

        self.tracker
            .wait_until_quiescent(guest.id, &self.policy)
            .await
            .map_err(ActionError::wrap(format!("Waiting for VM '{cid}' to be ready")))?;

        if let Some(size_gb) = disk_gb {
            self.attach_disk(guest.id, size_gb)
                .await
                .map_err(ActionError::wrap(format!(
                    "Attaching ephemeral disk to VM '{cid}'"
                )))?;
        }

        let mut env = request.agent_env.clone();
        env.agent_id.clone_from(&request.agent_id);
        env.vm.name.clone_from(&guest.hostname);
        env.vm.id = guest.id.to_string();
        if disk_gb.is_some() && env.disks.ephemeral.is_none() {
            env = env.with_ephemeral_disk("/dev/xvdc");
        }
        self.agent_env_factory
            .new_service(guest.id)
            .update(&env)
            .await
            .map_err(ActionError::wrap(format!("Updating agent env of VM '{cid}'")))?;
        Ok(cid)
    }

    async fn attach_disk(&self, id: u64, size_gb: i64) -> Result<(), SoftLayerError> {
        self.service.attach_ephemeral_disk(id, size_gb).await?;
        self.tracker.wait_until_quiescent(id, &self.policy).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datatypes::Datacenter;
    use crate::services::ZeroSizePolicy;
    use crate::test_support::{ScriptedClient, fixtures};
    use rstest::{fixture, rstest};
    use std::time::Duration;

    #[fixture]
    fn request() -> CreateVmRequest {
        CreateVmRequest {
            agent_id: String::from("fake-agent-id"),
            stemcell_uuid: String::from("8071601b-5ee1-483e-a9e8-6e5582dcb9f7"),
            template: VirtualGuestTemplate {
                hostname: String::from("fake-hostname"),
                domain: String::from("fake.domain.com"),
                start_cpus: 2,
                max_memory: 1024,
                datacenter: Datacenter {
                    name: String::from("ams01"),
                },
                ..VirtualGuestTemplate::default()
            },
            ephemeral_disk_gb: 0,
            agent_env: AgentEnv::default(),
        }
    }

    fn action(client: &ScriptedClient) -> CreateVm {
        CreateVm::new(
            client.shared(),
            PollPolicy::new(Duration::from_millis(1), Duration::from_secs(5)),
        )
    }

    fn push_agent_env_update(client: &ScriptedClient) {
        client.push_response(fixtures::GET_SSH_KEYS);
        client.push_response("true");
        client.push_response(fixtures::CONFIGURE_METADATA_DISK);
        client.push_response("[]");
    }

    #[rstest]
    #[tokio::test]
    async fn provisions_and_configures_agent(request: CreateVmRequest) {
        let client = ScriptedClient::new();
        client.push_response(fixtures::CREATE_OBJECT);
        client.push_response(fixtures::GET_ACTIVE_TRANSACTIONS);
        client.push_response("[]");
        push_agent_env_update(&client);

        let cid = action(&client)
            .run(StemcellCid(200_150), &request)
            .await
            .expect("created");
        assert!(cid.0 > 0);
        assert_eq!(
            client.methods(),
            vec![
                "createObject",
                "getActiveTransactions",
                "getActiveTransactions",
                "getSshKeys",
                "setUserMetadata",
                "configureMetadataDisk",
                "getActiveTransactions",
            ]
        );
        let create = client.invocations().into_iter().next().expect("create call");
        let template = create.parameters.first().expect("template parameter");
        assert_eq!(
            template["blockDeviceTemplateGroup"]["globalIdentifier"],
            "8071601b-5ee1-483e-a9e8-6e5582dcb9f7"
        );
    }

    #[rstest]
    #[tokio::test]
    async fn orders_ephemeral_disk_when_requested(request: CreateVmRequest) {
        let client = ScriptedClient::new();
        client.push_response(fixtures::CREATE_OBJECT);
        client.push_response("[]");
        client.push_response(fixtures::GET_UPGRADE_ITEM_PRICES);
        client.push_response(fixtures::PLACE_ORDER);
        client.push_response("[]");
        push_agent_env_update(&client);

        let with_disk = CreateVmRequest {
            ephemeral_disk_gb: 25,
            ..request
        };
        action(&client)
            .run(StemcellCid(200_150), &with_disk)
            .await
            .expect("created");
        let methods = client.methods();
        assert_eq!(
            methods.get(2..4),
            Some(["getUpgradeItemPrices", "placeOrder"].map(String::from).as_slice())
        );
    }

    #[rstest]
    #[tokio::test]
    async fn invalid_template_fails_before_any_call(request: CreateVmRequest) {
        let client = ScriptedClient::new();
        let invalid = CreateVmRequest {
            template: VirtualGuestTemplate::default(),
            ..request
        };
        let err = action(&client)
            .run(StemcellCid(1), &invalid)
            .await
            .expect_err("invalid");
        assert!(err.to_string().starts_with("Validating VM template"), "{err}");
        assert!(client.invocations().is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn oversized_disk_names_the_step(request: CreateVmRequest) {
        let client = ScriptedClient::new();
        client.push_response(fixtures::CREATE_OBJECT);
        client.push_response("[]");
        client.push_response(fixtures::GET_UPGRADE_ITEM_PRICES);
        let oversized = CreateVmRequest {
            ephemeral_disk_gb: 26,
            ..request
        };
        let err = action(&client)
            .run(StemcellCid(1), &oversized)
            .await
            .expect_err("no tier");
        let message = err.to_string();
        assert!(message.contains("Attaching ephemeral disk"), "{message}");
        assert!(message.contains("No proper local disk for size 26"), "{message}");
    }

    #[rstest]
    #[tokio::test]
    async fn negative_disk_size_fails_before_any_call(request: CreateVmRequest) {
        let client = ScriptedClient::new();
        let negative = CreateVmRequest {
            ephemeral_disk_gb: -1,
            ..request
        };
        let err = action(&client)
            .run(StemcellCid(1), &negative)
            .await
            .expect_err("negative size");
        let message = err.to_string();
        assert!(message.starts_with("Validating VM template"), "{message}");
        assert!(
            message.contains("Ephemeral disk size can not be negative: -1"),
            "{message}"
        );
        assert!(client.invocations().is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn zero_disk_size_orders_smallest_tier_when_selector_says_so(
        request: CreateVmRequest,
    ) {
        let client = ScriptedClient::new();
        client.push_response(fixtures::CREATE_OBJECT);
        client.push_response("[]");
        client.push_response(fixtures::GET_UPGRADE_ITEM_PRICES);
        client.push_response(fixtures::PLACE_ORDER);
        client.push_response("[]");
        push_agent_env_update(&client);

        action(&client)
            .with_disk_selector(
                EphemeralDiskSelector::default().with_zero_size_policy(ZeroSizePolicy::Order),
            )
            .run(StemcellCid(200_150), &request)
            .await
            .expect("created");
        let methods = client.methods();
        assert_eq!(
            methods.get(2..4),
            Some(["getUpgradeItemPrices", "placeOrder"].map(String::from).as_slice())
        );
    }

    #[rstest]
    #[tokio::test]
    async fn zero_disk_size_is_skipped_by_default(request: CreateVmRequest) {
        let client = ScriptedClient::new();
        client.push_response(fixtures::CREATE_OBJECT);
        client.push_response("[]");
        push_agent_env_update(&client);

        action(&client)
            .run(StemcellCid(200_150), &request)
            .await
            .expect("created");
        assert!(
            !client
                .methods()
                .iter()
                .any(|method| method == "getUpgradeItemPrices")
        );
    }
}
