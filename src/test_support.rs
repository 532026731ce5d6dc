//! Test support utilities shared across unit and integration tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

use crate::client::{ApiClient, ApiRequest, ClientFuture, SharedClient};
use crate::error::SoftLayerError;

/// Scripted API client that returns pre-seeded responses in FIFO order.
///
/// Used to drive deterministic provider outcomes without network access.
#[derive(Clone, Debug, Default)]
pub struct ScriptedClient {
    responses: Arc<Mutex<VecDeque<Result<Vec<u8>, SoftLayerError>>>>,
    invocations: Arc<Mutex<Vec<ApiRequest>>>,
}

impl ScriptedClient {
    /// Creates a new client with no queued responses.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the client as a shared handle for services.
    #[must_use]
    pub fn shared(&self) -> SharedClient {
        Arc::new(self.clone())
    }

    /// Returns a snapshot of all requests recorded so far.
    #[must_use]
    pub fn invocations(&self) -> Vec<ApiRequest> {
        self.invocations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the method names invoked so far, in order.
    #[must_use]
    pub fn methods(&self) -> Vec<String> {
        self.invocations()
            .into_iter()
            .map(|request| request.method)
            .collect()
    }

    /// Queues a raw response body.
    pub fn push_response(&self, body: impl Into<Vec<u8>>) {
        self.push(Ok(body.into()));
    }

    /// Queues a transport failure.
    pub fn push_transport_error(&self, message: impl Into<String>) {
        self.push(Err(SoftLayerError::Transport {
            service: String::from("scripted"),
            method: String::from("scripted"),
            message: message.into(),
        }));
    }

    fn push(&self, response: Result<Vec<u8>, SoftLayerError>) {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(response);
    }
}

impl ApiClient for ScriptedClient {
    fn invoke<'a>(&'a self, request: &'a ApiRequest) -> ClientFuture<'a, Vec<u8>> {
        self.invocations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request.clone());
        let next = self
            .responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front();
        Box::pin(async move {
            next.unwrap_or_else(|| {
                Err(request.transport_error("no scripted response available"))
            })
        })
    }
}

/// Recorded provider responses used as test fixtures.
pub mod fixtures {
    /// `SoftLayer_Virtual_Guest::createObject`.
    pub const CREATE_OBJECT: &str =
        include_str!("../tests/fixtures/SoftLayer_Virtual_Guest_Service_createObject.json");
    /// `SoftLayer_Virtual_Guest::getObject`.
    pub const GET_OBJECT: &str =
        include_str!("../tests/fixtures/SoftLayer_Virtual_Guest_Service_getObject.json");
    /// `SoftLayer_Virtual_Guest::getPowerState`.
    pub const GET_POWER_STATE: &str =
        include_str!("../tests/fixtures/SoftLayer_Virtual_Guest_Service_getPowerState.json");
    /// `SoftLayer_Virtual_Guest::getActiveTransactions`.
    pub const GET_ACTIVE_TRANSACTIONS: &str = include_str!(
        "../tests/fixtures/SoftLayer_Virtual_Guest_Service_getActiveTransactions.json"
    );
    /// `SoftLayer_Virtual_Guest::configureMetadataDisk`.
    pub const CONFIGURE_METADATA_DISK: &str = include_str!(
        "../tests/fixtures/SoftLayer_Virtual_Guest_Service_configureMetadataDisk.json"
    );
    /// `SoftLayer_Virtual_Guest::getSshKeys`.
    pub const GET_SSH_KEYS: &str =
        include_str!("../tests/fixtures/SoftLayer_Virtual_Guest_Service_getSshKeys.json");
    /// `SoftLayer_Virtual_Guest::getUserData`, mixing a `USER_DATA` and a
    /// `FAKE_DATA` attribute.
    pub const GET_USER_DATA: &str =
        include_str!("../tests/fixtures/SoftLayer_Virtual_Guest_Service_getUserData.json");
    /// `SoftLayer_Virtual_Guest::getUpgradeItemPrices` with a single 25 GB tier.
    pub const GET_UPGRADE_ITEM_PRICES: &str = include_str!(
        "../tests/fixtures/SoftLayer_Virtual_Guest_Service_getUpgradeItemPrices.json"
    );
    /// `SoftLayer_Product_Order::placeOrder`.
    pub const PLACE_ORDER: &str =
        include_str!("../tests/fixtures/SoftLayer_Product_Order_placeOrder.json");
    /// `SoftLayer_Account::getVirtualGuests` listing guests 5816394 and 5816395.
    pub const ACCOUNT_VIRTUAL_GUESTS: &str =
        include_str!("../tests/fixtures/SoftLayer_Account_Service_getVirtualGuests.json");
    /// `SoftLayer_Account::getBlockDeviceTemplateGroups` listing template 200150.
    pub const ACCOUNT_TEMPLATE_GROUPS: &str = include_str!(
        "../tests/fixtures/SoftLayer_Account_Service_getBlockDeviceTemplateGroups.json"
    );
}

/// Produces an item price listing with one `guest_disk1` price per capacity.
#[must_use]
pub fn json_disk_prices(tiers: &[(u64, u64)]) -> String {
    let items = tiers
        .iter()
        .map(|(id, capacity)| {
            format!(
                concat!(
                    "{{\"id\":{id},\"categories\":[{{\"categoryCode\":\"guest_disk1\"}}],",
                    "\"item\":{{\"capacity\":\"{capacity}\",\"description\":\"{capacity} GB (LOCAL)\",",
                    "\"units\":\"GB\"}}}}"
                ),
                id = id,
                capacity = capacity
            )
        })
        .collect::<Vec<_>>()
        .join(",");
    format!("[{items}]")
}

/// Produces a guest listing containing only the given identifiers.
#[must_use]
pub fn json_guests(ids: &[u64]) -> String {
    let items = ids
        .iter()
        .map(|id| format!("{{\"id\":{id},\"hostname\":\"guest-{id}\",\"domain\":\"example.com\"}}"))
        .collect::<Vec<_>>()
        .join(",");
    format!("[{items}]")
}
