//! Active-transaction tracking.
//!
//! Provisioning, reloads and metadata disk configuration all enqueue
//! provider-side transactions. A guest with no active transactions is
//! quiescent; callers poll until then before issuing the next change.

use std::time::{Duration, Instant};

use tokio::time::sleep;
use tracing::{debug, warn};

use crate::datatypes::Transaction;
use crate::error::SoftLayerError;
use crate::services::VirtualGuestService;

/// How often and for how long to poll for quiescence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PollPolicy {
    interval: Duration,
    timeout: Duration,
}

impl PollPolicy {
    /// Creates a policy polling every `interval` until `timeout` elapses.
    #[must_use]
    pub const fn new(interval: Duration, timeout: Duration) -> Self {
        Self { interval, timeout }
    }

    /// Delay between polls.
    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Upper bound on the whole wait.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }
}

/// Queries and waits on a guest's active transactions.
#[derive(Clone)]
pub struct TransactionTracker {
    service: VirtualGuestService,
}

impl TransactionTracker {
    /// Creates a tracker backed by the given guest service.
    #[must_use]
    pub const fn new(service: VirtualGuestService) -> Self {
        Self { service }
    }

    /// Lists the guest's transactions in flight.
    ///
    /// # Errors
    ///
    /// Propagates the service failure.
    pub async fn active_transactions(&self, id: u64) -> Result<Vec<Transaction>, SoftLayerError> {
        self.service.get_active_transactions(id).await
    }

    /// Returns the guest's first transaction in flight.
    ///
    /// # Errors
    ///
    /// Returns [`SoftLayerError::NoActiveTransaction`] when the guest is
    /// quiescent.
    pub async fn active_transaction(&self, id: u64) -> Result<Transaction, SoftLayerError> {
        self.service.get_active_transaction(id).await
    }

    /// Reports whether any transaction is in flight.
    ///
    /// # Errors
    ///
    /// Propagates the service failure.
    pub async fn is_busy(&self, id: u64) -> Result<bool, SoftLayerError> {
        Ok(!self.active_transactions(id).await?.is_empty())
    }

    /// Polls until the guest has no active transactions.
    ///
    /// # Errors
    ///
    /// Returns [`SoftLayerError::Timeout`] once `policy.timeout()` has passed
    /// with work still in flight, or the first query failure.
    pub async fn wait_until_quiescent(
        &self,
        id: u64,
        policy: &PollPolicy,
    ) -> Result<(), SoftLayerError> {
        let deadline = Instant::now() + policy.timeout();
        loop {
            let transactions = self.active_transactions(id).await?;
            let Some(head) = transactions.first() else {
                return Ok(());
            };
            debug!(
                id,
                pending = transactions.len(),
                status = %head.transaction_status.name,
                "virtual guest still busy"
            );

            if Instant::now() > deadline {
                warn!(id, timeout = ?policy.timeout(), "gave up waiting for transactions");
                return Err(SoftLayerError::Timeout {
                    action: String::from("active transactions to complete"),
                    id,
                });
            }
            sleep(policy.interval()).await;
        }
    }
}
