//! Error taxonomy shared by the services, finders, and actions.

use thiserror::Error;

/// Errors raised while talking to the SoftLayer API.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum SoftLayerError {
    /// Raised when caller input violates a precondition knowable without a
    /// remote call. The message lists every violation found.
    #[error("{0}")]
    Validation(String),
    /// Raised when the round trip to the provider could not complete.
    #[error("{service}::{method} request failed: {message}")]
    Transport {
        /// Provider service name (for example `SoftLayer_Virtual_Guest`).
        service: String,
        /// Method invoked on the service.
        method: String,
        /// Message reported by the HTTP stack.
        message: String,
    },
    /// Raised when the provider answers with a non-success HTTP status.
    #[error("{service}::{method} returned HTTP {status}: {message}")]
    Api {
        /// Provider service name.
        service: String,
        /// Method invoked on the service.
        method: String,
        /// HTTP status code.
        status: u16,
        /// Response body reported by the provider.
        message: String,
    },
    /// Raised when a response arrived but does not match the expected shape.
    #[error("{message}: unexpected payload `{payload}`")]
    Protocol {
        /// Description of what failed to decode.
        message: String,
        /// Raw payload preserved for diagnostics.
        payload: String,
    },
    /// Raised when no ephemeral disk tier satisfies the requested size.
    #[error("No proper local disk for size {size_gb}")]
    Capacity {
        /// Requested size in gigabytes.
        size_gb: i64,
    },
    /// Raised when the provider answers `false` to a state-changing call.
    #[error("Failed to {action} virtual guest {id}")]
    Rejected {
        /// Human readable description of the action.
        action: String,
        /// Target object identifier.
        id: u64,
    },
    /// Raised when the singular active-transaction query finds nothing.
    #[error("virtual guest {id} has no active transaction")]
    NoActiveTransaction {
        /// Virtual guest identifier.
        id: u64,
    },
    /// Raised when a poll loop exceeds its caller-supplied timeout.
    #[error("timeout waiting for {action} on virtual guest {id}")]
    Timeout {
        /// Condition being waited on.
        action: String,
        /// Virtual guest identifier.
        id: u64,
    },
    /// Raised when the agent configuration attribute is missing from user data.
    #[error("virtual guest {id} has no {keyname} user data attribute")]
    UserDataMissing {
        /// Virtual guest identifier.
        id: u64,
        /// Attribute keyname that was expected.
        keyname: String,
    },
}

impl SoftLayerError {
    /// Builds a [`SoftLayerError::Protocol`] preserving the raw payload.
    #[must_use]
    pub fn protocol(message: impl Into<String>, payload: &[u8]) -> Self {
        Self::Protocol {
            message: message.into(),
            payload: String::from_utf8_lossy(payload).into_owned(),
        }
    }

    /// Returns `true` when the failure happened before a response was read.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }
}
