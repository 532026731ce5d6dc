//! Orchestrator-facing actions.
//!
//! Each action is a small object wired with the finders and services it
//! needs and exposes a single `run`. Failures carry the step that failed and
//! the target identifier, with the provider error kept as the source.

mod create_vm;
mod delete_stemcell;
mod delete_vm;
mod has_vm;
mod reboot_vm;
mod set_vm_metadata;

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::SoftLayerError;

pub use create_vm::{CreateVm, CreateVmRequest};
pub use delete_stemcell::DeleteStemcell;
pub use delete_vm::DeleteVm;
pub use has_vm::HasVm;
pub use reboot_vm::RebootVm;
pub use set_vm_metadata::SetVmMetadata;

/// Identifier of a stemcell as seen by the orchestrator.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct StemcellCid(pub u64);

/// Identifier of a virtual machine as seen by the orchestrator.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct VmCid(pub u64);

impl fmt::Display for StemcellCid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for VmCid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Errors raised by actions.
#[derive(Debug, Error, Eq, PartialEq)]
pub enum ActionError {
    /// Raised when a step of the action failed.
    #[error("{context}: {source}")]
    Failed {
        /// Step and target, for example `Deleting stemcell '123'`.
        context: String,
        /// Underlying provider failure.
        #[source]
        source: SoftLayerError,
    },
    /// Raised when the action needs an object that does not exist.
    #[error("{kind} '{cid}' not found")]
    NotFound {
        /// Kind of object (for example `VM`).
        kind: &'static str,
        /// Identifier that was looked up.
        cid: u64,
    },
}

impl ActionError {
    /// Returns a closure wrapping a provider error with step context.
    pub(crate) fn wrap(context: impl Into<String>) -> impl FnOnce(SoftLayerError) -> Self {
        let step = context.into();
        move |source| Self::Failed {
            context: step,
            source,
        }
    }
}
