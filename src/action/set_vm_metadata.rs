use super::{ActionError, VmCid};
use crate::vm::{Finder, VmMetadata};

/// Writes orchestrator metadata to an existing virtual machine.
#[derive(Clone, Debug)]
pub struct SetVmMetadata<F> {
    finder: F,
}

impl<F: Finder> SetVmMetadata<F> {
    /// Creates the action.
    pub const fn new(finder: F) -> Self {
        Self { finder }
    }

    /// Runs the action.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::NotFound`] for unknown VMs and
    /// [`ActionError::Failed`] when the lookup or write fails.
    pub async fn run(&self, cid: VmCid, metadata: &VmMetadata) -> Result<(), ActionError> {
        let vm = self
            .finder
            .find(cid.0)
            .await
            .map_err(ActionError::wrap(format!("Finding VM '{cid}'")))?
            .ok_or(ActionError::NotFound {
                kind: "VM",
                cid: cid.0,
            })?;
        vm.set_metadata(metadata)
            .await
            .map_err(ActionError::wrap(format!("Setting metadata on VM '{cid}'")))
    }
}
