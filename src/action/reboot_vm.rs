use super::{ActionError, VmCid};
use crate::vm::Finder;

/// Soft reboots an existing virtual machine.
#[derive(Clone, Debug)]
pub struct RebootVm<F> {
    finder: F,
}

impl<F: Finder> RebootVm<F> {
    /// Creates the action.
    pub const fn new(finder: F) -> Self {
        Self { finder }
    }

    /// Runs the action.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::NotFound`] for unknown VMs and
    /// [`ActionError::Failed`] when the lookup or reboot fails.
    pub async fn run(&self, cid: VmCid) -> Result<(), ActionError> {
        let vm = self
            .finder
            .find(cid.0)
            .await
            .map_err(ActionError::wrap(format!("Finding VM '{cid}'")))?
            .ok_or(ActionError::NotFound {
                kind: "VM",
                cid: cid.0,
            })?;
        vm.reboot()
            .await
            .map_err(ActionError::wrap(format!("Rebooting VM '{cid}'")))
    }
}
