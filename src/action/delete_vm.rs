use tracing::info;

use super::{ActionError, VmCid};
use crate::vm::Finder;

/// Deletes a virtual machine. Deleting one that no longer exists succeeds.
#[derive(Clone, Debug)]
pub struct DeleteVm<F> {
    finder: F,
}

impl<F: Finder> DeleteVm<F> {
    /// Creates the action.
    pub const fn new(finder: F) -> Self {
        Self { finder }
    }

    /// Runs the action.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::Failed`] when the lookup or the delete fails.
    pub async fn run(&self, cid: VmCid) -> Result<(), ActionError> {
        let found = self
            .finder
            .find(cid.0)
            .await
            .map_err(ActionError::wrap(format!("Finding VM '{cid}'")))?;

        let Some(vm) = found else {
            info!(%cid, "vm already gone");
            return Ok(());
        };
        vm.delete()
            .await
            .map_err(ActionError::wrap(format!("Deleting VM '{cid}'")))
    }
}
