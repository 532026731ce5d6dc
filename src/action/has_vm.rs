use super::{ActionError, VmCid};
use crate::vm::Finder;

/// Reports whether a virtual machine exists.
#[derive(Clone, Debug)]
pub struct HasVm<F> {
    finder: F,
}

impl<F: Finder> HasVm<F> {
    /// Creates the action.
    pub const fn new(finder: F) -> Self {
        Self { finder }
    }

    /// Runs the action.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::Failed`] when the lookup fails.
    pub async fn run(&self, cid: VmCid) -> Result<bool, ActionError> {
        let vm = self
            .finder
            .find(cid.0)
            .await
            .map_err(ActionError::wrap(format!("Finding VM '{cid}'")))?;
        Ok(vm.is_some())
    }
}
