use tracing::info;

use super::{ActionError, StemcellCid};
use crate::stemcell::StemcellFinder;

/// Deletes a stemcell. Deleting one that no longer exists succeeds.
#[derive(Clone, Debug)]
pub struct DeleteStemcell<F> {
    finder: F,
}

impl<F: StemcellFinder> DeleteStemcell<F> {
    /// Creates the action.
    pub const fn new(finder: F) -> Self {
        Self { finder }
    }

    /// Runs the action.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::Failed`] when the lookup or the delete fails.
    pub async fn run(&self, cid: StemcellCid) -> Result<(), ActionError> {
        let found = self
            .finder
            .find_by_id(cid.0)
            .await
            .map_err(ActionError::wrap(format!("Finding stemcell '{cid}'")))?;

        let Some(stemcell) = found else {
            info!(%cid, "stemcell already gone");
            return Ok(());
        };
        stemcell
            .delete()
            .await
            .map_err(ActionError::wrap(format!("Deleting stemcell '{cid}'")))
    }
}
