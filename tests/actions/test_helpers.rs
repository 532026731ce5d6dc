//! Shared fixtures and helpers for action BDD scenarios.

use std::time::Duration;

use rstest::fixture;
use slcpi::test_support::ScriptedClient;
use slcpi::{PollPolicy, SoftLayerFinder, SoftLayerStemcellFinder};

#[derive(Clone, Debug)]
pub enum ActionOutcome {
    Success,
    Failure(String),
}

#[derive(Clone, Debug)]
pub struct ActionsContext {
    pub client: ScriptedClient,
    pub outcome: Option<ActionOutcome>,
}

#[fixture]
pub fn actions_context() -> ActionsContext {
    ActionsContext {
        client: ScriptedClient::new(),
        outcome: None,
    }
}

impl ActionsContext {
    pub fn stemcell_finder(&self) -> SoftLayerStemcellFinder {
        SoftLayerStemcellFinder::new(self.client.shared())
    }

    pub fn vm_finder(&self) -> SoftLayerFinder {
        SoftLayerFinder::new(
            self.client.shared(),
            PollPolicy::new(Duration::from_millis(1), Duration::from_secs(1)),
        )
    }
}
