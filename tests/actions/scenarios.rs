//! BDD scenarios for orchestrator actions.

use rstest_bdd_macros::scenario;

use super::test_helpers::{ActionsContext, actions_context};

#[scenario(
    path = "tests/features/actions.feature",
    name = "Delete an existing stemcell"
)]
fn scenario_delete_existing_stemcell(actions_context: ActionsContext) {
    drop(actions_context);
}

#[scenario(
    path = "tests/features/actions.feature",
    name = "Deleting a missing stemcell is a no-op"
)]
fn scenario_delete_missing_stemcell(actions_context: ActionsContext) {
    drop(actions_context);
}

#[scenario(
    path = "tests/features/actions.feature",
    name = "Deleting a stemcell twice succeeds both times"
)]
fn scenario_delete_stemcell_twice(actions_context: ActionsContext) {
    drop(actions_context);
}

#[scenario(
    path = "tests/features/actions.feature",
    name = "Stemcell lookup failures name the step"
)]
fn scenario_stemcell_lookup_failure(actions_context: ActionsContext) {
    drop(actions_context);
}

#[scenario(
    path = "tests/features/actions.feature",
    name = "Rejected stemcell deletes name the step"
)]
fn scenario_rejected_stemcell_delete(actions_context: ActionsContext) {
    drop(actions_context);
}

#[scenario(
    path = "tests/features/actions.feature",
    name = "Rebooting an unknown VM fails"
)]
fn scenario_reboot_unknown_vm(actions_context: ActionsContext) {
    drop(actions_context);
}

#[scenario(
    path = "tests/features/actions.feature",
    name = "Deleting a missing VM is a no-op"
)]
fn scenario_delete_missing_vm(actions_context: ActionsContext) {
    drop(actions_context);
}
