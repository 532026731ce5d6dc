//! BDD step definitions for orchestrator actions.

use rstest_bdd_macros::{given, then, when};
use slcpi::action::{ActionError, DeleteStemcell, DeleteVm, RebootVm, StemcellCid, VmCid};
use slcpi::test_support::fixtures;
use tokio::runtime::Runtime;

use super::test_helpers::{ActionOutcome, ActionsContext};

#[derive(Debug, thiserror::Error)]
pub enum StepError {
    #[error("assertion failed: {0}")]
    Assertion(String),
}

fn record(
    mut actions_context: ActionsContext,
    result: Result<(), ActionError>,
) -> ActionsContext {
    actions_context.outcome = Some(match result {
        Ok(()) => ActionOutcome::Success,
        Err(err) => ActionOutcome::Failure(err.to_string()),
    });
    actions_context
}

#[given("the account lists stemcell 200150")]
fn account_lists_stemcell(actions_context: ActionsContext) -> ActionsContext {
    actions_context
        .client
        .push_response(fixtures::ACCOUNT_TEMPLATE_GROUPS);
    actions_context
}

#[given("the account lists no stemcells")]
fn account_lists_no_stemcells(actions_context: ActionsContext) -> ActionsContext {
    actions_context.client.push_response("[]");
    actions_context
}

#[given("the account lists virtual guests")]
fn account_lists_guests(actions_context: ActionsContext) -> ActionsContext {
    actions_context
        .client
        .push_response(fixtures::ACCOUNT_VIRTUAL_GUESTS);
    actions_context
}

#[given("the account listing fails with \"{message}\"")]
fn account_listing_fails(actions_context: ActionsContext, message: String) -> ActionsContext {
    actions_context.client.push_transport_error(message);
    actions_context
}

#[given("the provider accepts the stemcell delete")]
fn provider_accepts_delete(actions_context: ActionsContext) -> ActionsContext {
    actions_context.client.push_response("true");
    actions_context
}

#[given("the provider rejects the stemcell delete")]
fn provider_rejects_delete(actions_context: ActionsContext) -> ActionsContext {
    actions_context.client.push_response("false");
    actions_context
}

#[when("I delete stemcell {cid:u64}")]
fn delete_stemcell(actions_context: ActionsContext, cid: u64) -> Result<ActionsContext, StepError> {
    let runtime = Runtime::new().map_err(|err| StepError::Assertion(err.to_string()))?;
    let action = DeleteStemcell::new(actions_context.stemcell_finder());
    let result = runtime.block_on(async move { action.run(StemcellCid(cid)).await });
    Ok(record(actions_context, result))
}

#[when("I run the stemcell delete for {cid:u64} twice")]
fn delete_stemcell_twice(
    actions_context: ActionsContext,
    cid: u64,
) -> Result<ActionsContext, StepError> {
    let runtime = Runtime::new().map_err(|err| StepError::Assertion(err.to_string()))?;
    let action = DeleteStemcell::new(actions_context.stemcell_finder());
    let result = runtime.block_on(async move {
        action.run(StemcellCid(cid)).await?;
        action.run(StemcellCid(cid)).await
    });
    Ok(record(actions_context, result))
}

#[when("I delete VM {cid:u64}")]
fn delete_vm(actions_context: ActionsContext, cid: u64) -> Result<ActionsContext, StepError> {
    let runtime = Runtime::new().map_err(|err| StepError::Assertion(err.to_string()))?;
    let action = DeleteVm::new(actions_context.vm_finder());
    let result = runtime.block_on(async move { action.run(VmCid(cid)).await });
    Ok(record(actions_context, result))
}

#[when("I reboot VM {cid:u64}")]
fn reboot_vm(actions_context: ActionsContext, cid: u64) -> Result<ActionsContext, StepError> {
    let runtime = Runtime::new().map_err(|err| StepError::Assertion(err.to_string()))?;
    let action = RebootVm::new(actions_context.vm_finder());
    let result = runtime.block_on(async move { action.run(VmCid(cid)).await });
    Ok(record(actions_context, result))
}

#[then("the action succeeds")]
fn action_succeeds(actions_context: &ActionsContext) -> Result<(), StepError> {
    match &actions_context.outcome {
        Some(ActionOutcome::Success) => Ok(()),
        Some(ActionOutcome::Failure(message)) => Err(StepError::Assertion(format!(
            "expected success, got failure: {message}"
        ))),
        None => Err(StepError::Assertion(String::from("missing outcome"))),
    }
}

#[then("the action fails with \"{expected}\"")]
fn action_fails_with(actions_context: &ActionsContext, expected: String) -> Result<(), StepError> {
    let Some(ActionOutcome::Failure(message)) = &actions_context.outcome else {
        return Err(StepError::Assertion(format!(
            "expected failure, got: {:?}",
            actions_context.outcome
        )));
    };
    if message.contains(&expected) {
        Ok(())
    } else {
        Err(StepError::Assertion(format!(
            "expected failure containing {expected:?}, got: {message}"
        )))
    }
}

#[then("the provider saw {count:usize} calls ending with \"{method}\"")]
fn provider_saw_calls(
    actions_context: &ActionsContext,
    count: usize,
    method: String,
) -> Result<(), StepError> {
    let methods = actions_context.client.methods();
    if methods.len() != count {
        return Err(StepError::Assertion(format!(
            "expected {count} calls, got {methods:?}"
        )));
    }
    if methods.last().map(String::as_str) == Some(method.as_str()) {
        Ok(())
    } else {
        Err(StepError::Assertion(format!(
            "expected last call {method}, got {methods:?}"
        )))
    }
}
