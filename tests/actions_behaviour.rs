//! Behavioural scenarios for the orchestrator actions.

mod actions;
