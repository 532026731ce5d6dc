//! Core library for driving SoftLayer virtual guests on behalf of a cluster
//! orchestrator.
//!
//! The crate exposes typed provider services over a pluggable API client,
//! transaction polling, ephemeral disk selection, agent environment
//! injection, finders tolerant of sparse listings, and the orchestrator
//! actions built on top of them (create → wait for quiescence → configure →
//! delete).

pub mod action;
pub mod agent_env;
pub mod client;
pub mod codec;
pub mod config;
pub mod datatypes;
pub mod error;
pub mod services;
pub mod stemcell;
pub mod test_support;
pub mod transactions;
pub mod vm;

pub use agent_env::AgentEnv;
pub use client::{ApiClient, ApiRequest, ClientFuture, HttpApiClient, SharedClient};
pub use config::{ConfigError, SoftLayerConfig};
pub use error::SoftLayerError;
pub use services::{
    AccountService, EphemeralDiskSelector, ImageTemplateService, ProductOrderService,
    VirtualGuestService, ZeroSizePolicy,
};
pub use stemcell::{SoftLayerStemcellFinder, Stemcell, StemcellFinder};
pub use transactions::{PollPolicy, TransactionTracker};
pub use vm::{
    AgentEnvService, Finder, SoftLayerAgentEnvService, SoftLayerAgentEnvServiceFactory,
    SoftLayerFinder, Vm,
};
