//! Command-line interface definitions for the `slcpi` binary.
//!
//! This module centralises the clap parser structures so both the main binary
//! and the build script can reuse them when generating the manual page.

use clap::Parser;

/// Top-level CLI for the `slcpi` binary.
#[derive(Debug, Parser)]
#[command(
    name = "slcpi",
    about = "Manage SoftLayer virtual guests and stemcells for a cluster orchestrator",
    arg_required_else_help = true
)]
pub(crate) enum Cli {
    /// Delete a stemcell; succeeds when it is already gone.
    #[command(name = "delete-stemcell", about = "Delete a stemcell (image template)")]
    DeleteStemcell(TargetArgs),
    /// Delete a VM; succeeds when it is already gone.
    #[command(name = "delete-vm", about = "Delete a virtual guest")]
    DeleteVm(TargetArgs),
    /// Report whether a VM exists.
    #[command(name = "has-vm", about = "Report whether a virtual guest exists")]
    HasVm(TargetArgs),
    /// Soft reboot a VM.
    #[command(name = "reboot-vm", about = "Soft reboot a virtual guest")]
    RebootVm(TargetArgs),
}

/// Target of a single-object subcommand.
#[derive(Debug, Parser)]
pub(crate) struct TargetArgs {
    /// Provider identifier of the object.
    #[arg(value_name = "CID")]
    pub(crate) cid: u64,
}
