//! Binary entry point for the `slcpi` CLI.

use std::io::{self, Write};
use std::process;
use std::sync::Arc;

use clap::Parser;
use serde_json::{Value, json};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use slcpi::action::{ActionError, DeleteStemcell, DeleteVm, HasVm, RebootVm, StemcellCid, VmCid};
use slcpi::{HttpApiClient, SharedClient, SoftLayerConfig, SoftLayerFinder, SoftLayerStemcellFinder};

mod cli;

use cli::Cli;

const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Debug, Error)]
enum CliError {
    #[error("configuration error: {0}")]
    Config(String),
    #[error(transparent)]
    Action(#[from] ActionError),
}

#[tokio::main]
async fn main() {
    init_logging();
    let cli = Cli::parse();
    let exit_code = match dispatch(cli).await {
        Ok(result) => {
            write_result(io::stdout(), &result);
            0
        }
        Err(err) => {
            write_error(io::stderr(), &err);
            1
        }
    };

    process::exit(exit_code);
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

async fn dispatch(cli: Cli) -> Result<Value, CliError> {
    let config =
        SoftLayerConfig::load_without_cli_args().map_err(|err| CliError::Config(err.to_string()))?;
    let policy = config.poll_policy();
    let client: SharedClient = Arc::new(
        HttpApiClient::new(&config).map_err(|err| CliError::Config(err.to_string()))?,
    );

    match cli {
        Cli::DeleteStemcell(args) => {
            DeleteStemcell::new(SoftLayerStemcellFinder::new(client))
                .run(StemcellCid(args.cid))
                .await?;
            Ok(Value::Null)
        }
        Cli::DeleteVm(args) => {
            DeleteVm::new(SoftLayerFinder::new(client, policy))
                .run(VmCid(args.cid))
                .await?;
            Ok(Value::Null)
        }
        Cli::HasVm(args) => {
            let exists = HasVm::new(SoftLayerFinder::new(client, policy))
                .run(VmCid(args.cid))
                .await?;
            Ok(Value::Bool(exists))
        }
        Cli::RebootVm(args) => {
            RebootVm::new(SoftLayerFinder::new(client, policy))
                .run(VmCid(args.cid))
                .await?;
            Ok(Value::Null)
        }
    }
}

fn write_result(mut target: impl Write, result: &Value) {
    writeln!(target, "{}", json!({ "result": result })).ok();
}

fn write_error(mut target: impl Write, err: &CliError) {
    writeln!(target, "{err}").ok();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_result_emits_one_json_line() {
        let mut buf = Vec::new();
        write_result(&mut buf, &Value::Bool(true));
        let rendered = String::from_utf8(buf).expect("utf8");
        assert_eq!(rendered, "{\"result\":true}\n");
    }

    #[test]
    fn write_error_includes_action_context() {
        let mut buf = Vec::new();
        let err = CliError::Action(ActionError::NotFound { kind: "VM", cid: 7 });
        write_error(&mut buf, &err);
        let rendered = String::from_utf8(buf).expect("utf8");
        assert_eq!(rendered, "VM '7' not found\n");
    }

    #[test]
    fn cli_parses_subcommand_and_cid() {
        let cli = Cli::try_parse_from(["slcpi", "has-vm", "5816394"]).expect("parse");
        assert!(matches!(cli, Cli::HasVm(args) if args.cid == 5_816_394));
    }

    #[test]
    fn cli_rejects_non_numeric_cid() {
        assert!(Cli::try_parse_from(["slcpi", "delete-vm", "abc"]).is_err());
    }
}
