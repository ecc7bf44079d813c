//! Definitions of the CLI arguments and commands for the wiring scripts

use clap::{Args, Parser, Subcommand};
use reconciler::{engine::RunConfig, outcome::Outcome, registry::Registry};

use crate::{
    commands::{check_wiring, reconcile_wiring},
    constants::DEFAULT_DEPLOYMENTS_PATH,
    errors::ScriptError,
    transport::AlloyCaller,
    types::AssertionKind,
};

/// The CLI for checking and reconciling the platform's contract wiring
#[derive(Parser)]
pub struct Cli {
    /// Private key of the operations signer
    // TODO: Better key management
    #[arg(short, long, env = "PRIV_KEY")]
    pub priv_key: String,

    /// Network RPC URL to run against
    #[arg(short, long, env = "RPC_URL")]
    pub rpc_url: String,

    /// Path to the deployments file
    #[arg(short, long, default_value = DEFAULT_DEPLOYMENTS_PATH)]
    pub deployments_path: String,

    /// Bound on concurrently evaluated assertions
    #[arg(long, default_value_t = 4)]
    pub max_concurrency: usize,

    /// Seconds to wait for each transaction confirmation
    #[arg(long, default_value_t = 60)]
    pub confirmation_timeout_secs: u64,

    /// The command to run
    #[command(subcommand)]
    pub command: Command,
}

/// The wiring commands
#[derive(Subcommand)]
pub enum Command {
    /// Verify the wiring without sending any transactions
    Check(SelectionArgs),
    /// Verify the wiring and correct each mismatch through its setter
    Reconcile(SelectionArgs),
}

impl Command {
    /// Dispatch the selected command
    pub async fn run(
        self,
        caller: &AlloyCaller,
        registry: &Registry,
        config: RunConfig,
    ) -> Result<Vec<Outcome>, ScriptError> {
        match self {
            Command::Check(args) => check_wiring(args, caller, registry, config).await,
            Command::Reconcile(args) => reconcile_wiring(args, caller, registry, config).await,
        }
    }
}

/// Selection of which assertions a run covers
#[derive(Args)]
pub struct SelectionArgs {
    /// Restrict the run to the named assertion ids; defaults to the full catalog
    pub assertions: Vec<String>,

    /// Restrict the run to one kind of assertion
    #[arg(short, long, value_enum, default_value_t = AssertionKind::All)]
    pub kind: AssertionKind,
}
