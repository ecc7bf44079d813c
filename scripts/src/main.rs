//! Entrypoint for the wiring scripts

use std::{process::ExitCode, time::Duration};

use clap::Parser;
use reconciler::{engine::RunConfig, outcome::Outcome};
use scripts::{cli::Cli, deployments::load_registry, errors::ScriptError, report, transport};
use tokio_util::sync::CancellationToken;
use tracing::warn;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    tracing_subscriber::fmt().pretty().init();

    match run(cli).await {
        Ok(outcomes) => {
            if report::render(&outcomes) {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(1)
            }
        }
        Err(err) => {
            eprintln!("{}", err);
            ExitCode::from(2)
        }
    }
}

/// Connect, load the registry, and dispatch the selected command
async fn run(cli: Cli) -> Result<Vec<Outcome>, ScriptError> {
    let caller = transport::connect(&cli.priv_key, &cli.rpc_url)?;
    let registry = load_registry(&cli.deployments_path)?;

    // Ctrl-c stops new assertions from starting; in-flight work completes
    let cancel = CancellationToken::new();
    let signal_token = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupt received, finishing in-flight work");
            signal_token.cancel();
        }
    });

    let config = RunConfig {
        max_concurrency: cli.max_concurrency,
        confirmation_timeout: Duration::from_secs(cli.confirmation_timeout_secs),
        cancel,
    };

    cli.command.run(&caller, &registry, config).await
}
