//! Implementations of the wiring commands

use reconciler::{
    engine::{Reconciler, RunConfig},
    outcome::Outcome,
    registry::Registry,
};
use tracing::info;

use crate::{
    catalog::wiring_catalog, cli::SelectionArgs, errors::ScriptError, transport::AlloyCaller,
};

/// Verify the selected assertions without mutating any remote state
pub(crate) async fn check_wiring(
    args: SelectionArgs,
    caller: &AlloyCaller,
    registry: &Registry,
    config: RunConfig,
) -> Result<Vec<Outcome>, ScriptError> {
    let SelectionArgs { assertions, kind } = args;
    let catalog = wiring_catalog(kind);
    let subset = (!assertions.is_empty()).then_some(assertions.as_slice());
    info!(catalog = catalog.len(), %kind, "checking wiring");

    let engine = Reconciler::with_config(registry, caller, config);
    let outcomes = engine.verify(&catalog, subset).await?;
    Ok(outcomes)
}

/// Verify the selected assertions and correct each mismatch through its setter
pub(crate) async fn reconcile_wiring(
    args: SelectionArgs,
    caller: &AlloyCaller,
    registry: &Registry,
    config: RunConfig,
) -> Result<Vec<Outcome>, ScriptError> {
    let SelectionArgs { assertions, kind } = args;
    let catalog = wiring_catalog(kind);
    let subset = (!assertions.is_empty()).then_some(assertions.as_slice());
    info!(catalog = catalog.len(), %kind, "reconciling wiring");

    let engine = Reconciler::with_config(registry, caller, config);
    let outcomes = engine.reconcile(&catalog, subset).await?;
    Ok(outcomes)
}
