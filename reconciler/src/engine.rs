//! The reconciler engine: verify and reconcile passes over an assertion catalog

use std::{collections::HashMap, sync::Arc, time::Duration};

use futures::{stream, StreamExt};
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::{
    caller::{CallValue, RemoteCaller},
    catalog::{Assertion, AssertionMode, Catalog},
    errors::{ConfigError, RemoteError},
    outcome::{Outcome, Status},
    registry::{Node, Registry},
};

/// The default bound on concurrent assertion evaluations
const DEFAULT_MAX_CONCURRENCY: usize = 4;

/// The default time to wait for a single confirmation
const DEFAULT_CONFIRMATION_TIMEOUT: Duration = Duration::from_secs(60);

/// Tunables for a single verify or reconcile run
#[derive(Clone, Debug)]
pub struct RunConfig {
    /// The bound on concurrently evaluated assertions
    pub max_concurrency: usize,
    /// How long to wait for each confirmation before giving up on observing it
    pub confirmation_timeout: Duration,
    /// External cancellation signal; once cancelled, no new assertion is started
    pub cancel: CancellationToken,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            confirmation_timeout: DEFAULT_CONFIRMATION_TIMEOUT,
            cancel: CancellationToken::new(),
        }
    }
}

/// An assertion with its nodes resolved, ready for evaluation.
///
/// Resolution happens up front so that registry problems abort the run before any
/// outcome is produced.
struct Prepared<'a> {
    /// The catalog assertion
    assertion: &'a Assertion,
    /// The resolved source node
    source: Node,
    /// The resolved expected target node
    expected: Node,
    /// The resolved setter target node, for mutable assertions
    set_target: Option<Node>,
}

/// The result of a single read-and-compare pass over one assertion
enum Checked {
    /// The assertion holds
    Holds,
    /// The assertion does not hold; carries a description of the divergence
    Divergent(String),
}

/// The reconciler engine.
///
/// Given a catalog and a registry, runs verify-only or verify-then-apply passes
/// through a [`RemoteCaller`], producing exactly one [`Outcome`] per selected
/// assertion. One assertion's failure never blocks another's evaluation.
pub struct Reconciler<'a, C: RemoteCaller> {
    /// The node registry, shared read-only across evaluations
    registry: &'a Registry,
    /// The transport used for remote calls
    caller: &'a C,
    /// Run tunables
    config: RunConfig,
}

impl<'a, C: RemoteCaller> Reconciler<'a, C> {
    /// Create an engine with default tunables
    pub fn new(registry: &'a Registry, caller: &'a C) -> Self {
        Self::with_config(registry, caller, RunConfig::default())
    }

    /// Create an engine with explicit tunables
    pub fn with_config(registry: &'a Registry, caller: &'a C, config: RunConfig) -> Self {
        Self {
            registry,
            caller,
            config,
        }
    }

    /// Verify the selected assertions against remote state without mutating anything.
    ///
    /// `subset` restricts the run to the named assertion ids; `None` runs the whole
    /// catalog. Outcomes are returned in catalog-declaration order.
    pub async fn verify(
        &self,
        catalog: &Catalog,
        subset: Option<&[String]>,
    ) -> Result<Vec<Outcome>, ConfigError> {
        self.run(catalog, subset, false).await
    }

    /// Verify the selected assertions and apply the configured setter for every
    /// mismatch, re-verifying once after each confirmed write.
    pub async fn reconcile(
        &self,
        catalog: &Catalog,
        subset: Option<&[String]>,
    ) -> Result<Vec<Outcome>, ConfigError> {
        self.run(catalog, subset, true).await
    }

    /// Shared run loop for both passes
    async fn run(
        &self,
        catalog: &Catalog,
        subset: Option<&[String]>,
        apply: bool,
    ) -> Result<Vec<Outcome>, ConfigError> {
        catalog.validate(self.registry)?;
        let selected = catalog.select(subset)?;

        let mut prepared = Vec::with_capacity(selected.len());
        for assertion in selected {
            let source = self.registry.resolve(&assertion.source)?;
            let expected = self.registry.resolve(&assertion.expected_target)?;
            let set_target = match &assertion.set {
                Some(set) => Some(self.registry.resolve(&set.target)?),
                None => None,
            };
            prepared.push(Prepared {
                assertion,
                source,
                expected,
                set_target,
            });
        }

        // One lock per source node with a pending setter: a node may only have one
        // outstanding state-changing call at a time
        let write_locks: HashMap<String, Arc<Mutex<()>>> = prepared
            .iter()
            .filter(|p| p.assertion.set.is_some())
            .map(|p| (p.assertion.source.clone(), Arc::new(Mutex::new(()))))
            .collect();

        let outcomes = stream::iter(prepared)
            .map(|p| self.run_one(p, apply, &write_locks))
            .buffered(self.config.max_concurrency.max(1))
            .collect::<Vec<_>>()
            .await;

        Ok(outcomes)
    }

    /// Evaluate a single assertion end to end.
    ///
    /// Self-contained: every remote failure is folded into the returned outcome.
    async fn run_one(
        &self,
        p: Prepared<'_>,
        apply: bool,
        write_locks: &HashMap<String, Arc<Mutex<()>>>,
    ) -> Outcome {
        let id = p.assertion.id.clone();

        if self.config.cancel.is_cancelled() {
            return Outcome::with_detail(id, Status::Cancelled, "run cancelled before evaluation");
        }

        let divergence = match self.check(&p).await {
            Ok(Checked::Holds) => {
                debug!(assertion = %id, "assertion verified");
                return Outcome::new(id, Status::Verified);
            }
            Ok(Checked::Divergent(detail)) => detail,
            Err(err) => return Outcome::with_detail(id, Status::Error, err.to_string()),
        };

        if !apply {
            warn!(assertion = %id, %divergence, "wiring mismatch");
            return Outcome::with_detail(id, Status::Mismatch, divergence);
        }

        let Some(set) = &p.assertion.set else {
            return Outcome::with_detail(id, Status::Error, "no setter configured");
        };
        let target_addr = match &p.set_target {
            Some(node) => node.address,
            None => p.expected.address,
        };

        let confirmation = {
            // Serialize state-changing calls per source node
            let _guard = match write_locks.get(&p.assertion.source) {
                Some(lock) => Some(lock.lock().await),
                None => None,
            };

            info!(
                assertion = %id,
                node = %p.assertion.source,
                setter = %set.operation,
                "submitting setter"
            );
            let handle = match self.caller.write_call(&p.source, &set.operation, target_addr).await
            {
                Ok(handle) => handle,
                Err(err) => return Outcome::with_detail(id, Status::ApplyFailed, err.to_string()),
            };

            match tokio::time::timeout(
                self.config.confirmation_timeout,
                self.caller.await_confirmation(handle),
            )
            .await
            {
                Err(_) => {
                    return Outcome::with_detail(
                        id,
                        Status::ApplyFailed,
                        RemoteError::ConfirmationTimeout.to_string(),
                    )
                }
                Ok(Err(err)) => {
                    return Outcome::with_detail(id, Status::ApplyFailed, err.to_string())
                }
                Ok(Ok(confirmation)) => confirmation,
            }
        };

        if !confirmation.success {
            let detail = confirmation
                .detail
                .unwrap_or_else(|| "confirmation reported failure".to_string());
            return Outcome::with_detail(id, Status::ApplyFailed, detail);
        }

        // Re-verify once: a confirmed write that still fails verification signals a
        // logic inconsistency on the remote side or a race with a concurrent writer
        match self.check(&p).await {
            Ok(Checked::Holds) => {
                info!(assertion = %id, "setter applied and re-verified");
                Outcome::new(id, Status::Applied)
            }
            Ok(Checked::Divergent(detail)) => Outcome::with_detail(
                id,
                Status::ApplyFailed,
                format!("state diverged after confirmed write: {}", detail),
            ),
            Err(err) => Outcome::with_detail(
                id,
                Status::ApplyFailed,
                format!("re-verification failed: {}", err),
            ),
        }
    }

    /// Run the assertion's read operation and classify the result
    async fn check(&self, p: &Prepared<'_>) -> Result<Checked, RemoteError> {
        match p.assertion.mode {
            AssertionMode::GetterEquality => {
                let value = self
                    .caller
                    .read_call(&p.source, &p.assertion.operation, &[])
                    .await?;
                match value {
                    CallValue::Addr(addr) if addr == p.expected.address => Ok(Checked::Holds),
                    CallValue::Addr(addr) => Ok(Checked::Divergent(format!(
                        "expected {:#x}, got {:#x}",
                        p.expected.address, addr
                    ))),
                    CallValue::Flag(_) => Err(RemoteError::Decode(
                        "expected an address return value, got a bool".to_string(),
                    )),
                }
            }
            AssertionMode::BooleanCheck => {
                let value = self
                    .caller
                    .read_call(&p.source, &p.assertion.operation, &[p.expected.address])
                    .await?;
                match value {
                    CallValue::Flag(true) => Ok(Checked::Holds),
                    CallValue::Flag(false) => Ok(Checked::Divergent(format!(
                        "{} does not approve {}",
                        p.assertion.source, p.assertion.expected_target
                    ))),
                    CallValue::Addr(_) => Err(RemoteError::Decode(
                        "expected a bool return value, got an address".to_string(),
                    )),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{
        collections::{HashMap, VecDeque},
        str::FromStr,
        sync::{
            atomic::{AtomicBool, AtomicUsize, Ordering},
            Mutex,
        },
        time::Duration,
    };

    use alloy_primitives::Address;
    use tokio_util::sync::CancellationToken;

    use super::{Reconciler, RunConfig};
    use crate::{
        caller::{CallValue, Confirmation, RemoteCaller},
        catalog::{Assertion, Catalog},
        errors::{ConfigError, RemoteError},
        outcome::Status,
        registry::{Interface, Node, OperationKind, Registry},
    };

    /// Address of the `x` node
    const X_ADDR: &str = "0x0000000000000000000000000000000000000001";
    /// Address of the `y` node
    const Y_ADDR: &str = "0x00000000000000000000000000000000000000ab";
    /// Address of the `z` node
    const Z_ADDR: &str = "0x0000000000000000000000000000000000000003";

    /// How the mock resolves a confirmation
    #[derive(Clone)]
    enum ConfirmBehavior {
        /// Confirm successfully after a short delay
        Success,
        /// Confirm with a failed status
        Failure(&'static str),
        /// Never resolve
        Hang,
    }

    /// An in-memory remote caller with scripted reads and recorded writes
    #[derive(Default)]
    struct MockCaller {
        /// Scripted read results per (node, operation); the last entry repeats
        reads: Mutex<HashMap<(String, String), VecDeque<Result<CallValue, RemoteError>>>>,
        /// Recorded write calls
        writes: Mutex<Vec<(String, String, Address)>>,
        /// Confirmation behavior per (node, operation); defaults to success
        confirmations: HashMap<(String, String), ConfirmBehavior>,
        /// Count of write calls currently between submission and confirmation, per node
        active_writes: Mutex<HashMap<String, usize>>,
        /// Set if two writes to the same node ever overlapped
        overlapping_writes: AtomicBool,
        /// Cancelled when the first read is served, if set
        cancel_on_first_read: Option<CancellationToken>,
        /// Number of reads served
        reads_seen: AtomicUsize,
    }

    impl MockCaller {
        /// Script the sequence of results for a read operation
        fn script_read(
            &mut self,
            node: &str,
            operation: &str,
            results: Vec<Result<CallValue, RemoteError>>,
        ) {
            self.reads
                .lock()
                .unwrap()
                .insert((node.to_string(), operation.to_string()), results.into());
        }

        /// Override the confirmation behavior for a setter
        fn confirm_with(&mut self, node: &str, operation: &str, behavior: ConfirmBehavior) {
            self.confirmations
                .insert((node.to_string(), operation.to_string()), behavior);
        }

        /// The write calls recorded so far
        fn writes(&self) -> Vec<(String, String, Address)> {
            self.writes.lock().unwrap().clone()
        }
    }

    impl RemoteCaller for MockCaller {
        type Handle = (String, String);

        async fn read_call(
            &self,
            node: &Node,
            operation: &str,
            _args: &[Address],
        ) -> Result<CallValue, RemoteError> {
            if let Some(token) = &self.cancel_on_first_read {
                if self.reads_seen.fetch_add(1, Ordering::SeqCst) == 0 {
                    token.cancel();
                }
            }

            let mut reads = self.reads.lock().unwrap();
            let queue = reads
                .get_mut(&(node.id.clone(), operation.to_string()))
                .expect("unscripted read");
            if queue.len() > 1 {
                queue.pop_front().unwrap()
            } else {
                queue.front().cloned().unwrap()
            }
        }

        async fn write_call(
            &self,
            node: &Node,
            operation: &str,
            target: Address,
        ) -> Result<Self::Handle, RemoteError> {
            {
                let mut active = self.active_writes.lock().unwrap();
                let count = active.entry(node.id.clone()).or_default();
                *count += 1;
                if *count > 1 {
                    self.overlapping_writes.store(true, Ordering::SeqCst);
                }
            }
            self.writes
                .lock()
                .unwrap()
                .push((node.id.clone(), operation.to_string(), target));
            Ok((node.id.clone(), operation.to_string()))
        }

        async fn await_confirmation(
            &self,
            handle: Self::Handle,
        ) -> Result<Confirmation, RemoteError> {
            let behavior = self
                .confirmations
                .get(&handle)
                .cloned()
                .unwrap_or(ConfirmBehavior::Success);

            let confirmation = match behavior {
                ConfirmBehavior::Success => {
                    tokio::time::sleep(Duration::from_millis(5)).await;
                    Confirmation {
                        success: true,
                        detail: None,
                    }
                }
                ConfirmBehavior::Failure(msg) => Confirmation {
                    success: false,
                    detail: Some(msg.to_string()),
                },
                ConfirmBehavior::Hang => {
                    futures::future::pending::<()>().await;
                    unreachable!()
                }
            };

            let mut active = self.active_writes.lock().unwrap();
            if let Some(count) = active.get_mut(&handle.0) {
                *count = count.saturating_sub(1);
            }
            Ok(confirmation)
        }
    }

    /// A registry with nodes `x`, `y`, and `z`; `x` carries the full interface the
    /// tests exercise
    fn test_registry() -> Registry {
        let mut registry = Registry::new();
        registry.insert(
            "x",
            X_ADDR,
            Interface::new()
                .with_operation("refY", OperationKind::AddressGetter)
                .with_operation("setRefY", OperationKind::ReferenceSetter)
                .with_operation("refZ", OperationKind::AddressGetter)
                .with_operation("setRefZ", OperationKind::ReferenceSetter)
                .with_operation("isYApproved", OperationKind::ApprovalCheck)
                .with_operation("approveY", OperationKind::ReferenceSetter),
        );
        registry.insert("y", Y_ADDR, Interface::new());
        registry.insert("z", Z_ADDR, Interface::new());
        registry
    }

    /// Parse an address constant
    fn addr(s: &str) -> Address {
        Address::from_str(s).unwrap()
    }

    #[tokio::test]
    async fn test_verify_getter_equality_match() {
        let mut caller = MockCaller::default();
        caller.script_read("x", "refY", vec![Ok(CallValue::Addr(addr(Y_ADDR)))]);

        let registry = test_registry();
        let mut catalog = Catalog::new();
        catalog.push(Assertion::getter("a2", "x", "refY", "y"));

        let engine = Reconciler::new(&registry, &caller);
        let outcomes = engine.verify(&catalog, None).await.unwrap();

        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0].assertion_id, "a2");
        assert_eq!(outcomes[0].status, Status::Verified);
        assert!(caller.writes().is_empty());
    }

    #[tokio::test]
    async fn test_verify_ignores_address_case() {
        // The remote returns the checksummed form; the registry stores lowercase
        let mut caller = MockCaller::default();
        let upper = Y_ADDR.to_uppercase().replace("0X", "0x");
        caller.script_read("x", "refY", vec![Ok(CallValue::Addr(addr(&upper)))]);

        let registry = test_registry();
        let mut catalog = Catalog::new();
        catalog.push(Assertion::getter("a1", "x", "refY", "y"));

        let engine = Reconciler::new(&registry, &caller);
        let outcomes = engine.verify(&catalog, None).await.unwrap();
        assert_eq!(outcomes[0].status, Status::Verified);
    }

    #[tokio::test]
    async fn test_verify_getter_equality_mismatch() {
        let mut caller = MockCaller::default();
        caller.script_read("x", "refY", vec![Ok(CallValue::Addr(addr(Z_ADDR)))]);

        let registry = test_registry();
        let mut catalog = Catalog::new();
        catalog.push(Assertion::getter("a1", "x", "refY", "y").with_setter("setRefY"));

        let engine = Reconciler::new(&registry, &caller);
        let outcomes = engine.verify(&catalog, None).await.unwrap();

        assert_eq!(outcomes[0].status, Status::Mismatch);
        // Verify never mutates, even with a setter configured
        assert!(caller.writes().is_empty());
    }

    #[tokio::test]
    async fn test_reconcile_applies_missing_approval() {
        // Scenario: boolean check is false, setter succeeds, re-verify reads true
        let mut caller = MockCaller::default();
        caller.script_read(
            "x",
            "isYApproved",
            vec![Ok(CallValue::Flag(false)), Ok(CallValue::Flag(true))],
        );

        let registry = test_registry();
        let mut catalog = Catalog::new();
        catalog.push(Assertion::check("a1", "x", "isYApproved", "y").with_setter("approveY"));

        let engine = Reconciler::new(&registry, &caller);
        let outcomes = engine.reconcile(&catalog, None).await.unwrap();

        assert_eq!(outcomes[0].status, Status::Applied);
        assert_eq!(
            caller.writes(),
            vec![("x".to_string(), "approveY".to_string(), addr(Y_ADDR))]
        );
    }

    #[tokio::test]
    async fn test_reconcile_is_idempotent_when_verified() {
        let mut caller = MockCaller::default();
        caller.script_read("x", "isYApproved", vec![Ok(CallValue::Flag(true))]);

        let registry = test_registry();
        let mut catalog = Catalog::new();
        catalog.push(Assertion::check("a1", "x", "isYApproved", "y").with_setter("approveY"));

        let engine = Reconciler::new(&registry, &caller);
        let outcomes = engine.reconcile(&catalog, None).await.unwrap();

        assert_eq!(outcomes[0].status, Status::Verified);
        assert!(caller.writes().is_empty());
    }

    #[tokio::test]
    async fn test_reconcile_without_setter_never_mutates() {
        let mut caller = MockCaller::default();
        caller.script_read("x", "refY", vec![Ok(CallValue::Addr(addr(Z_ADDR)))]);

        let registry = test_registry();
        let mut catalog = Catalog::new();
        catalog.push(Assertion::getter("a1", "x", "refY", "y"));

        let engine = Reconciler::new(&registry, &caller);
        let outcomes = engine.reconcile(&catalog, None).await.unwrap();

        assert_eq!(outcomes[0].status, Status::Error);
        assert_eq!(outcomes[0].detail.as_deref(), Some("no setter configured"));
        assert!(caller.writes().is_empty());
    }

    #[tokio::test]
    async fn test_partial_failure_isolation() {
        let mut caller = MockCaller::default();
        caller.script_read("x", "refY", vec![Ok(CallValue::Addr(addr(Y_ADDR)))]);
        caller.script_read(
            "x",
            "refZ",
            vec![Err(RemoteError::Unreachable("connection refused".to_string()))],
        );
        caller.script_read("x", "isYApproved", vec![Ok(CallValue::Flag(true))]);

        let registry = test_registry();
        let mut catalog = Catalog::new();
        catalog.push(Assertion::getter("a1", "x", "refY", "y"));
        catalog.push(Assertion::getter("a2", "x", "refZ", "z"));
        catalog.push(Assertion::check("a3", "x", "isYApproved", "y"));

        let engine = Reconciler::new(&registry, &caller);
        let outcomes = engine.verify(&catalog, None).await.unwrap();

        assert_eq!(outcomes.len(), 3);
        assert_eq!(outcomes[0].status, Status::Verified);
        assert_eq!(outcomes[1].status, Status::Error);
        assert!(outcomes[1].detail.as_deref().unwrap().contains("unreachable"));
        assert_eq!(outcomes[2].status, Status::Verified);
    }

    #[tokio::test]
    async fn test_divergence_after_confirmed_write() {
        // The write confirms but the re-read still disagrees
        let mut caller = MockCaller::default();
        caller.script_read("x", "isYApproved", vec![Ok(CallValue::Flag(false))]);

        let registry = test_registry();
        let mut catalog = Catalog::new();
        catalog.push(Assertion::check("a1", "x", "isYApproved", "y").with_setter("approveY"));

        let engine = Reconciler::new(&registry, &caller);
        let outcomes = engine.reconcile(&catalog, None).await.unwrap();

        assert_eq!(outcomes[0].status, Status::ApplyFailed);
        assert!(outcomes[0].detail.as_deref().unwrap().contains("diverged"));
    }

    #[tokio::test]
    async fn test_failed_confirmation_is_apply_failed() {
        let mut caller = MockCaller::default();
        caller.script_read("x", "isYApproved", vec![Ok(CallValue::Flag(false))]);
        caller.confirm_with("x", "approveY", ConfirmBehavior::Failure("out of gas"));

        let registry = test_registry();
        let mut catalog = Catalog::new();
        catalog.push(Assertion::check("a1", "x", "isYApproved", "y").with_setter("approveY"));

        let engine = Reconciler::new(&registry, &caller);
        let outcomes = engine.reconcile(&catalog, None).await.unwrap();

        assert_eq!(outcomes[0].status, Status::ApplyFailed);
        assert_eq!(outcomes[0].detail.as_deref(), Some("out of gas"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_confirmation_timeout_is_apply_failed() {
        let mut caller = MockCaller::default();
        caller.script_read("x", "isYApproved", vec![Ok(CallValue::Flag(false))]);
        caller.confirm_with("x", "approveY", ConfirmBehavior::Hang);

        let registry = test_registry();
        let mut catalog = Catalog::new();
        catalog.push(Assertion::check("a1", "x", "isYApproved", "y").with_setter("approveY"));

        let config = RunConfig {
            confirmation_timeout: Duration::from_secs(1),
            ..RunConfig::default()
        };
        let engine = Reconciler::with_config(&registry, &caller, config);
        let outcomes = engine.reconcile(&catalog, None).await.unwrap();

        assert_eq!(outcomes[0].status, Status::ApplyFailed);
        assert!(outcomes[0].detail.as_deref().unwrap().contains("timeout"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_writes_to_one_node_are_serialized() {
        let mut caller = MockCaller::default();
        caller.script_read(
            "x",
            "refY",
            vec![Ok(CallValue::Addr(addr(Z_ADDR))), Ok(CallValue::Addr(addr(Y_ADDR)))],
        );
        caller.script_read(
            "x",
            "refZ",
            vec![Ok(CallValue::Addr(addr(Y_ADDR))), Ok(CallValue::Addr(addr(Z_ADDR)))],
        );

        let registry = test_registry();
        let mut catalog = Catalog::new();
        catalog.push(Assertion::getter("a1", "x", "refY", "y").with_setter("setRefY"));
        catalog.push(Assertion::getter("a2", "x", "refZ", "z").with_setter("setRefZ"));

        let config = RunConfig {
            max_concurrency: 2,
            ..RunConfig::default()
        };
        let engine = Reconciler::with_config(&registry, &caller, config);
        let outcomes = engine.reconcile(&catalog, None).await.unwrap();

        assert!(outcomes.iter().all(|o| o.status == Status::Applied));
        assert!(!caller.overlapping_writes.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_cancellation_marks_unstarted_assertions() {
        // The first served read cancels the run; with a concurrency of one, the
        // remaining assertions must not start
        let cancel = CancellationToken::new();
        let mut caller = MockCaller {
            cancel_on_first_read: Some(cancel.clone()),
            ..MockCaller::default()
        };
        caller.script_read("x", "refY", vec![Ok(CallValue::Addr(addr(Y_ADDR)))]);
        caller.script_read("x", "refZ", vec![Ok(CallValue::Addr(addr(Z_ADDR)))]);
        caller.script_read("x", "isYApproved", vec![Ok(CallValue::Flag(true))]);

        let registry = test_registry();
        let mut catalog = Catalog::new();
        catalog.push(Assertion::getter("a1", "x", "refY", "y"));
        catalog.push(Assertion::getter("a2", "x", "refZ", "z"));
        catalog.push(Assertion::check("a3", "x", "isYApproved", "y"));

        let config = RunConfig {
            max_concurrency: 1,
            cancel,
            ..RunConfig::default()
        };
        let engine = Reconciler::with_config(&registry, &caller, config);
        let outcomes = engine.verify(&catalog, None).await.unwrap();

        assert_eq!(outcomes[0].status, Status::Verified);
        assert_eq!(outcomes[1].status, Status::Cancelled);
        assert_eq!(outcomes[2].status, Status::Cancelled);
    }

    #[tokio::test]
    async fn test_unknown_node_aborts_before_outcomes() {
        let caller = MockCaller::default();
        let registry = test_registry();
        let mut catalog = Catalog::new();
        catalog.push(Assertion::getter("a1", "missing", "refY", "y"));

        let engine = Reconciler::new(&registry, &caller);
        let err = engine.verify(&catalog, None).await.unwrap_err();
        assert_eq!(err, ConfigError::UnknownNode("missing".to_string()));
    }

    #[tokio::test]
    async fn test_subset_runs_only_selected_assertions() {
        let mut caller = MockCaller::default();
        caller.script_read("x", "isYApproved", vec![Ok(CallValue::Flag(true))]);

        let registry = test_registry();
        let mut catalog = Catalog::new();
        catalog.push(Assertion::getter("a1", "x", "refY", "y"));
        catalog.push(Assertion::check("a2", "x", "isYApproved", "y"));

        let engine = Reconciler::new(&registry, &caller);
        let subset = vec!["a2".to_string()];
        let outcomes = engine.verify(&catalog, Some(&subset)).await.unwrap();

        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0].assertion_id, "a2");
        assert_eq!(outcomes[0].status, Status::Verified);
    }
}
