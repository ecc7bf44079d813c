//! Per-assertion outcomes produced by a verify or reconcile run

use std::fmt::{self, Display, Formatter};

/// The terminal status of one assertion in a run
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Status {
    /// The assertion holds against remote state
    Verified,
    /// The assertion does not hold (verify-only, or no apply was attempted)
    Mismatch,
    /// The assertion did not hold, the setter was applied, and re-verification passed
    Applied,
    /// Applying the setter failed, or remote state still diverged after a confirmed write
    ApplyFailed,
    /// A remote call failed, or an apply was requested with no setter configured
    Error,
    /// The run was cancelled before this assertion was evaluated
    Cancelled,
}

impl Status {
    /// Whether the status represents correct wiring at the end of the run
    pub fn is_clean(&self) -> bool {
        matches!(self, Status::Verified | Status::Applied)
    }
}

impl Display for Status {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Status::Verified => write!(f, "verified"),
            Status::Mismatch => write!(f, "mismatch"),
            Status::Applied => write!(f, "applied"),
            Status::ApplyFailed => write!(f, "apply failed"),
            Status::Error => write!(f, "error"),
            Status::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// The outcome of evaluating one assertion.
///
/// A run produces exactly one outcome per requested assertion, in catalog order.
#[derive(Clone, Debug)]
pub struct Outcome {
    /// The assertion this outcome belongs to
    pub assertion_id: String,
    /// The terminal status
    pub status: Status,
    /// Supporting detail: the observed divergence or the underlying error
    pub detail: Option<String>,
}

impl Outcome {
    /// An outcome with no detail
    pub fn new(assertion_id: impl Into<String>, status: Status) -> Self {
        Self {
            assertion_id: assertion_id.into(),
            status,
            detail: None,
        }
    }

    /// An outcome carrying supporting detail
    pub fn with_detail(
        assertion_id: impl Into<String>,
        status: Status,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            assertion_id: assertion_id.into(),
            status,
            detail: Some(detail.into()),
        }
    }
}
