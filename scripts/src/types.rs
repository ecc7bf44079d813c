//! Type definitions used throughout the scripts

use std::fmt::{self, Display};

use clap::ValueEnum;

/// The kinds of wiring assertion a run can be restricted to
#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
pub enum AssertionKind {
    /// Address-reference assertions (one contract's stored reference to another)
    Address,
    /// Access-approval assertions (one contract's approval of another as a caller)
    Access,
    /// Both kinds
    All,
}

impl Display for AssertionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssertionKind::Address => write!(f, "address"),
            AssertionKind::Access => write!(f, "access"),
            AssertionKind::All => write!(f, "all"),
        }
    }
}
