//! Rendering run outcomes to the console

use colored::{ColoredString, Colorize};
use itertools::Itertools;
use reconciler::outcome::{Outcome, Status};

/// Statuses in summary order
const SUMMARY_ORDER: [Status; 6] = [
    Status::Verified,
    Status::Applied,
    Status::Mismatch,
    Status::ApplyFailed,
    Status::Error,
    Status::Cancelled,
];

/// Print one line per outcome plus a summary line, returning whether the run was clean
pub fn render(outcomes: &[Outcome]) -> bool {
    for outcome in outcomes {
        match &outcome.detail {
            Some(detail) => {
                println!("{}: {} ({})", outcome.assertion_id, label(outcome.status), detail)
            }
            None => println!("{}: {}", outcome.assertion_id, label(outcome.status)),
        }
    }

    let counts = outcomes.iter().counts_by(|outcome| outcome.status);
    let summary = SUMMARY_ORDER
        .iter()
        .filter_map(|status| counts.get(status).map(|count| format!("{} {}", count, status)))
        .join(", ");
    if !summary.is_empty() {
        println!("\n{}", summary);
    }

    outcomes.iter().all(|outcome| outcome.status.is_clean())
}

/// The colored label for a status
fn label(status: Status) -> ColoredString {
    match status {
        Status::Verified => "verified".green(),
        Status::Applied => "applied".green(),
        Status::Mismatch => "mismatch".yellow(),
        Status::ApplyFailed => "apply failed".red(),
        Status::Error => "error".red(),
        Status::Cancelled => "cancelled".dimmed(),
    }
}
