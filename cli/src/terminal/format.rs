use std::time::Duration;

use colored::*;
use sweep_common::network::target::Target;
use sweep_common::scan::outcome::ProbeOutcome;
use sweep_common::scan::result::{CompletionState, ScanSummary};

use crate::terminal::colors;

pub fn outcome_color(outcome: &ProbeOutcome) -> Color {
    match outcome {
        ProbeOutcome::Open => colors::OPEN,
        ProbeOutcome::Closed => colors::CLOSED,
        ProbeOutcome::Unreachable => colors::UNREACHABLE,
        ProbeOutcome::TimedOut => colors::TIMED_OUT,
        ProbeOutcome::Error(_) => colors::ERROR,
    }
}

/// `[○]` for open targets, `[ ]` for everything else.
pub fn outcome_marker(outcome: &ProbeOutcome) -> ColoredString {
    if outcome.is_open() {
        "[○]".color(colors::OPEN).bold()
    } else {
        "[ ]".color(colors::SEPARATOR)
    }
}

/// One line per probed target, e.g. `[○] 192.168.3.2:22 is open`.
pub fn outcome_line(target: &Target, outcome: &ProbeOutcome) -> String {
    let verb = match outcome {
        ProbeOutcome::Error(cause) => format!("failed ({cause})"),
        other => format!("is {}", other.label()),
    };
    format!(
        "{} {} {}",
        outcome_marker(outcome),
        target.to_string().color(colors::ACCENT),
        verb.color(outcome_color(outcome))
    )
}

pub fn summary_details(summary: &ScanSummary) -> Vec<(&'static str, ColoredString)> {
    let count = |n: usize, color: Color| n.to_string().color(color).bold();
    vec![
        ("Open", count(summary.open, colors::OPEN)),
        ("Closed", count(summary.closed, colors::TEXT_DEFAULT)),
        ("Unreachable", count(summary.unreachable, colors::UNREACHABLE)),
        ("Timed out", count(summary.timed_out, colors::TIMED_OUT)),
        ("Errors", count(summary.errors, colors::ERROR)),
    ]
}

pub fn completion_banner(state: CompletionState, open: usize, probed: usize, total: usize, elapsed: Duration) -> String {
    let open: ColoredString = format!("{open} open").bold().green();
    let elapsed: ColoredString = format!("{:.2}s", elapsed.as_secs_f64()).bold().yellow();
    match state {
        CompletionState::CancelledPartial => format!(
            "Scan Cancelled: {open} among {probed} of {total} targets in {elapsed}"
        ),
        _ => format!("Scan Complete: {open} of {total} targets in {elapsed}"),
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
