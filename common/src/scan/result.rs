use std::fmt;

use crate::network::target::Target;
use crate::scan::outcome::ProbeOutcome;

/// Where a scan stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CompletionState {
    InProgress,
    /// Every enumerated target has an outcome.
    Complete,
    /// Cancelled before every target had an outcome.
    CancelledPartial,
}

impl fmt::Display for CompletionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            CompletionState::InProgress => "in progress",
            CompletionState::Complete => "complete",
            CompletionState::CancelledPartial => "cancelled (partial)",
        };
        f.write_str(text)
    }
}

/// Outcome counts of a finished scan.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScanSummary {
    pub open: usize,
    pub closed: usize,
    pub unreachable: usize,
    pub timed_out: usize,
    pub errors: usize,
}

impl ScanSummary {
    pub fn record(&mut self, outcome: &ProbeOutcome) {
        match outcome {
            ProbeOutcome::Open => self.open += 1,
            ProbeOutcome::Closed => self.closed += 1,
            ProbeOutcome::Unreachable => self.unreachable += 1,
            ProbeOutcome::TimedOut => self.timed_out += 1,
            ProbeOutcome::Error(_) => self.errors += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.open + self.closed + self.unreachable + self.timed_out + self.errors
    }
}

/// The final, enumeration-ordered result of a scan.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScanResult {
    entries: Vec<(Target, ProbeOutcome)>,
    state: CompletionState,
    expected: usize,
}

impl ScanResult {
    /// `entries` must already be in enumeration order.
    pub fn new(entries: Vec<(Target, ProbeOutcome)>, state: CompletionState, expected: usize) -> Self {
        Self {
            entries,
            state,
            expected,
        }
    }

    pub fn entries(&self) -> &[(Target, ProbeOutcome)] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<(Target, ProbeOutcome)> {
        self.entries
    }

    pub fn state(&self) -> CompletionState {
        self.state
    }

    /// Number of targets the request enumerated, recorded or not.
    pub fn expected(&self) -> usize {
        self.expected
    }

    pub fn is_complete(&self) -> bool {
        self.state == CompletionState::Complete
    }

    pub fn open_targets(&self) -> impl Iterator<Item = &Target> {
        self.entries
            .iter()
            .filter(|(_, outcome)| outcome.is_open())
            .map(|(target, _)| target)
    }

    pub fn summary(&self) -> ScanSummary {
        let mut summary = ScanSummary::default();
        for (_, outcome) in &self.entries {
            summary.record(outcome);
        }
        summary
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
