//! Collects outcomes in whatever order probes finish and hands them back in
//! enumeration order.
//!
//! The [`Aggregator`] is owned by exactly one task ([`collect`]); workers only
//! ever talk to it through a channel, so the result table is never shared.

use std::collections::BTreeMap;

use sweep_common::error::ScanError;
use sweep_common::network::target::Target;
use sweep_common::scan::outcome::{ProbeEvent, ProbeOutcome};
use sweep_common::scan::result::{CompletionState, ScanResult};
use tokio::sync::{mpsc, watch};
use tracing::{debug, warn};

/// Result table of a scan, keyed by enumeration position.
#[derive(Debug)]
pub struct Aggregator {
    expected: usize,
    slots: BTreeMap<usize, (Target, ProbeOutcome)>,
}

impl Aggregator {
    pub fn new(expected: usize) -> Self {
        Self {
            expected,
            slots: BTreeMap::new(),
        }
    }

    /// Fills the slot at `event.position`.
    ///
    /// Writing a slot twice, or a slot past the end, is a defect and is reported
    /// instead of overwriting anything.
    pub fn record(&mut self, event: ProbeEvent) -> Result<(), ScanError> {
        let ProbeEvent {
            position,
            target,
            outcome,
        } = event;

        if position >= self.expected {
            return Err(ScanError::UnknownPosition {
                position,
                expected: self.expected,
            });
        }
        if self.slots.contains_key(&position) {
            return Err(ScanError::DuplicateOutcome { position, target });
        }

        self.slots.insert(position, (target, outcome));
        Ok(())
    }

    pub fn expected(&self) -> usize {
        self.expected
    }

    pub fn recorded(&self) -> usize {
        self.slots.len()
    }

    /// [`CompletionState::Complete`] once every slot is filled. A cancelled
    /// scan only becomes partial when it is sealed by [`Self::finish`].
    pub fn state(&self) -> CompletionState {
        if self.recorded() == self.expected {
            CompletionState::Complete
        } else {
            CompletionState::InProgress
        }
    }

    /// Seals the table into a [`ScanResult`].
    ///
    /// Gaps are only legitimate when the scan was cancelled.
    pub fn finish(self, cancelled: bool) -> Result<ScanResult, ScanError> {
        let recorded = self.recorded();
        let state = if recorded == self.expected {
            CompletionState::Complete
        } else if cancelled {
            CompletionState::CancelledPartial
        } else {
            return Err(ScanError::MissingOutcomes {
                expected: self.expected,
                recorded,
            });
        };

        let entries: Vec<(Target, ProbeOutcome)> = self.slots.into_values().collect();
        Ok(ScanResult::new(entries, state, self.expected))
    }
}

/// Drains worker outcomes into `aggregator` until every sender is gone.
///
/// Each recorded outcome is forwarded to `events` in arrival order, after
/// `state` has been updated for it. A closed `events` receiver is fine, the
/// caller may not care about live progress.
pub async fn collect(
    mut aggregator: Aggregator,
    mut outcomes: mpsc::Receiver<ProbeEvent>,
    events: mpsc::UnboundedSender<ProbeEvent>,
    state: watch::Sender<CompletionState>,
) -> Result<Aggregator, ScanError> {
    while let Some(event) = outcomes.recv().await {
        debug!(
            "recorded {} ({}/{})",
            event.target,
            aggregator.recorded() + 1,
            aggregator.expected()
        );
        if let Err(e) = aggregator.record(event.clone()) {
            warn!("Aborting scan: {e}");
            return Err(e);
        }
        state.send_replace(aggregator.state());
        let _ = events.send(event);
    }
    Ok(aggregator)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
