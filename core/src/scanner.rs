//! The entry point for running a scan.
//!
//! [`start`] validates the request, then spawns two tasks:
//!
//! * the **scheduler**, which enumerates targets and fans probes out over the
//!   bounded worker pool, and
//! * the **collector**, the single owner of the [`Aggregator`], which records
//!   outcomes and republishes them as a live event stream.
//!
//! The returned [`ScanHandle`] gives access to that stream, to cancellation and
//! to the final, enumeration-ordered [`ScanResult`]. Every scan owns its own
//! state, so any number of them can run side by side.

use std::sync::Arc;

use sweep_common::error::ScanError;
use sweep_common::scan::outcome::ProbeEvent;
use sweep_common::scan::request::ScanRequest;
use sweep_common::scan::result::{CompletionState, ScanResult};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::aggregator::{self, Aggregator};
use crate::enumerator;
use crate::probe::Dialer;
use crate::scheduler::{DispatchReport, Scheduler};

/// A running scan.
pub struct ScanHandle {
    events: mpsc::UnboundedReceiver<ProbeEvent>,
    scheduler: JoinHandle<DispatchReport>,
    collector: JoinHandle<Result<Aggregator, ScanError>>,
    cancel: CancellationToken,
    state: watch::Receiver<CompletionState>,
    expected: usize,
}

impl ScanHandle {
    /// Next outcome in arrival order, or `None` once every dispatched probe has reported.
    pub async fn next_event(&mut self) -> Option<ProbeEvent> {
        self.events.recv().await
    }

    /// Stops dispatching new probes. Probes in flight still finish.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// `Complete` once every target has an outcome, `InProgress` until then.
    ///
    /// Whether a cancelled scan ends up partial is only known to [`Self::finish`].
    pub fn state(&self) -> CompletionState {
        *self.state.borrow()
    }

    /// Number of targets the request enumerates.
    pub fn expected(&self) -> usize {
        self.expected
    }

    /// Waits for the scan to settle and returns the ordered result.
    ///
    /// Events not yet taken with [`Self::next_event`] are discarded.
    pub async fn finish(self) -> Result<ScanResult, ScanError> {
        let report = self
            .scheduler
            .await
            .map_err(|e| ScanError::TaskFailed(e.to_string()))?;
        let aggregator = self
            .collector
            .await
            .map_err(|e| ScanError::TaskFailed(e.to_string()))??;

        let result = aggregator.finish(report.cancelled)?;
        info!(
            "Scan {}: {} of {} targets recorded, {} dispatched",
            result.state(),
            result.entries().len(),
            result.expected(),
            report.dispatched
        );
        Ok(result)
    }
}

/// Starts a scan on the current Tokio runtime.
///
/// Configuration errors are returned before any socket is opened.
/// Raising `cancel` later yields a partial result rather than an error.
pub fn start(
    request: &ScanRequest,
    dialer: Arc<dyn Dialer>,
    cancel: CancellationToken,
) -> Result<ScanHandle, ScanError> {
    request.validate()?;
    let targets = enumerator::enumerate(request)?;
    let expected = targets.len();
    // More slots than targets would never be used.
    let slots = request.concurrency.min(expected);

    info!(
        "Scanning {} hosts of {} on port {} ({} at a time)",
        expected, request.prefix, request.port, slots
    );

    let (outcome_tx, outcome_rx) = mpsc::channel(slots);
    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let (state_tx, state_rx) = watch::channel(CompletionState::InProgress);

    let collector_cancel = cancel.clone();
    let collector = tokio::spawn(async move {
        let collected = aggregator::collect(Aggregator::new(expected), outcome_rx, event_tx, state_tx).await;
        if collected.is_err() {
            collector_cancel.cancel();
        }
        collected
    });

    let scheduler = Scheduler::new(dialer, request.timeout, slots, cancel.clone());
    let scheduler = tokio::spawn(scheduler.run(targets, outcome_tx));

    Ok(ScanHandle {
        events: event_rx,
        scheduler,
        collector,
        cancel,
        state: state_rx,
        expected,
    })
}

/// Runs a scan to completion without watching it live.
pub async fn run(request: &ScanRequest, dialer: Arc<dyn Dialer>) -> Result<ScanResult, ScanError> {
    start(request, dialer, CancellationToken::new())?.finish().await
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
