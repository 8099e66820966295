//! Bounded fan-out of probes.
//!
//! Each worker slot is one semaphore permit. Targets are dispatched strictly in
//! enumeration order, one per free slot, while outcomes flow back over a channel
//! in whatever order the probes finish.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use sweep_common::network::target::Target;
use sweep_common::scan::outcome::{ProbeEvent, ProbeOutcome};
use tokio::sync::{Semaphore, mpsc};
use tokio::task::{self, JoinError, JoinSet};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, warn};

use crate::enumerator::Targets;
use crate::probe::{self, Dialer};

/// What the dispatch loop did before it returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchReport {
    pub dispatched: usize,
    /// Dispatch stopped early because cancellation was raised.
    pub cancelled: bool,
}

pub struct Scheduler {
    dialer: Arc<dyn Dialer>,
    timeout: Duration,
    concurrency: usize,
    cancel: CancellationToken,
}

impl Scheduler {
    pub fn new(
        dialer: Arc<dyn Dialer>,
        timeout: Duration,
        concurrency: usize,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            dialer,
            timeout,
            concurrency,
            cancel,
        }
    }

    /// Probes every target, never more than `concurrency` at once.
    ///
    /// Limits above [`Semaphore::MAX_PERMITS`] are capped to it.
    ///
    /// Once `cancel` fires nothing new is dispatched, but probes already in
    /// flight run to completion or to their own deadline. Returns after every
    /// dispatched probe has delivered its outcome to `outcomes`.
    pub async fn run(self, targets: Targets, outcomes: mpsc::Sender<ProbeEvent>) -> DispatchReport {
        let slots = Arc::new(Semaphore::new(self.concurrency.min(Semaphore::MAX_PERMITS)));
        let mut workers: JoinSet<()> = JoinSet::new();
        let mut in_flight: HashMap<task::Id, (usize, Target)> = HashMap::new();
        let mut dispatched: usize = 0;
        let mut cancelled = false;

        for (position, target) in targets.enumerate() {
            let permit = tokio::select! {
                biased;
                _ = self.cancel.cancelled() => {
                    cancelled = true;
                    break;
                }
                permit = Arc::clone(&slots).acquire_owned() => match permit {
                    Ok(permit) => permit,
                    Err(_) => break,
                },
            };

            while let Some(joined) = workers.try_join_next_with_id() {
                settle(joined, &mut in_flight, &outcomes).await;
            }

            debug!("dispatching {target}");
            let dialer = Arc::clone(&self.dialer);
            let tx = outcomes.clone();
            let deadline = self.timeout;
            let probe_target = target.clone();

            let handle = workers.spawn(async move {
                let outcome = probe::probe(dialer.as_ref(), &probe_target, deadline).await;
                let event = ProbeEvent {
                    position,
                    target: probe_target,
                    outcome,
                };
                let _ = tx.send(event).await;
                drop(permit);
            });

            in_flight.insert(handle.id(), (position, target));
            dispatched += 1;
        }

        if cancelled {
            warn!("Scan cancelled after {dispatched} probes, waiting for {} in flight", workers.len());
        }

        while let Some(joined) = workers.join_next_with_id().await {
            settle(joined, &mut in_flight, &outcomes).await;
        }

        DispatchReport {
            dispatched,
            cancelled,
        }
    }
}

/// Forgets a finished worker. A worker that died before reporting still owes
/// its target an outcome, so one is sent on its behalf.
async fn settle(
    joined: Result<(task::Id, ()), JoinError>,
    in_flight: &mut HashMap<task::Id, (usize, Target)>,
    outcomes: &mpsc::Sender<ProbeEvent>,
) {
    match joined {
        Ok((id, ())) => {
            in_flight.remove(&id);
        }
        Err(e) => {
            let Some((position, target)) = in_flight.remove(&e.id()) else {
                return;
            };
            error!("Probe of {target} failed: {e}");
            let event = ProbeEvent {
                position,
                target,
                outcome: ProbeOutcome::Error(format!("probe task failed: {e}")),
            };
            let _ = outcomes.send(event).await;
        }
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
