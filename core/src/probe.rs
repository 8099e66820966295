//! The probe executor: one connection attempt, one classified outcome.
//!
//! The transport sits behind the [`Dialer`] trait so the executor's deadline and
//! classification logic is independent of where the bytes actually go.
//! [`crate::network::tcp::TcpDialer`] is the real thing.

use std::io::{self, ErrorKind};
use std::time::Duration;

use async_trait::async_trait;
use sweep_common::network::target::Target;
use sweep_common::scan::outcome::ProbeOutcome;
use tokio::time::timeout;
use tracing::debug;

/// Opens a connection to a target and closes it again.
#[async_trait]
pub trait Dialer: Send + Sync {
    /// Resolves to `Ok(())` once a connection was established and released.
    ///
    /// Implementations do not need to enforce a deadline, [`probe`] does.
    async fn dial(&self, target: &Target) -> io::Result<()>;
}

/// Probes `target`, giving up after `deadline`.
///
/// Never fails: every path, including a dial that hangs forever, ends in a
/// [`ProbeOutcome`].
pub async fn probe(dialer: &dyn Dialer, target: &Target, deadline: Duration) -> ProbeOutcome {
    let outcome = match timeout(deadline, dialer.dial(target)).await {
        Ok(Ok(())) => ProbeOutcome::Open,
        Ok(Err(err)) => classify(&err),
        Err(_elapsed) => ProbeOutcome::TimedOut,
    };
    debug!("{target} -> {outcome}");
    outcome
}

/// Maps a transport error onto an outcome.
pub fn classify(err: &io::Error) -> ProbeOutcome {
    match err.kind() {
        ErrorKind::ConnectionRefused => ProbeOutcome::Closed,
        ErrorKind::HostUnreachable | ErrorKind::NetworkUnreachable => ProbeOutcome::Unreachable,
        ErrorKind::TimedOut => ProbeOutcome::TimedOut,
        _ => ProbeOutcome::Error(err.to_string()),
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
