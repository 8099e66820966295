use std::fmt;

use crate::network::target::Target;

/// The classified result of one probe.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ProbeOutcome {
    /// The handshake completed.
    Open,
    /// The host actively refused the connection.
    Closed,
    /// The host or its network could not be reached.
    Unreachable,
    /// Nothing definitive arrived before the deadline.
    TimedOut,
    /// Any other transport failure, with a human-readable cause.
    Error(String),
}

impl ProbeOutcome {
    /// Collapses the outcome to the binary open / not open view.
    pub fn is_open(&self) -> bool {
        matches!(self, ProbeOutcome::Open)
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProbeOutcome::Open => "open",
            ProbeOutcome::Closed => "closed",
            ProbeOutcome::Unreachable => "unreachable",
            ProbeOutcome::TimedOut => "timed out",
            ProbeOutcome::Error(_) => "error",
        }
    }
}

impl fmt::Display for ProbeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeOutcome::Error(cause) => write!(f, "error: {cause}"),
            other => f.write_str(other.label()),
        }
    }
}

/// One outcome as it arrives on the live stream.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProbeEvent {
    /// Zero-based index of the target in enumeration order.
    pub position: usize,
    pub target: Target,
    pub outcome: ProbeOutcome,
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
