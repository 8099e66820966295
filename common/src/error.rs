use thiserror::Error;

use crate::network::target::Target;

/// Everything that can stop a scan from starting or from finishing cleanly.
///
/// Per-target network failures are not errors, they are recorded as
/// [`crate::scan::outcome::ProbeOutcome`] values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScanError {
    #[error("host range {start}-{end} is empty or outside {min}-{max}")]
    InvalidRange { start: u32, end: u32, min: u32, max: u32 },
    #[error("invalid network prefix `{0}`")]
    InvalidPrefix(String),
    #[error("probe timeout must be greater than zero")]
    InvalidTimeout,
    #[error("concurrency limit must be at least 1")]
    InvalidConcurrency,
    #[error("outcome for {target} (position {position}) was recorded twice")]
    DuplicateOutcome { position: usize, target: Target },
    #[error("outcome reported for position {position}, but only {expected} targets exist")]
    UnknownPosition { position: usize, expected: usize },
    #[error("scan ended with {recorded} of {expected} outcomes and was not cancelled")]
    MissingOutcomes { expected: usize, recorded: usize },
    #[error("scan task failed: {0}")]
    TaskFailed(String),
}
