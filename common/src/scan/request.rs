use std::time::Duration;

use crate::error::ScanError;
use crate::network::range::{HostRange, NetworkPrefix};

pub const DEFAULT_PORT: u16 = 22;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(500);
pub const DEFAULT_CONCURRENCY: usize = 64;

/// Everything needed to run one scan. Built once per invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScanRequest {
    pub prefix: NetworkPrefix,
    pub hosts: HostRange,
    pub port: u16,
    /// Deadline for a single probe, name resolution included.
    pub timeout: Duration,
    /// Maximum number of probes in flight at once.
    pub concurrency: usize,
}

impl ScanRequest {
    pub fn new(prefix: NetworkPrefix, hosts: HostRange, port: u16) -> Self {
        Self {
            prefix,
            hosts,
            port,
            ..Self::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Rejects a request that cannot be scanned, before any socket is opened.
    pub fn validate(&self) -> Result<(), ScanError> {
        if !self.prefix.contains(&self.hosts) {
            let (min, max) = self.prefix.bounds();
            return Err(ScanError::InvalidRange {
                start: self.hosts.start,
                end: self.hosts.end,
                min,
                max,
            });
        }
        if self.timeout.is_zero() {
            return Err(ScanError::InvalidTimeout);
        }
        if self.concurrency == 0 {
            return Err(ScanError::InvalidConcurrency);
        }
        Ok(())
    }
}

impl Default for ScanRequest {
    fn default() -> Self {
        Self {
            prefix: NetworkPrefix::default(),
            hosts: HostRange::default(),
            port: DEFAULT_PORT,
            timeout: DEFAULT_TIMEOUT,
            concurrency: DEFAULT_CONCURRENCY,
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
