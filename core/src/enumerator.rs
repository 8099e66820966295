//! Turns a scan request into the ordered sequence of targets to probe.

use std::ops::RangeInclusive;

use sweep_common::error::ScanError;
use sweep_common::network::range::NetworkPrefix;
use sweep_common::network::target::Target;
use sweep_common::scan::request::ScanRequest;

/// Lazy sequence of targets in ascending host-index order.
///
/// Cloning yields an independent iterator from the current position, so a
/// fresh clone of [`enumerate`]'s result restarts the sequence.
#[derive(Clone, Debug)]
pub struct Targets {
    prefix: NetworkPrefix,
    port: u16,
    indices: RangeInclusive<u32>,
}

impl Iterator for Targets {
    type Item = Target;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.indices.next()?;
        Some(Target::new(self.prefix.address(index), self.port))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.indices.size_hint()
    }
}

impl ExactSizeIterator for Targets {}

/// Builds the target sequence for `request`.
///
/// Fails with [`ScanError::InvalidRange`] when the range is empty, inverted or
/// reaches outside the prefix, before anything is produced.
pub fn enumerate(request: &ScanRequest) -> Result<Targets, ScanError> {
    if !request.prefix.contains(&request.hosts) {
        let (min, max) = request.prefix.bounds();
        return Err(ScanError::InvalidRange {
            start: request.hosts.start,
            end: request.hosts.end,
            min,
            max,
        });
    }

    Ok(Targets {
        prefix: request.prefix.clone(),
        port: request.port,
        indices: request.hosts.iter(),
    })
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
