//! # Network Prefix and Host Range Models
//!
//! A scan covers `prefix + index` for every index in an inclusive [`HostRange`].
//!
//! Supported prefix formats:
//! * **Dotted**: `192.168.3.` (one to three octets and a trailing dot).
//! * **CIDR**: `192.168.3.0/24`.
//! * **Hostname fragment**: `node-` (host 7 becomes `node-7`).

use std::fmt;
use std::net::Ipv4Addr;
use std::ops::RangeInclusive;
use std::str::FromStr;

use pnet::ipnetwork::Ipv4Network;

use crate::error::ScanError;

/// The base that host indices are appended to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NetworkPrefix {
    /// An IPv4 network; index `i` is `network + i`.
    Ipv4(Ipv4Network),
    /// A textual prefix; index `i` is the prefix followed by `i`.
    Hostname(String),
}

impl NetworkPrefix {
    /// Smallest and largest host index this prefix can represent.
    ///
    /// Networks larger than a /31 exclude their network and broadcast addresses.
    pub fn bounds(&self) -> (u32, u32) {
        match self {
            NetworkPrefix::Ipv4(network) => {
                let host_bits: u32 = 32 - u32::from(network.prefix());
                let size: u64 = 1u64 << host_bits;
                if network.prefix() >= 31 {
                    (0, (size - 1) as u32)
                } else {
                    (1, (size - 2) as u32)
                }
            }
            NetworkPrefix::Hostname(_) => (0, u32::MAX),
        }
    }

    /// Whether every index in `range` maps onto an address of this prefix.
    pub fn contains(&self, range: &HostRange) -> bool {
        let (min, max) = self.bounds();
        !range.is_empty() && range.start >= min && range.end <= max
    }

    /// Address of host `index`. The caller keeps `index` inside [`Self::bounds`].
    pub fn address(&self, index: u32) -> String {
        match self {
            NetworkPrefix::Ipv4(network) => {
                let base: u32 = u32::from(network.network());
                Ipv4Addr::from(base.wrapping_add(index)).to_string()
            }
            NetworkPrefix::Hostname(fragment) => format!("{fragment}{index}"),
        }
    }
}

impl Default for NetworkPrefix {
    fn default() -> Self {
        let network = Ipv4Network::new(Ipv4Addr::new(192, 168, 3, 0), 24)
            .unwrap_or_else(|_| unreachable!("/24 is a valid prefix length"));
        NetworkPrefix::Ipv4(network)
    }
}

impl fmt::Display for NetworkPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkPrefix::Ipv4(network) => write!(f, "{}/{}", network.network(), network.prefix()),
            NetworkPrefix::Hostname(fragment) => write!(f, "{fragment}*"),
        }
    }
}

impl FromStr for NetworkPrefix {
    type Err = ScanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ScanError::InvalidPrefix(s.to_string()));
        }

        if let Some(prefix) = parse_cidr(s)? {
            return Ok(prefix);
        }

        if let Some(prefix) = parse_dotted(s)? {
            return Ok(prefix);
        }

        parse_hostname(s)
    }
}

/// Parses `a.b.c.d/n`, normalising the address to the network address.
fn parse_cidr(s: &str) -> Result<Option<NetworkPrefix>, ScanError> {
    if !s.contains('/') {
        return Ok(None);
    }

    let parsed = s
        .parse::<Ipv4Network>()
        .map_err(|_| ScanError::InvalidPrefix(s.to_string()))?;
    let network = Ipv4Network::new(parsed.network(), parsed.prefix())
        .map_err(|_| ScanError::InvalidPrefix(s.to_string()))?;

    Ok(Some(NetworkPrefix::Ipv4(network)))
}

/// Parses `a.`, `a.b.` or `a.b.c.` into a /8, /16 or /24.
fn parse_dotted(s: &str) -> Result<Option<NetworkPrefix>, ScanError> {
    let Some(body) = s.strip_suffix('.') else {
        return Ok(None);
    };
    if !body.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return Ok(None);
    }

    let octets: Vec<u8> = body
        .split('.')
        .map(|octet| octet.parse::<u8>())
        .collect::<Result<Vec<u8>, _>>()
        .map_err(|_| ScanError::InvalidPrefix(s.to_string()))?;

    if octets.is_empty() || octets.len() > 3 {
        return Err(ScanError::InvalidPrefix(s.to_string()));
    }

    let mut full = [0u8; 4];
    full[..octets.len()].copy_from_slice(&octets);
    let prefix_len = (octets.len() * 8) as u8;

    let network = Ipv4Network::new(Ipv4Addr::from(full), prefix_len)
        .map_err(|_| ScanError::InvalidPrefix(s.to_string()))?;

    Ok(Some(NetworkPrefix::Ipv4(network)))
}

/// Accepts hostname characters, but not something that only looks like a mistyped IP.
fn parse_hostname(s: &str) -> Result<NetworkPrefix, ScanError> {
    let valid_chars = s.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.');
    let starts_well = s.chars().next().is_some_and(|c| c.is_ascii_alphanumeric());
    let numeric_only = s.chars().all(|c| c.is_ascii_digit() || c == '.');

    if !valid_chars || !starts_well || numeric_only {
        return Err(ScanError::InvalidPrefix(s.to_string()));
    }

    Ok(NetworkPrefix::Hostname(s.to_string()))
}

/// An inclusive range of host indices. `start > end` is an empty range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HostRange {
    pub start: u32,
    pub end: u32,
}

impl HostRange {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }

    pub fn iter(&self) -> RangeInclusive<u32> {
        self.start..=self.end
    }
}

impl Default for HostRange {
    fn default() -> Self {
        Self::new(1, 254)
    }
}

impl fmt::Display for HostRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

impl FromStr for HostRange {
    type Err = String;

    /// Parses `start-end` or a single index.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse = |part: &str| {
            part.trim()
                .parse::<u32>()
                .map_err(|e| format!("invalid host index '{}': {e}", part.trim()))
        };

        match s.split_once('-') {
            Some((start, end)) => Ok(HostRange::new(parse(start)?, parse(end)?)),
            None => {
                let index = parse(s)?;
                Ok(HostRange::new(index, index))
            }
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
