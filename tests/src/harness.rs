use std::collections::HashMap;
use std::io;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use sweep_common::network::target::Target;
use sweep_core::probe::Dialer;

/// How a scripted host answers a connection attempt.
#[derive(Clone, Debug)]
pub enum Host {
    Accept,
    Refuse,
    Unreachable,
    /// Never answers.
    Silent,
    Fail(&'static str),
}

/// A fake network: every address answers as scripted, after an optional delay.
pub struct ScriptedNetwork {
    hosts: HashMap<String, (Host, Duration)>,
    fallback: Host,
    fallback_delay: Duration,
    dials: AtomicUsize,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
    log: Mutex<Vec<String>>,
}

impl ScriptedNetwork {
    /// Every unscripted address answers with `fallback`.
    pub fn new(fallback: Host) -> Self {
        Self {
            hosts: HashMap::new(),
            fallback,
            fallback_delay: Duration::ZERO,
            dials: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
            log: Mutex::new(Vec::new()),
        }
    }

    pub fn host(mut self, address: &str, host: Host) -> Self {
        self.hosts.insert(address.to_string(), (host, Duration::ZERO));
        self
    }

    pub fn slow_host(mut self, address: &str, host: Host, delay: Duration) -> Self {
        self.hosts.insert(address.to_string(), (host, delay));
        self
    }

    pub fn fallback_delay(mut self, delay: Duration) -> Self {
        self.fallback_delay = delay;
        self
    }

    pub fn dials(&self) -> usize {
        self.dials.load(Ordering::SeqCst)
    }

    pub fn peak_in_flight(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    /// Addresses in the order their dials started.
    pub fn dialed(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }
}

#[async_trait]
impl Dialer for ScriptedNetwork {
    async fn dial(&self, target: &Target) -> io::Result<()> {
        self.dials.fetch_add(1, Ordering::SeqCst);
        self.log.lock().unwrap().push(target.address().to_string());
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        let _slot = InFlight(&self.in_flight);

        let (host, delay) = self
            .hosts
            .get(target.address())
            .cloned()
            .unwrap_or_else(|| (self.fallback.clone(), self.fallback_delay));

        tokio::time::sleep(delay).await;

        match host {
            Host::Accept => Ok(()),
            Host::Refuse => Err(io::ErrorKind::ConnectionRefused.into()),
            Host::Unreachable => Err(io::ErrorKind::HostUnreachable.into()),
            Host::Fail(cause) => Err(io::Error::other(cause)),
            Host::Silent => std::future::pending().await,
        }
    }
}

/// Counts a dial as in flight until it returns or is dropped by a timeout.
struct InFlight<'a>(&'a AtomicUsize);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}
