pub mod scan;

use std::time::Duration;

use clap::Parser;
use sweep_common::config::Config;
use sweep_common::network::range::{HostRange, NetworkPrefix};
use sweep_common::scan::request::{DEFAULT_CONCURRENCY, DEFAULT_PORT, ScanRequest};

#[derive(Parser, Debug)]
#[command(name = "sweep")]
#[command(about = "Sweeps a range of hosts for an open TCP port.")]
pub struct CommandLine {
    /// Network prefix: `192.168.3.`, `10.0.0.0/16` or a hostname fragment like `node-`
    #[arg(default_value = "192.168.3.")]
    pub prefix: NetworkPrefix,

    /// Inclusive host-index range, e.g. `1-254` or `7`
    #[arg(short, long, default_value = "1-254")]
    pub range: HostRange,

    /// TCP port to probe on every host
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Per-probe timeout in seconds, fractions allowed
    #[arg(short, long, default_value = "0.5", value_parser = parse_timeout)]
    pub timeout: Duration,

    /// Maximum number of probes in flight at once
    #[arg(short, long, default_value_t = DEFAULT_CONCURRENCY)]
    pub concurrency: usize,

    /// Also print closed, unreachable, timed-out and failed targets
    #[arg(short, long)]
    pub all: bool,

    /// Reduce output; repeat to print nothing but open targets
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub quiet: u8,

    /// Do not print the banner
    #[arg(long)]
    pub no_banner: bool,

    /// Do not listen for the `q` key
    #[arg(long)]
    pub no_input: bool,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn request(&self) -> ScanRequest {
        ScanRequest::new(self.prefix.clone(), self.range, self.port)
            .with_timeout(self.timeout)
            .with_concurrency(self.concurrency)
    }

    pub fn config(&self) -> Config {
        Config {
            no_banner: self.no_banner,
            quiet: self.quiet,
            show_all: self.all,
            disable_input: self.no_input,
        }
    }
}

fn parse_timeout(s: &str) -> Result<Duration, String> {
    let seconds: f64 = s
        .parse()
        .map_err(|e| format!("invalid number of seconds '{s}': {e}"))?;
    if !seconds.is_finite() || seconds <= 0.0 {
        return Err(format!("timeout must be a positive number of seconds, got '{s}'"));
    }
    Duration::try_from_secs_f64(seconds).map_err(|e| e.to_string())
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
