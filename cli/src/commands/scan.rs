use std::sync::Arc;
use std::time::Instant;

use colored::*;
use sweep_common::config::Config;
use sweep_common::scan::outcome::ProbeEvent;
use sweep_common::scan::request::ScanRequest;
use sweep_common::scan::result::ScanResult;
use sweep_core::network::tcp::TcpDialer;
use sweep_core::scanner::{self, ScanHandle};
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, warn};

use crate::sprint;
use crate::terminal::{colors, format, input::InputHandle, print, progress};

pub async fn scan(request: ScanRequest, cfg: &Config) -> anyhow::Result<()> {
    let cancel = CancellationToken::new();
    let mut handle: ScanHandle = scanner::start(&request, Arc::new(TcpDialer), cancel.clone())?;

    print_plan(&request, handle.expected(), cfg);

    let _input = if cfg.disable_input {
        None
    } else {
        InputHandle::start(cancel.clone())
    };
    let ctrl_c = tokio::spawn(cancel_on_ctrl_c(cancel.clone()));

    let start_time = Instant::now();
    let span = progress::scan_span(handle.expected(), cfg.quiet > 0);
    let mut open: usize = 0;

    async {
        while let Some(event) = handle.next_event().await {
            if event.outcome.is_open() {
                open += 1;
            }
            progress::advance(&tracing::Span::current(), open);
            report_event(&event, cfg);
        }
    }
    .instrument(span)
    .await;

    ctrl_c.abort();
    drop(_input);

    let result: ScanResult = handle.finish().await?;
    scan_ends(&result, start_time, cfg);
    Ok(())
}

async fn cancel_on_ctrl_c(cancel: CancellationToken) {
    if tokio::signal::ctrl_c().await.is_ok() {
        warn!("Interrupted, letting in-flight probes finish...");
        cancel.cancel();
    }
}

fn print_plan(request: &ScanRequest, total: usize, cfg: &Config) {
    if cfg.quiet > 0 {
        return;
    }
    print::header("starting scan");
    print::field("Network", request.prefix.to_string().color(colors::ACCENT));
    print::field("Hosts", format!("{} ({total} targets)", request.hosts));
    print::field("Port", request.port.to_string().color(colors::ACCENT));
    print::field("Timeout", format!("{:.2}s", request.timeout.as_secs_f64()));
    print::field("Concurrency", request.concurrency.to_string());
    if !cfg.disable_input {
        print::bullet("Press 'q' to stop early".italic());
    }
}

/// Live output, in arrival order.
fn report_event(event: &ProbeEvent, cfg: &Config) {
    if cfg.quiet >= 2 {
        if event.outcome.is_open() {
            sprint!(&event.target.to_string());
        }
        return;
    }
    if event.outcome.is_open() || cfg.show_all {
        sprint!(&format::outcome_line(&event.target, &event.outcome));
    }
}

fn scan_ends(result: &ScanResult, start_time: Instant, cfg: &Config) {
    if cfg.quiet >= 2 {
        return;
    }

    let summary = result.summary();
    if cfg.quiet == 0 {
        print::header("scan results");
        if summary.open == 0 {
            print::no_results();
        } else {
            for target in result.open_targets() {
                print::bullet(target.to_string().color(colors::OPEN));
            }
        }
        sprint!();
        for (key, value) in format::summary_details(&summary) {
            print::field(key, value);
        }
    }

    let banner = format::completion_banner(
        result.state(),
        summary.open,
        result.entries().len(),
        result.expected(),
        start_time.elapsed(),
    );

    match cfg.quiet {
        0 => {
            print::rule();
            print::centered(&banner);
            print::rule();
        }
        _ => {
            sprint!(&banner);
        }
    }

    if !result.is_complete() {
        warn!(
            "{} targets were never probed",
            result.expected() - result.entries().len()
        );
    }
}
