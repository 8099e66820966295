use std::sync::Arc;
use std::time::{Duration, Instant};

use sweep_common::error::ScanError;
use sweep_common::network::range::HostRange;
use sweep_common::network::target::Target;
use sweep_common::scan::outcome::ProbeOutcome;
use sweep_common::scan::request::ScanRequest;
use sweep_common::scan::result::CompletionState;
use sweep_core::scanner;
use tokio_util::sync::CancellationToken;

use crate::harness::{Host, ScriptedNetwork};

fn request(prefix: &str, start: u32, end: u32, port: u16) -> ScanRequest {
    ScanRequest::new(prefix.parse().unwrap(), HostRange::new(start, end), port)
}

/// One host accepting, four refusing, three slots.
#[tokio::test]
async fn single_open_host_among_refusals() {
    let network = Arc::new(ScriptedNetwork::new(Host::Refuse).host("192.168.3.2", Host::Accept));
    let request = request("192.168.3.", 1, 5, 22)
        .with_timeout(Duration::from_millis(500))
        .with_concurrency(3);

    let result = scanner::run(&request, network.clone()).await.unwrap();

    let expected = vec![
        (Target::new("192.168.3.1", 22), ProbeOutcome::Closed),
        (Target::new("192.168.3.2", 22), ProbeOutcome::Open),
        (Target::new("192.168.3.3", 22), ProbeOutcome::Closed),
        (Target::new("192.168.3.4", 22), ProbeOutcome::Closed),
        (Target::new("192.168.3.5", 22), ProbeOutcome::Closed),
    ];
    assert_eq!(result.entries(), expected.as_slice());
    assert_eq!(result.state(), CompletionState::Complete);
    assert_eq!(network.dials(), 5);
}

/// Later hosts answer first, yet the result stays in host order.
#[tokio::test]
async fn full_subnet_is_reported_in_host_order() {
    let mut network = ScriptedNetwork::new(Host::Refuse);
    for host in 1..=254u64 {
        let delay = Duration::from_millis((254 - host) % 7);
        let behaviour = if host % 50 == 0 { Host::Accept } else { Host::Refuse };
        network = network.slow_host(&format!("10.1.2.{host}"), behaviour, delay);
    }
    let network = Arc::new(network);
    let request = request("10.1.2.", 1, 254, 8080).with_concurrency(16);

    let result = scanner::run(&request, network.clone()).await.unwrap();

    assert_eq!(result.entries().len(), 254);
    for (i, (target, _)) in result.entries().iter().enumerate() {
        assert_eq!(target.address(), format!("10.1.2.{}", i + 1));
    }
    let open: Vec<String> = result.open_targets().map(|t| t.address().to_string()).collect();
    assert_eq!(open, vec!["10.1.2.50", "10.1.2.100", "10.1.2.150", "10.1.2.200", "10.1.2.250"]);
    assert!(network.peak_in_flight() <= 16);
}

#[tokio::test]
async fn every_failure_mode_is_recorded_and_the_scan_goes_on() {
    let network = Arc::new(
        ScriptedNetwork::new(Host::Refuse)
            .host("10.0.0.1", Host::Accept)
            .host("10.0.0.2", Host::Unreachable)
            .host("10.0.0.3", Host::Silent)
            .host("10.0.0.4", Host::Fail("connection reset by peer")),
    );
    let timeout = Duration::from_millis(150);
    let request = request("10.0.0.", 1, 5, 443).with_timeout(timeout).with_concurrency(5);

    let started = Instant::now();
    let result = scanner::run(&request, network).await.unwrap();
    let elapsed = started.elapsed();

    let outcomes: Vec<ProbeOutcome> = result.into_entries().into_iter().map(|(_, o)| o).collect();
    assert_eq!(
        outcomes,
        vec![
            ProbeOutcome::Open,
            ProbeOutcome::Unreachable,
            ProbeOutcome::TimedOut,
            ProbeOutcome::Error("connection reset by peer".into()),
            ProbeOutcome::Closed,
        ]
    );
    assert!(elapsed >= timeout, "silent host did not wait for its deadline");
    assert!(elapsed < timeout + Duration::from_millis(500), "scan hung for {elapsed:?}");
}

#[tokio::test]
async fn identical_scans_give_identical_results() {
    let network = Arc::new(
        ScriptedNetwork::new(Host::Refuse)
            .slow_host("172.16.0.3", Host::Accept, Duration::from_millis(20))
            .host("172.16.0.7", Host::Accept)
            .host("172.16.0.9", Host::Unreachable),
    );
    let request = request("172.16.0.", 1, 20, 22).with_concurrency(6);

    let first = scanner::run(&request, network.clone()).await.unwrap();
    let second = scanner::run(&request, network.clone()).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(network.dials(), 40);
}

#[tokio::test]
async fn independent_scans_run_side_by_side() {
    let left = Arc::new(ScriptedNetwork::new(Host::Accept));
    let right = Arc::new(ScriptedNetwork::new(Host::Refuse));
    let left_request = request("10.10.10.", 1, 30, 22).with_concurrency(4);
    let right_request = request("10.20.20.", 1, 40, 80).with_concurrency(5);

    let (left_result, right_result) = tokio::join!(
        scanner::run(&left_request, left.clone()),
        scanner::run(&right_request, right.clone()),
    );
    let left_result = left_result.unwrap();
    let right_result = right_result.unwrap();

    assert_eq!(left_result.summary().open, 30);
    assert_eq!(right_result.summary().closed, 40);
    assert!(left_result.entries().iter().all(|(t, _)| t.port() == 22));
    assert!(right_result.entries().iter().all(|(t, _)| t.port() == 80));
    assert!(left.peak_in_flight() <= 4);
    assert!(right.peak_in_flight() <= 5);
}

#[tokio::test]
async fn hostname_prefix_is_probed_by_name() {
    let network = Arc::new(ScriptedNetwork::new(Host::Refuse).host("db-2", Host::Accept));
    let request = request("db-", 1, 3, 5432);

    let result = scanner::run(&request, network.clone()).await.unwrap();

    let open: Vec<String> = result.open_targets().map(|t| t.to_string()).collect();
    assert_eq!(open, vec!["db-2:5432"]);
    assert_eq!(network.dialed().len(), 3);
}

#[tokio::test]
async fn bad_ranges_fail_before_any_dial() {
    let network = Arc::new(ScriptedNetwork::new(Host::Accept));

    for (start, end) in [(5, 1), (0, 10), (1, 255)] {
        let request = request("192.168.3.", start, end, 22);
        let err = scanner::start(&request, network.clone(), CancellationToken::new()).err();
        assert!(
            matches!(err, Some(ScanError::InvalidRange { .. })),
            "{start}-{end} was accepted"
        );
    }
    assert_eq!(network.dials(), 0);
}

#[tokio::test]
async fn bad_limits_fail_before_any_dial() {
    let network = Arc::new(ScriptedNetwork::new(Host::Accept));
    let zero_timeout = request("192.168.3.", 1, 5, 22).with_timeout(Duration::ZERO);
    let zero_slots = request("192.168.3.", 1, 5, 22).with_concurrency(0);

    assert_eq!(
        scanner::run(&zero_timeout, network.clone()).await,
        Err(ScanError::InvalidTimeout)
    );
    assert_eq!(
        scanner::run(&zero_slots, network.clone()).await,
        Err(ScanError::InvalidConcurrency)
    );
    assert_eq!(network.dials(), 0);
}

#[tokio::test]
async fn oversized_concurrency_runs_every_target_at_once() {
    let network = Arc::new(ScriptedNetwork::new(Host::Refuse).fallback_delay(Duration::from_millis(20)));
    let request = request("192.168.3.", 1, 5, 22).with_concurrency(usize::MAX);

    let mut scan = scanner::start(&request, network.clone(), CancellationToken::new()).unwrap();
    while scan.next_event().await.is_some() {}
    assert_eq!(scan.state(), CompletionState::Complete);

    let result = scan.finish().await.unwrap();
    assert_eq!(result.entries().len(), 5);
    assert_eq!(network.peak_in_flight(), 5);
}
