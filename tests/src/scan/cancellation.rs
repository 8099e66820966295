use std::sync::Arc;
use std::time::Duration;

use sweep_common::network::range::HostRange;
use sweep_common::scan::request::ScanRequest;
use sweep_common::scan::result::CompletionState;
use sweep_core::scanner;
use tokio_util::sync::CancellationToken;

use crate::harness::{Host, ScriptedNetwork};

async fn wait_for_dials(network: &ScriptedNetwork, count: usize) {
    while network.dials() < count {
        tokio::time::sleep(Duration::from_millis(2)).await;
    }
}

/// Ten targets, three slots, cancelled while the first three are still in flight.
#[tokio::test]
async fn cancel_after_three_dispatched() {
    let network = Arc::new(
        ScriptedNetwork::new(Host::Refuse).fallback_delay(Duration::from_millis(200)),
    );
    let request = ScanRequest::new("192.168.3.".parse().unwrap(), HostRange::new(1, 10), 22)
        .with_concurrency(3)
        .with_timeout(Duration::from_millis(500));

    let cancel = CancellationToken::new();
    let scan = scanner::start(&request, network.clone(), cancel.clone()).unwrap();

    tokio::time::timeout(Duration::from_secs(2), wait_for_dials(&network, 3))
        .await
        .expect("first three probes were never dispatched");
    scan.cancel();

    let result = scan.finish().await.unwrap();

    assert_eq!(result.state(), CompletionState::CancelledPartial);
    assert!(result.entries().len() >= 3 && result.entries().len() <= 10);
    assert_eq!(result.expected(), 10);
    // Nothing was dispatched after the signal.
    assert_eq!(network.dials(), 3);
    // In-flight probes were allowed to finish.
    assert_eq!(result.entries().len(), 3);
    let addresses: Vec<&str> = result.entries().iter().map(|(t, _)| t.address()).collect();
    assert_eq!(addresses, vec!["192.168.3.1", "192.168.3.2", "192.168.3.3"]);
}

#[tokio::test]
async fn live_stream_ends_after_in_flight_probes_report() {
    let network = Arc::new(
        ScriptedNetwork::new(Host::Accept).fallback_delay(Duration::from_millis(100)),
    );
    let request = ScanRequest::new("10.0.0.".parse().unwrap(), HostRange::new(1, 50), 22)
        .with_concurrency(5);

    let cancel = CancellationToken::new();
    let mut scan = scanner::start(&request, network.clone(), cancel.clone()).unwrap();

    let mut seen = 0;
    while let Some(event) = scan.next_event().await {
        seen += 1;
        assert!(event.outcome.is_open());
        if seen == 7 {
            cancel.cancel();
        }
    }

    let dispatched = network.dials();
    let result = scan.finish().await.unwrap();

    assert_eq!(result.state(), CompletionState::CancelledPartial);
    assert_eq!(result.entries().len(), seen);
    assert_eq!(seen, dispatched);
    assert!(dispatched < 50);
}

#[tokio::test]
async fn cancelling_a_finished_scan_keeps_it_complete() {
    let network = Arc::new(ScriptedNetwork::new(Host::Refuse));
    let request = ScanRequest::new("10.0.0.".parse().unwrap(), HostRange::new(1, 4), 22);

    let cancel = CancellationToken::new();
    let mut scan = scanner::start(&request, network, cancel.clone()).unwrap();
    while scan.next_event().await.is_some() {}
    cancel.cancel();

    let result = scan.finish().await.unwrap();
    assert_eq!(result.state(), CompletionState::Complete);
    assert_eq!(result.entries().len(), 4);
}
