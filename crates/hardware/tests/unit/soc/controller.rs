//! Wait-state handshake tests.

use rstest::rstest;
use rvpipe_core::common::AccessType;
use rvpipe_core::config::MemoryConfig;
use rvpipe_core::soc::memory::controller::{FixedLatency, Handshake};

#[rstest]
#[case(0)]
#[case(1)]
#[case(4)]
fn held_request_completes_after_latency(#[case] latency: u32) {
    let mut port = Handshake::default();

    for tick in 0..latency {
        assert!(!port.poll(7u32, latency), "tick {tick} should wait");
        assert!(port.is_busy());
    }
    assert!(port.poll(7u32, latency));
    assert!(!port.is_busy());
}

#[test]
fn different_request_restarts_countdown() {
    let mut port = Handshake::default();

    assert!(!port.poll(1u32, 2));
    assert!(!port.poll(2u32, 2), "new request starts over");
    assert!(!port.poll(2u32, 2));
    assert!(port.poll(2u32, 2));
}

#[test]
fn back_to_back_requests_each_wait() {
    let mut port = Handshake::default();

    assert!(!port.poll(5u32, 1));
    assert!(port.poll(5u32, 1));
    assert!(!port.poll(5u32, 1), "a completed request does not linger");
}

#[test]
fn clear_abandons_outstanding_request() {
    let mut port = Handshake::default();
    assert!(!port.poll(3u32, 5));

    port.clear();

    assert!(!port.is_busy());
}

#[test]
fn latency_per_access_type() {
    let config = MemoryConfig {
        fetch_latency: 1,
        read_latency: 2,
        write_latency: 3,
        ..MemoryConfig::default()
    };
    let latency = FixedLatency::from(&config);

    assert_eq!(latency.access_latency(AccessType::Fetch), 1);
    assert_eq!(latency.access_latency(AccessType::Read), 2);
    assert_eq!(latency.access_latency(AccessType::Write), 3);
}
