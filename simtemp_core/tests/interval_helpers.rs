// Focused tests for interval helpers.
use simtemp_core::SimtempError;
use simtemp_core::util::{check_interval, interval};
use std::time::Duration;

#[test]
fn interval_converts_and_clamps() {
    assert_eq!(interval(1), Duration::from_millis(1));
    assert_eq!(interval(500), Duration::from_millis(500));
    assert_eq!(interval(i32::MAX), Duration::from_millis(i32::MAX as u64));
    // Non-positive values never reach the producer, but still never busy-loop
    assert_eq!(interval(0), Duration::from_millis(1));
    assert_eq!(interval(-20), Duration::from_millis(1));
}

#[test]
fn check_interval_rejects_non_positive() {
    assert!(check_interval(1).is_ok());
    match check_interval(0) {
        Err(SimtempError::InvalidArgument(msg)) => assert!(msg.contains("got 0")),
        other => panic!("unexpected: {other:?}"),
    }
    assert!(matches!(
        check_interval(i32::MIN),
        Err(SimtempError::InvalidArgument(_))
    ));
}
