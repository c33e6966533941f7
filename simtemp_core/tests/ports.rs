//! ConfigPort / ReadPort behavior on a live service.

use rstest::rstest;
use simtemp_core::mocks::ScriptedSource;
use simtemp_core::{
    ConfigPort, ReadPort, ServiceConfig, ServiceHandle, SimtempError, initialize_with, shutdown,
};
use simtemp_traits::clock::ManualClock;
use std::time::{Duration, Instant};

/// Service with a long interval so no tick interferes unless a test wants one.
fn idle_service() -> ServiceHandle {
    initialize_with(
        ServiceConfig {
            sampling_ms: 60_000,
            ..ServiceConfig::default()
        },
        ScriptedSource::new(vec![Ok(42_000)]),
        ManualClock::new(),
    )
    .unwrap()
}

#[rstest]
#[case(1)]
#[case(50)]
#[case(500)]
#[case(i32::MAX)]
fn set_then_get_sampling_ms(#[case] v: i32) {
    let svc = idle_service();
    svc.set_sampling_ms(v).unwrap();
    assert_eq!(svc.get_sampling_ms().unwrap(), v);
    shutdown(&svc).unwrap();
}

#[rstest]
#[case(0)]
#[case(-1)]
#[case(i32::MIN)]
fn invalid_sampling_ms_is_rejected_and_prior_value_kept(#[case] v: i32) {
    let svc = idle_service();
    svc.set_sampling_ms(250).unwrap();
    match svc.set_sampling_ms(v) {
        Err(SimtempError::InvalidArgument(msg)) => assert!(msg.contains("sampling_ms")),
        other => panic!("unexpected: {other:?}"),
    }
    assert_eq!(svc.get_sampling_ms().unwrap(), 250);
    shutdown(&svc).unwrap();
}

#[rstest]
#[case(45_000)]
#[case(0)]
#[case(-273_150)]
#[case(i32::MAX)]
fn threshold_is_unconstrained(#[case] v: i32) {
    let svc = idle_service();
    svc.set_threshold_mc(v).unwrap();
    assert_eq!(svc.get_threshold_mc().unwrap(), v);
    shutdown(&svc).unwrap();
}

#[test]
fn current_temp_is_not_ready_until_first_tick() {
    let svc = idle_service();
    assert_eq!(svc.get_current_temp_mc(), Err(SimtempError::NotReady));
    shutdown(&svc).unwrap();
}

#[test]
fn interval_change_applies_to_next_rearm() {
    let svc = initialize_with(
        ServiceConfig {
            sampling_ms: 60_000,
            ..ServiceConfig::default()
        },
        ScriptedSource::new(vec![Ok(42_000)]),
        ManualClock::new(),
    )
    .unwrap();
    // The first tick stays armed with 60 s; shortening the interval does not
    // pull it in retroactively
    svc.set_sampling_ms(5).unwrap();
    std::thread::sleep(Duration::from_millis(50));
    assert_eq!(svc.get_current_temp_mc(), Err(SimtempError::NotReady));
    shutdown(&svc).unwrap();
}

#[test]
fn snapshot_reports_every_field_consistently() {
    let clock = ManualClock::new();
    clock.set_offset(Duration::from_millis(1_234));
    let svc = initialize_with(
        ServiceConfig {
            sampling_ms: 2,
            threshold_mc: 41_000,
            seed: None,
        },
        ScriptedSource::new(vec![Ok(42_500)]),
        clock.clone(),
    )
    .unwrap();

    let deadline = Instant::now() + Duration::from_secs(2);
    let snap = loop {
        let s = svc.snapshot().unwrap();
        if s.ticks > 0 {
            break s;
        }
        assert!(Instant::now() < deadline, "no tick");
        std::thread::sleep(Duration::from_millis(1));
    };
    shutdown(&svc).unwrap();

    assert_eq!(snap.current_temp_mc, Some(42_500));
    assert_eq!(snap.sampling_ms, 2);
    assert_eq!(snap.threshold_mc, 41_000);
    // The manual clock never moved after the service epoch was taken
    assert_eq!(snap.last_tick_ms, Some(0));
    assert_eq!(snap.above_threshold(), Some(true));
}
