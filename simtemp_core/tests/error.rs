use simtemp_core::SimtempError;

#[test]
fn error_messages_are_stable() {
    assert_eq!(
        SimtempError::InvalidArgument("sampling_ms must be > 0, got 0".into()).to_string(),
        "invalid argument: sampling_ms must be > 0, got 0"
    );
    assert_eq!(
        SimtempError::AlreadyRunning.to_string(),
        "scheduler already running"
    );
    assert_eq!(
        SimtempError::NotInitialized.to_string(),
        "sensor service not initialized"
    );
    assert_eq!(SimtempError::NotReady.to_string(), "no reading available yet");
    assert_eq!(
        SimtempError::Init("boom".into()).to_string(),
        "initialization failed: boom"
    );
}

#[test]
fn errors_convert_into_eyre_reports() {
    let report: eyre::Report = SimtempError::NotReady.into();
    assert_eq!(
        report.downcast_ref::<SimtempError>(),
        Some(&SimtempError::NotReady)
    );
}
