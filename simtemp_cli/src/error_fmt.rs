//! Human-readable error descriptions and structured JSON error formatting.

use simtemp_core::SimtempError;

/// Map an eyre::Report to a human-readable explanation with likely causes and fix hints.
pub fn humanize(err: &eyre::Report) -> String {
    // Typed matches first
    if let Some(se) = err.downcast_ref::<SimtempError>() {
        return match se {
            SimtempError::InvalidArgument(msg) => format!(
                "What happened: Invalid configuration ({msg}).\nLikely causes: A zero or negative sampling interval in the TOML or on the command line.\nHow to fix: Set sensor.sampling_ms (or --sampling-ms) to a positive number of milliseconds."
            ),
            SimtempError::Init(msg) => format!(
                "What happened: The sensor service failed to start ({msg}).\nLikely causes: The process could not spawn the sampler thread.\nHow to fix: Check system thread limits and re-run with --log-level=debug."
            ),
            SimtempError::NotReady => {
                "What happened: No reading was produced in time.\nLikely causes: A very long sampling interval or an overloaded host.\nHow to fix: Lower sensor.sampling_ms and try again.".to_string()
            }
            SimtempError::AlreadyRunning | SimtempError::NotInitialized => format!(
                "What happened: {se}.\nLikely causes: The service was used outside its start/stop window.\nHow to fix: Re-run with --log-level=debug or set RUST_LOG for more detail."
            ),
        };
    }

    // String-based heuristics for errors coming from config loading
    let msg = err.to_string();
    let lower = msg.to_ascii_lowercase();

    if lower.contains("read config") {
        return format!(
            "What happened: The config file could not be read.\nLikely causes: Wrong --config path or missing permissions.\nHow to fix: Check the path and try again. Original: {msg}"
        );
    }

    if lower.contains("parse config") || lower.contains("must be") {
        return format!(
            "What happened: Configuration is invalid.\nLikely causes: A typo, a wrong value type, or an out-of-range value.\nHow to fix: Edit the TOML config and try again. Original: {msg}"
        );
    }

    // Generic fallback
    let mut cause = String::new();
    if let Some(src) = err.source() {
        cause = format!(" Cause: {src}");
    }
    format!(
        "Something went wrong.{cause}\nHow to fix: Re-run with --log-level=debug for details. Original: {msg}"
    )
}

/// Stable exit codes per error kind; anything unclassified returns 1.
pub fn exit_code_for_error(err: &eyre::Report) -> i32 {
    match err.downcast_ref::<SimtempError>() {
        Some(SimtempError::InvalidArgument(_)) => 2,
        Some(SimtempError::Init(_)) => 3,
        Some(SimtempError::NotReady) => 4,
        _ => 1,
    }
}

fn reason_name(err: &eyre::Report) -> &'static str {
    match err.downcast_ref::<SimtempError>() {
        Some(SimtempError::InvalidArgument(_)) => "InvalidArgument",
        Some(SimtempError::AlreadyRunning) => "AlreadyRunning",
        Some(SimtempError::NotInitialized) => "NotInitialized",
        Some(SimtempError::NotReady) => "NotReady",
        Some(SimtempError::Init(_)) => "InitError",
        None => "Error",
    }
}

/// Structured JSON for errors when --json is enabled.
pub fn format_error_json(err: &eyre::Report) -> String {
    serde_json::json!({ "reason": reason_name(err), "message": humanize(err) }).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_errors_get_codes_and_reasons() {
        let e: eyre::Report = SimtempError::InvalidArgument("sampling_ms must be > 0, got 0".into()).into();
        assert_eq!(exit_code_for_error(&e), 2);
        assert!(humanize(&e).contains("sampling_ms"));
        let v: serde_json::Value = serde_json::from_str(&format_error_json(&e)).unwrap();
        assert_eq!(v["reason"], "InvalidArgument");

        let e: eyre::Report = SimtempError::NotReady.into();
        assert_eq!(exit_code_for_error(&e), 4);
    }

    #[test]
    fn config_errors_fall_back_to_heuristics() {
        let e = eyre::eyre!("read config \"nope.toml\": No such file");
        assert_eq!(exit_code_for_error(&e), 1);
        assert!(humanize(&e).contains("could not be read"));
        let v: serde_json::Value = serde_json::from_str(&format_error_json(&e)).unwrap();
        assert_eq!(v["reason"], "Error");
    }
}
