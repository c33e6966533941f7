//! Service driver: config mapping, the reading loop, and the self-check.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use eyre::WrapErr;
use simtemp_core::{
    ReadPort, SensorSnapshot, ServiceConfig, ServiceHandle, SimtempError, TEMP_MAX_MC, TEMP_MIN_MC,
};

/// Longest gap between two polls of the read port.
const POLL: Duration = Duration::from_millis(5);

/// Poll at least once per sampling interval so fast intervals are not
/// collapsed into one printed reading.
fn poll_period(sampling_ms: i32) -> Duration {
    POLL.min(simtemp_core::util::interval(sampling_ms))
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RunOpts {
    pub duration_ms: Option<u64>,
    pub sampling_ms: Option<i32>,
    pub threshold_mc: Option<i32>,
}

/// Map the TOML config plus CLI overrides onto a core `ServiceConfig`.
pub fn service_config(
    cfg: &simtemp_config::Config,
    opts: &RunOpts,
) -> eyre::Result<ServiceConfig> {
    let mut svc = ServiceConfig::try_from(cfg)?;
    if let Some(ms) = opts.sampling_ms {
        svc.sampling_ms = ms;
    }
    if let Some(mc) = opts.threshold_mc {
        svc.threshold_mc = mc;
    }
    svc.validate()?;
    Ok(svc)
}

/// Initialize, print readings until the deadline or `stop` is raised, then
/// shut down. Shutdown runs on every path once initialize succeeded.
///
/// A line is printed whenever the tick count advances; it carries the latest
/// reading and its tick number.
pub fn run(
    cfg: &simtemp_config::Config,
    opts: RunOpts,
    json: bool,
    stop: &Arc<AtomicBool>,
) -> eyre::Result<u64> {
    let svc = service_config(cfg, &opts)?;
    let handle = simtemp_core::initialize(svc)?;
    let deadline = opts
        .duration_ms
        .map(|ms| Instant::now() + Duration::from_millis(ms));

    let printed = print_readings(&handle, deadline, json, stop);
    let shut = simtemp_core::shutdown(&handle).wrap_err("shutdown sensor service");
    let ticks = printed?;
    shut?;

    if !json {
        println!("Stopped after {ticks} ticks.");
    }
    Ok(ticks)
}

fn print_readings(
    handle: &ServiceHandle,
    deadline: Option<Instant>,
    json: bool,
    stop: &Arc<AtomicBool>,
) -> eyre::Result<u64> {
    let mut seen = 0u64;
    loop {
        if stop.load(Ordering::Relaxed) {
            tracing::info!("stop requested");
            break;
        }
        if deadline.is_some_and(|d| Instant::now() >= d) {
            break;
        }

        let snap = handle.snapshot()?;
        if snap.ticks > seen {
            seen = snap.ticks;
            println!("{}", render_reading(&snap, json));
        }
        std::thread::sleep(poll_period(snap.sampling_ms));
    }
    Ok(seen)
}

pub fn render_reading(snap: &SensorSnapshot, json: bool) -> String {
    if json {
        serde_json::json!({
            "tick": snap.ticks,
            "t_ms": snap.last_tick_ms,
            "temp_mC": snap.current_temp_mc,
            "threshold_mC": snap.threshold_mc,
            "above_threshold": snap.above_threshold(),
            "sampling_ms": snap.sampling_ms,
        })
        .to_string()
    } else {
        let temp = snap
            .current_temp_mc
            .map_or_else(|| "-".to_string(), |t| t.to_string());
        let flag = if snap.above_threshold() == Some(true) {
            " [above threshold]"
        } else {
            ""
        };
        format!(
            "tick {}: {} m°C (threshold {} m°C){}",
            snap.ticks, temp, snap.threshold_mc, flag
        )
    }
}

/// Start the service, wait for the first reading and check its range.
pub fn self_check(cfg: &simtemp_config::Config) -> eyre::Result<i32> {
    let svc = service_config(cfg, &RunOpts::default())?;
    // Allow a few intervals for the first tick, but never less than a second
    let wait_ms = u64::try_from(svc.sampling_ms)
        .unwrap_or(0)
        .saturating_mul(5)
        .max(1_000);
    let handle = simtemp_core::initialize(svc)?;

    let first = wait_first_reading(&handle, Duration::from_millis(wait_ms));
    let shut = simtemp_core::shutdown(&handle).wrap_err("shutdown sensor service");
    let temp = first?;
    shut?;

    if !(TEMP_MIN_MC..TEMP_MAX_MC).contains(&temp) {
        eyre::bail!("self-check: reading {temp} m°C outside [{TEMP_MIN_MC}, {TEMP_MAX_MC})");
    }
    Ok(temp)
}

fn wait_first_reading(handle: &ServiceHandle, timeout: Duration) -> eyre::Result<i32> {
    let deadline = Instant::now() + timeout;
    loop {
        match handle.get_current_temp_mc() {
            Ok(t) => return Ok(t),
            Err(SimtempError::NotReady) if Instant::now() < deadline => {
                std::thread::sleep(POLL);
            }
            Err(e) => return Err(e).wrap_err("self-check: waiting for first reading"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(temp: Option<i32>) -> SensorSnapshot {
        SensorSnapshot {
            current_temp_mc: temp,
            sampling_ms: 100,
            threshold_mc: 45_000,
            ticks: 3,
            last_tick_ms: Some(300),
        }
    }

    #[test]
    fn text_rendering_flags_above_threshold() {
        assert_eq!(
            render_reading(&snap(Some(46_000)), false),
            "tick 3: 46000 m°C (threshold 45000 m°C) [above threshold]"
        );
        assert_eq!(
            render_reading(&snap(Some(41_000)), false),
            "tick 3: 41000 m°C (threshold 45000 m°C)"
        );
    }

    #[test]
    fn json_rendering_has_stable_keys() {
        let v: serde_json::Value =
            serde_json::from_str(&render_reading(&snap(Some(46_000)), true)).unwrap();
        assert_eq!(v["tick"], 3);
        assert_eq!(v["temp_mC"], 46_000);
        assert_eq!(v["threshold_mC"], 45_000);
        assert_eq!(v["above_threshold"], true);
    }

    #[test]
    fn poll_never_outlasts_the_sampling_interval() {
        assert_eq!(poll_period(1), Duration::from_millis(1));
        assert_eq!(poll_period(3), Duration::from_millis(3));
        assert_eq!(poll_period(5), POLL);
        assert_eq!(poll_period(100), POLL);
    }

    #[test]
    fn overrides_are_validated() {
        let cfg = simtemp_config::Config::default();
        let opts = RunOpts {
            sampling_ms: Some(0),
            ..RunOpts::default()
        };
        let err = service_config(&cfg, &opts).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SimtempError>(),
            Some(SimtempError::InvalidArgument(_))
        ));

        let opts = RunOpts {
            sampling_ms: Some(20),
            threshold_mc: Some(-5),
            ..RunOpts::default()
        };
        let svc = service_config(&cfg, &opts).unwrap();
        assert_eq!((svc.sampling_ms, svc.threshold_mc), (20, -5));
    }
}
