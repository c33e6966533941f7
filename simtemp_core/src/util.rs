//! Interval helpers shared by the scheduler and the ports.

use std::time::Duration;

/// Convert a validated millisecond interval into a `Duration`.
/// Clamps to at least 1 ms so a bad value can never produce a busy loop.
#[inline]
pub fn interval(ms: i32) -> Duration {
    Duration::from_millis(u64::from(ms.max(1).unsigned_abs()))
}

/// Reject non-positive intervals with a message naming the offending value.
#[inline]
pub fn check_interval(ms: i32) -> crate::error::Result<()> {
    if ms <= 0 {
        return Err(crate::error::SimtempError::InvalidArgument(format!(
            "sampling_ms must be > 0, got {ms}"
        )));
    }
    Ok(())
}
