use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Monotonic time source used to stamp sensor ticks.
///
/// Waiting between ticks is done by the scheduler itself (it must be
/// interruptible by `stop()`), so the clock only answers "what time is it".
pub trait Clock {
    fn now(&self) -> Instant;

    /// Milliseconds elapsed since `epoch`, saturating at 0 on underflow.
    fn ms_since(&self, epoch: Instant) -> u64 {
        let dur = self.now().saturating_duration_since(epoch);
        u64::try_from(dur.as_millis()).unwrap_or(u64::MAX)
    }
}

/// Real-time monotonic clock backed by `std::time::Instant`.
#[derive(Debug, Default, Clone, Copy)]
pub struct MonotonicClock;

impl MonotonicClock {
    #[inline]
    pub fn new() -> Self {
        Self
    }
}

impl Clock for MonotonicClock {
    #[inline]
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock whose time only moves when told to.
///
/// Clones share the same offset, so a test can keep one copy and hand the
/// other to the service.
#[derive(Debug, Clone)]
pub struct ManualClock {
    origin: Instant,
    offset: Arc<Mutex<Duration>>,
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            offset: Arc::new(Mutex::new(Duration::ZERO)),
        }
    }

    pub fn advance(&self, d: Duration) {
        let mut off = self.offset.lock().unwrap_or_else(|p| p.into_inner());
        *off = off.saturating_add(d);
    }

    pub fn set_offset(&self, d: Duration) {
        *self.offset.lock().unwrap_or_else(|p| p.into_inner()) = d;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        let off = *self.offset.lock().unwrap_or_else(|p| p.into_inner());
        self.origin + off
    }
}
