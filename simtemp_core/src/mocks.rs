//! Test and helper sources for simtemp_core.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use simtemp_traits::TempSource;

/// A source that always errors; the scheduler must keep rearming anyway.
pub struct FailingSource;

impl TempSource for FailingSource {
    fn sample(&mut self) -> Result<i32, Box<dyn std::error::Error + Send + Sync>> {
        Err(Box::new(std::io::Error::other("failing source")))
    }
}

/// Replays a fixed script of readings and failures, cycling when exhausted.
///
/// The call counter is shared, so it stays readable after the source has been
/// moved into a running scheduler.
pub struct ScriptedSource {
    script: Vec<Result<i32, &'static str>>,
    calls: Arc<AtomicUsize>,
}

impl ScriptedSource {
    pub fn new(script: Vec<Result<i32, &'static str>>) -> Self {
        Self {
            script,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn call_counter(&self) -> Arc<AtomicUsize> {
        self.calls.clone()
    }
}

impl TempSource for ScriptedSource {
    fn sample(&mut self) -> Result<i32, Box<dyn std::error::Error + Send + Sync>> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        if self.script.is_empty() {
            return Err("empty script".into());
        }
        match self.script[n % self.script.len()] {
            Ok(v) => Ok(v),
            Err(msg) => Err(msg.into()),
        }
    }
}

/// A source that takes `delay` per sample, to hold a tick in flight.
///
/// `started` is bumped on entry and `finished` on exit, so a caller can tell
/// whether a tick was running and whether it completed.
pub struct SlowSource {
    delay: Duration,
    value: i32,
    started: Arc<AtomicUsize>,
    finished: Arc<AtomicUsize>,
}

impl SlowSource {
    pub fn new(delay: Duration, value: i32) -> Self {
        Self {
            delay,
            value,
            started: Arc::new(AtomicUsize::new(0)),
            finished: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// `(started, finished)` counters.
    pub fn counters(&self) -> (Arc<AtomicUsize>, Arc<AtomicUsize>) {
        (self.started.clone(), self.finished.clone())
    }
}

impl TempSource for SlowSource {
    fn sample(&mut self) -> Result<i32, Box<dyn std::error::Error + Send + Sync>> {
        self.started.fetch_add(1, Ordering::SeqCst);
        std::thread::sleep(self.delay);
        self.finished.fetch_add(1, Ordering::SeqCst);
        Ok(self.value)
    }
}

/// Panics on call number `panic_on` (0-based) and returns `value` otherwise.
pub struct PanicOnceSource {
    panic_on: usize,
    value: i32,
    calls: Arc<AtomicUsize>,
}

impl PanicOnceSource {
    pub fn new(panic_on: usize, value: i32) -> Self {
        Self {
            panic_on,
            value,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn call_counter(&self) -> Arc<AtomicUsize> {
        self.calls.clone()
    }
}

impl TempSource for PanicOnceSource {
    fn sample(&mut self) -> Result<i32, Box<dyn std::error::Error + Send + Sync>> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        if n == self.panic_on {
            panic!("sensor backend panicked on call {n}");
        }
        Ok(self.value)
    }
}
