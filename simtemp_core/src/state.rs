//! Shared sensor record and the lock that guards it.
//!
//! `StateSlot` is the single synchronization point of the service: the
//! producer's tick, every port call and the final release all go through
//! `StateSlot::lock`. Once `release` has run the slot is empty and every
//! later access fails with `NotInitialized`.

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::error::{Result, SimtempError};
use crate::util::check_interval;

/// Current reading plus live-tunable configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SensorState {
    current_temp_mc: Option<i32>,
    sampling_ms: i32,
    threshold_mc: i32,
    ticks: u64,
    last_tick_ms: Option<u64>,
}

impl SensorState {
    pub fn new(sampling_ms: i32, threshold_mc: i32) -> Result<Self> {
        check_interval(sampling_ms)?;
        Ok(Self {
            current_temp_mc: None,
            sampling_ms,
            threshold_mc,
            ticks: 0,
            last_tick_ms: None,
        })
    }

    pub fn current_temp_mc(&self) -> Option<i32> {
        self.current_temp_mc
    }

    pub fn sampling_ms(&self) -> i32 {
        self.sampling_ms
    }

    pub fn threshold_mc(&self) -> i32 {
        self.threshold_mc
    }

    /// Number of successful ticks since start.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Leaves the previous value in place when `v <= 0`.
    pub fn set_sampling_ms(&mut self, v: i32) -> Result<()> {
        check_interval(v)?;
        self.sampling_ms = v;
        Ok(())
    }

    pub fn set_threshold_mc(&mut self, v: i32) {
        self.threshold_mc = v;
    }

    pub(crate) fn record_tick(&mut self, temp_mc: i32, at_ms: u64) {
        self.current_temp_mc = Some(temp_mc);
        self.ticks = self.ticks.saturating_add(1);
        self.last_tick_ms = Some(at_ms);
    }

    pub fn snapshot(&self) -> SensorSnapshot {
        SensorSnapshot {
            current_temp_mc: self.current_temp_mc,
            sampling_ms: self.sampling_ms,
            threshold_mc: self.threshold_mc,
            ticks: self.ticks,
            last_tick_ms: self.last_tick_ms,
        }
    }
}

/// All fields of `SensorState`, read under one lock acquisition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SensorSnapshot {
    pub current_temp_mc: Option<i32>,
    pub sampling_ms: i32,
    pub threshold_mc: i32,
    pub ticks: u64,
    /// Milliseconds since service start at which the last tick landed.
    pub last_tick_ms: Option<u64>,
}

impl SensorSnapshot {
    /// `None` until the first reading. Informational only.
    pub fn above_threshold(&self) -> Option<bool> {
        self.current_temp_mc.map(|t| t > self.threshold_mc)
    }
}

/// Owner of the live `SensorState`.
#[derive(Debug, Default)]
pub struct StateSlot {
    inner: Mutex<Option<SensorState>>,
}

impl StateSlot {
    pub fn new(state: SensorState) -> Self {
        Self {
            inner: Mutex::new(Some(state)),
        }
    }

    /// Every mutation is a whole-field store, so a panic while the lock was
    /// held cannot leave a torn value behind; poisoning is ignored.
    pub(crate) fn lock(&self) -> MutexGuard<'_, Option<SensorState>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run `f` against the live state, or fail with `NotInitialized`.
    pub fn with<R>(&self, f: impl FnOnce(&mut SensorState) -> R) -> Result<R> {
        let mut guard = self.lock();
        let state = guard.as_mut().ok_or(SimtempError::NotInitialized)?;
        Ok(f(state))
    }

    /// Take the state out of the slot. Returns `None` if already released.
    pub fn release(&self) -> Option<SensorState> {
        self.lock().take()
    }

    pub fn is_live(&self) -> bool {
        self.lock().is_some()
    }
}
