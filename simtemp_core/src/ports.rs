//! Typed accessors exposed to external callers.
//!
//! A transport (file system, socket, IPC) maps its requests onto these
//! traits. Every call takes the state lock once, so each one observes a
//! consistent set of fields. After shutdown every call fails with
//! `NotInitialized`.

use crate::error::{Result, SimtempError};
use crate::state::{SensorSnapshot, StateSlot};

/// Get/set pairs for the live-tunable configuration.
pub trait ConfigPort {
    fn get_sampling_ms(&self) -> Result<i32>;
    /// Rejects `v <= 0` with `InvalidArgument`. Takes effect at the next rearm.
    fn set_sampling_ms(&self, v: i32) -> Result<()>;
    fn get_threshold_mc(&self) -> Result<i32>;
    fn set_threshold_mc(&self, v: i32) -> Result<()>;
}

pub trait ReadPort {
    /// Last reading; `NotReady` until the first tick completes.
    fn get_current_temp_mc(&self) -> Result<i32>;
    fn snapshot(&self) -> Result<SensorSnapshot>;
}

impl ConfigPort for StateSlot {
    fn get_sampling_ms(&self) -> Result<i32> {
        self.with(|s| s.sampling_ms())
    }

    fn set_sampling_ms(&self, v: i32) -> Result<()> {
        self.with(|s| s.set_sampling_ms(v))??;
        tracing::debug!(sampling_ms = v, "sampling interval updated");
        Ok(())
    }

    fn get_threshold_mc(&self) -> Result<i32> {
        self.with(|s| s.threshold_mc())
    }

    fn set_threshold_mc(&self, v: i32) -> Result<()> {
        self.with(|s| s.set_threshold_mc(v))?;
        tracing::debug!(threshold_mc = v, "threshold updated");
        Ok(())
    }
}

impl ReadPort for StateSlot {
    fn get_current_temp_mc(&self) -> Result<i32> {
        self.with(|s| s.current_temp_mc())?
            .ok_or(SimtempError::NotReady)
    }

    fn snapshot(&self) -> Result<SensorSnapshot> {
        self.with(|s| s.snapshot())
    }
}
