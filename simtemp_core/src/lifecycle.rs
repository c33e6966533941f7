//! Service startup and teardown.
//!
//! `initialize` allocates the state and starts the producer; `shutdown`
//! stops the producer (joining any in-flight tick) and only then releases the
//! state. The state is taken out under its lock, so no port call can be
//! holding it at that moment, and every later call sees `NotInitialized`.

use std::sync::{Arc, Mutex, PoisonError};

use simtemp_traits::TempSource;
use simtemp_traits::clock::{Clock, MonotonicClock};

use crate::config::ServiceConfig;
use crate::engine::SamplingEngine;
use crate::error::{Result, SimtempError};
use crate::ports::{ConfigPort, ReadPort};
use crate::scheduler::{Phase, Scheduler};
use crate::state::{SensorSnapshot, SensorState, StateSlot};

type BoxedSource = Box<dyn TempSource + Send>;

struct Service {
    slot: Arc<StateSlot>,
    /// Separate from the state lock; the producer thread never takes it.
    scheduler: Mutex<Scheduler<BoxedSource>>,
}

/// Cheap, cloneable handle to one running sensor service.
///
/// All clones share the same service; shutting down through any of them
/// invalidates all of them.
#[derive(Clone)]
pub struct ServiceHandle {
    inner: Arc<Service>,
}

impl std::fmt::Debug for ServiceHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceHandle")
            .field("live", &self.inner.slot.is_live())
            .field("phase", &self.phase())
            .finish()
    }
}

/// Start a service backed by the pseudo-random `SamplingEngine`.
pub fn initialize(config: ServiceConfig) -> Result<ServiceHandle> {
    let engine = match config.seed {
        Some(seed) => SamplingEngine::with_seed(seed),
        None => SamplingEngine::new(),
    };
    initialize_with(config, engine, MonotonicClock::new())
}

/// Start a service with an explicit sampling backend and clock.
pub fn initialize_with<S, C>(config: ServiceConfig, source: S, clock: C) -> Result<ServiceHandle>
where
    S: TempSource + Send + 'static,
    C: Clock + Send + Sync + 'static,
{
    config.validate()?;
    let state = SensorState::new(config.sampling_ms, config.threshold_mc)?;
    let slot = Arc::new(StateSlot::new(state));

    let mut scheduler: Scheduler<BoxedSource> =
        Scheduler::new(slot.clone(), Box::new(source), Arc::new(clock));
    if let Err(e) = scheduler.start(config.sampling_ms) {
        // Leave nothing behind: no producer was spawned, drop the state too
        slot.release();
        return Err(match e {
            SimtempError::Init(_) => e,
            other => SimtempError::Init(other.to_string()),
        });
    }

    tracing::info!(
        sampling_ms = config.sampling_ms,
        threshold_mc = config.threshold_mc,
        seeded = config.seed.is_some(),
        "sensor service initialized"
    );
    Ok(ServiceHandle {
        inner: Arc::new(Service {
            slot,
            scheduler: Mutex::new(scheduler),
        }),
    })
}

/// Stop the producer and release the state. See `ServiceHandle::shutdown`.
pub fn shutdown(handle: &ServiceHandle) -> Result<()> {
    handle.shutdown()
}

impl ServiceHandle {
    /// Blocks until the producer is quiesced, then releases the state.
    /// Fails with `NotInitialized` if the service was already shut down.
    pub fn shutdown(&self) -> Result<()> {
        let mut scheduler = self
            .inner
            .scheduler
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        scheduler.stop();
        match self.inner.slot.release() {
            Some(state) => {
                tracing::info!(ticks = state.ticks(), "sensor service shut down");
                Ok(())
            }
            None => Err(SimtempError::NotInitialized),
        }
    }

    pub fn phase(&self) -> Phase {
        self.inner
            .scheduler
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .phase()
    }

    pub fn is_running(&self) -> bool {
        self.phase() == Phase::Running
    }
}

impl ConfigPort for ServiceHandle {
    fn get_sampling_ms(&self) -> Result<i32> {
        self.inner.slot.get_sampling_ms()
    }

    fn set_sampling_ms(&self, v: i32) -> Result<()> {
        self.inner.slot.set_sampling_ms(v)
    }

    fn get_threshold_mc(&self) -> Result<i32> {
        self.inner.slot.get_threshold_mc()
    }

    fn set_threshold_mc(&self, v: i32) -> Result<()> {
        self.inner.slot.set_threshold_mc(v)
    }
}

impl ReadPort for ServiceHandle {
    fn get_current_temp_mc(&self) -> Result<i32> {
        self.inner.slot.get_current_temp_mc()
    }

    fn snapshot(&self) -> Result<SensorSnapshot> {
        self.inner.slot.snapshot()
    }
}
