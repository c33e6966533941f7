//! Periodic sampling producer.
//!
//! Spawns one thread that owns the `TempSource`, writes each reading into the
//! shared `StateSlot`, and rearms itself with whatever `sampling_ms` holds at
//! the end of the tick. Cancellation goes over a crossbeam channel so a stop
//! request interrupts a pending wait instead of sleeping it out.
//!
//! A sample that errors or panics skips that tick only; the producer keeps
//! its cadence.
//!
//! Safety: `stop()` joins the producer thread, so once it returns no tick can
//! run again. Dropping a `Scheduler` stops it.
use crossbeam_channel as xch;
use simtemp_traits::TempSource;
use simtemp_traits::clock::Clock;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use crate::error::{Result, SimtempError};
use crate::state::StateSlot;
use crate::util::{check_interval, interval};

const SAMPLER_THREAD: &str = "simtemp-sampler";

/// Scheduler state machine: `Stopped -> Running -> Stopping -> Stopped`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Stopped,
    Running,
    Stopping,
}

pub struct Scheduler<S> {
    slot: Arc<StateSlot>,
    clock: Arc<dyn Clock + Send + Sync>,
    epoch: Instant,
    /// Parked here while stopped; moved into the thread while running.
    /// Only lost if the producer thread dies outside a sample call.
    source: Option<S>,
    phase: Phase,
    /// Dropping the sender disconnects the channel and wakes the producer.
    stop_tx: Option<xch::Sender<()>>,
    /// Hands the source back on join so the scheduler can be restarted.
    join_handle: Option<JoinHandle<S>>,
}

impl<S: TempSource + Send + 'static> Scheduler<S> {
    pub fn new(slot: Arc<StateSlot>, source: S, clock: Arc<dyn Clock + Send + Sync>) -> Self {
        let epoch = clock.now();
        Self {
            slot,
            clock,
            epoch,
            source: Some(source),
            phase: Phase::Stopped,
            stop_tx: None,
            join_handle: None,
        }
    }

    /// Arm the first tick `interval_ms` from now and start the producer.
    pub fn start(&mut self, interval_ms: i32) -> Result<()> {
        if self.phase != Phase::Stopped {
            return Err(SimtempError::AlreadyRunning);
        }
        check_interval(interval_ms)?;
        let source = self.source.take().ok_or_else(|| {
            SimtempError::Init("sampling source was lost when the producer thread died".into())
        })?;

        let (stop_tx, stop_rx) = xch::bounded::<()>(1);
        let slot = self.slot.clone();
        let clock = self.clock.clone();
        let epoch = self.epoch;
        let first = interval(interval_ms);

        let join_handle = std::thread::Builder::new()
            .name(SAMPLER_THREAD.into())
            .spawn(move || run_producer(source, &slot, clock.as_ref(), epoch, &stop_rx, first))
            .map_err(|e| SimtempError::Init(format!("spawn sampler thread: {e}")))?;

        self.stop_tx = Some(stop_tx);
        self.join_handle = Some(join_handle);
        self.phase = Phase::Running;
        tracing::info!(interval_ms, "sampler started");
        Ok(())
    }
}

impl<S> Scheduler<S> {
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    /// Cancel the pending tick and wait for an in-flight one to finish.
    /// No-op when already stopped.
    pub fn stop(&mut self) {
        if self.phase == Phase::Stopped {
            return;
        }
        self.phase = Phase::Stopping;
        drop(self.stop_tx.take());

        if let Some(handle) = self.join_handle.take() {
            match handle.join() {
                Ok(source) => {
                    self.source = Some(source);
                    tracing::trace!("sampler thread joined successfully");
                }
                Err(e) => {
                    tracing::error!(
                        thread = SAMPLER_THREAD,
                        ?e,
                        "sampler thread panicked; source dropped"
                    );
                }
            }
        }
        self.phase = Phase::Stopped;
        tracing::info!("sampler stopped");
    }
}

impl<S> Drop for Scheduler<S> {
    fn drop(&mut self) {
        self.stop();
    }
}

fn run_producer<S: TempSource>(
    mut source: S,
    slot: &StateSlot,
    clock: &(dyn Clock + Send + Sync),
    epoch: Instant,
    stop_rx: &xch::Receiver<()>,
    first: Duration,
) -> S {
    let mut wait = first;
    loop {
        match stop_rx.recv_timeout(wait) {
            Err(xch::RecvTimeoutError::Timeout) => {}
            Ok(()) | Err(xch::RecvTimeoutError::Disconnected) => {
                tracing::debug!("sampler thread received stop signal");
                break;
            }
        }

        match tick(&mut source, slot, clock, epoch) {
            Some(next) => wait = next,
            None => {
                tracing::debug!("sensor state released, sampler exiting");
                break;
            }
        }
    }
    tracing::trace!("sampler thread exiting cleanly");
    source
}

/// One sample-and-write under the state lock. Returns the next wait, or
/// `None` if the state is gone.
fn tick<S: TempSource>(
    source: &mut S,
    slot: &StateSlot,
    clock: &(dyn Clock + Send + Sync),
    epoch: Instant,
) -> Option<Duration> {
    let mut guard = slot.lock();
    let state = guard.as_mut()?;

    // A panicking backend must not unwind the producer or poison the lock
    match catch_unwind(AssertUnwindSafe(|| source.sample())) {
        Ok(Ok(temp_mc)) => {
            state.record_tick(temp_mc, clock.ms_since(epoch));
            tracing::trace!(temp_mc, tick = state.ticks(), "sensor tick");
        }
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "sample failed, skipping tick");
        }
        Err(payload) => {
            tracing::warn!(
                panic = panic_message(payload.as_ref()),
                "sample panicked, skipping tick"
            );
        }
    }

    Some(interval(state.sampling_ms()))
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload")
}
