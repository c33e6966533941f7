#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
//! Simulated temperature sensor service (transport-agnostic).
//!
//! One background producer generates synthetic readings while any number of
//! external callers read them or retune the producer through typed ports.
//!
//! ## Architecture
//!
//! - **State**: `SensorState` behind a single lock in `StateSlot` (`state` module)
//! - **Engine**: uniform pseudo-random readings in `[40000, 50000)` m°C (`engine`)
//! - **Scheduler**: cancellable periodic producer thread (`scheduler`)
//! - **Ports**: `ConfigPort` / `ReadPort` accessors (`ports`)
//! - **Lifecycle**: `initialize` / `shutdown` and `ServiceHandle` (`lifecycle`)
//!
//! The threshold is stored configuration only; nothing in this crate acts on
//! a reading crossing it.

pub mod config;
pub mod conversions;
pub mod engine;
pub mod error;
pub mod lifecycle;
pub mod mocks;
pub mod ports;
pub mod scheduler;
pub mod state;
pub mod util;

pub use config::ServiceConfig;
pub use engine::{SamplingEngine, TEMP_MAX_MC, TEMP_MIN_MC};
pub use error::{Result, SimtempError};
pub use lifecycle::{ServiceHandle, initialize, initialize_with, shutdown};
pub use ports::{ConfigPort, ReadPort};
pub use scheduler::{Phase, Scheduler};
pub use state::{SensorSnapshot, SensorState, StateSlot};
