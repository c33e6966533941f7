//! Runtime configuration for a sensor service instance.
//!
//! Separate from the TOML-deserialized config in `simtemp_config`; see
//! `conversions` for the mapping.

use crate::error::Result;
use crate::util::check_interval;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Producer cadence in ms. Must be > 0.
    pub sampling_ms: i32,
    /// Alert boundary in m°C. Stored only.
    pub threshold_mc: i32,
    /// Seed for the sampling engine; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            sampling_ms: simtemp_config::DEFAULT_SAMPLING_MS,
            threshold_mc: simtemp_config::DEFAULT_THRESHOLD_MC,
            seed: None,
        }
    }
}

impl ServiceConfig {
    pub fn validate(&self) -> Result<()> {
        check_interval(self.sampling_ms)
    }
}
