#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
//! Config schema for the simulated temperature sensor service.
//!
//! - `Config` and its sections are deserialized from TOML and validated.
//! - Every section is optional; missing values fall back to the device
//!   defaults (100 ms sampling, 45000 m°C threshold).
use serde::Deserialize;
use std::path::Path;

/// Default producer cadence in milliseconds.
pub const DEFAULT_SAMPLING_MS: i32 = 100;
/// Default alert threshold in milli-degrees Celsius.
pub const DEFAULT_THRESHOLD_MC: i32 = 45_000;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SensorCfg {
    /// Sampling interval in ms; must be > 0.
    pub sampling_ms: i32,
    /// Alert boundary in milli-degrees Celsius. Stored only; nothing acts on it.
    #[serde(rename = "threshold_mC", alias = "threshold_mc")]
    pub threshold_mc: i32,
    /// Optional RNG seed for reproducible readings.
    pub seed: Option<u64>,
}

impl Default for SensorCfg {
    fn default() -> Self {
        Self {
            sampling_ms: DEFAULT_SAMPLING_MS,
            threshold_mc: DEFAULT_THRESHOLD_MC,
            seed: None,
        }
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct Logging {
    pub file: Option<String>,  // path to .log (JSON lines)
    pub level: Option<String>, // "info","debug"
    /// Log rotation policy: "never" | "daily" | "hourly" (default: never)
    pub rotation: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct Config {
    pub sensor: SensorCfg,
    pub logging: Logging,
}

pub fn load_toml(s: &str) -> Result<Config, toml::de::Error> {
    toml::from_str::<Config>(s)
}

/// Read, parse and validate a config file.
pub fn load_file(path: &Path) -> eyre::Result<Config> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("read config {:?}: {}", path, e))?;
    let cfg = load_toml(&text).map_err(|e| eyre::eyre!("parse config {:?}: {}", path, e))?;
    cfg.validate()?;
    Ok(cfg)
}

impl Config {
    pub fn validate(&self) -> eyre::Result<()> {
        // Sensor
        if self.sensor.sampling_ms <= 0 {
            eyre::bail!(
                "sensor.sampling_ms must be > 0, got {}",
                self.sensor.sampling_ms
            );
        }

        // Logging
        if let Some(file) = &self.logging.file
            && file.trim().is_empty()
        {
            eyre::bail!("logging.file must not be empty when set");
        }
        if let Some(rotation) = &self.logging.rotation {
            match rotation.to_ascii_lowercase().as_str() {
                "never" | "daily" | "hourly" => {}
                other => eyre::bail!(
                    "logging.rotation must be one of never|daily|hourly, got {other:?}"
                ),
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let cfg = load_toml("").unwrap();
        assert_eq!(cfg.sensor.sampling_ms, DEFAULT_SAMPLING_MS);
        assert_eq!(cfg.sensor.threshold_mc, DEFAULT_THRESHOLD_MC);
        assert!(cfg.sensor.seed.is_none());
        assert!(cfg.logging.file.is_none());
        cfg.validate().unwrap();
    }

    #[test]
    fn threshold_accepts_both_spellings() {
        let upper = load_toml("[sensor]\nthreshold_mC = 50000\n").unwrap();
        let lower = load_toml("[sensor]\nthreshold_mc = -5\n").unwrap();
        assert_eq!(upper.sensor.threshold_mc, 50_000);
        assert_eq!(lower.sensor.threshold_mc, -5);
    }
}
