//! `From`/`TryFrom` implementations bridging `simtemp_config` types to `simtemp_core` types.

use crate::config::ServiceConfig;

impl From<&simtemp_config::SensorCfg> for ServiceConfig {
    fn from(c: &simtemp_config::SensorCfg) -> Self {
        Self {
            sampling_ms: c.sampling_ms,
            threshold_mc: c.threshold_mc,
            seed: c.seed,
        }
    }
}

/// Validates the whole document before mapping the sensor section.
impl TryFrom<&simtemp_config::Config> for ServiceConfig {
    type Error = eyre::Report;

    fn try_from(c: &simtemp_config::Config) -> Result<Self, Self::Error> {
        c.validate()?;
        Ok((&c.sensor).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_sensor_section() {
        let cfg = simtemp_config::load_toml(
            "[sensor]\nsampling_ms = 20\nthreshold_mC = 41000\nseed = 3\n",
        )
        .unwrap();
        let svc = ServiceConfig::try_from(&cfg).unwrap();
        assert_eq!(
            svc,
            ServiceConfig {
                sampling_ms: 20,
                threshold_mc: 41_000,
                seed: Some(3),
            }
        );
    }

    #[test]
    fn invalid_document_is_rejected() {
        let cfg = simtemp_config::load_toml("[sensor]\nsampling_ms = -4\n").unwrap();
        assert!(ServiceConfig::try_from(&cfg).is_err());
    }
}
