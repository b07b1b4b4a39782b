use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::DispatchError;
use crate::host::{Host, HostId, DEFAULT_LOAD_INCREMENT};
use crate::strategies::DEFAULT_LOAD_THRESHOLD;

/// Upper bound for `load_jitter`
pub const MAX_LOAD_JITTER: f64 = 1.0;

/// Simulation scenario.
///
/// Every field has a default, so a scenario file only needs to name the values
/// it changes. The defaults reproduce the reference run: five hosts at 0.6,
/// eleven requests per policy.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Number of hosts in the pool, numbered from 1
    pub hosts: usize,
    pub initial_load: f64,
    pub sequential_requests: usize,
    pub optimized_requests: usize,
    /// Load threshold for the optimized policy
    pub threshold: f64,
    /// Load added per served request
    pub load_increment: f64,
    /// Initial loads are spread uniformly within +/- this value (clamped at 0)
    pub load_jitter: f64,
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            hosts: 5,
            initial_load: 0.6,
            sequential_requests: 11,
            optimized_requests: 11,
            threshold: DEFAULT_LOAD_THRESHOLD,
            load_increment: DEFAULT_LOAD_INCREMENT,
            load_jitter: 0.0,
            seed: 0,
        }
    }
}

impl SimulationConfig {
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read scenario file {}", path.display()))?;
        let config = Self::from_json_str(&content)
            .with_context(|| format!("Invalid scenario file {}", path.display()))?;
        Ok(config)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(content).context("Failed to parse scenario JSON")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), DispatchError> {
        if self.hosts == 0 {
            return Err(DispatchError::invalid_configuration(
                "at least one host is required",
            ));
        }
        if HostId::try_from(self.hosts).is_err() {
            return Err(DispatchError::invalid_configuration(format!(
                "too many hosts: {}",
                self.hosts
            )));
        }
        for (name, value) in [
            ("initial_load", self.initial_load),
            ("threshold", self.threshold),
            ("load_increment", self.load_increment),
            ("load_jitter", self.load_jitter),
        ] {
            if !value.is_finite() {
                return Err(DispatchError::invalid_configuration(format!(
                    "{} must be finite, got {}",
                    name, value
                )));
            }
        }
        if self.initial_load < 0.0 {
            return Err(DispatchError::invalid_configuration(
                "initial_load must not be negative",
            ));
        }
        if self.load_increment < 0.0 {
            return Err(DispatchError::invalid_configuration(
                "load_increment must not be negative",
            ));
        }
        if !(0.0..=MAX_LOAD_JITTER).contains(&self.load_jitter) {
            return Err(DispatchError::invalid_configuration(format!(
                "load_jitter must be between 0 and {}, got {}",
                MAX_LOAD_JITTER, self.load_jitter
            )));
        }
        Ok(())
    }

    /// Builds a fresh pool with ids `1..=hosts`.
    ///
    /// With a non-zero jitter the initial loads are drawn from an RNG seeded
    /// with `seed`, so the same config always yields the same pool. The config
    /// is validated first, so an out-of-range jitter or increment is an error.
    pub fn build_pool(&self) -> Result<Vec<Host>, DispatchError> {
        self.validate()?;
        let mut rng = StdRng::seed_from_u64(self.seed);
        (1..=self.hosts)
            .map(|n| {
                let load = if self.load_jitter > 0.0 {
                    let offset = rng.gen_range(-self.load_jitter..=self.load_jitter);
                    (self.initial_load + offset).max(0.0)
                } else {
                    self.initial_load
                };
                Host::new(n as HostId, load).with_load_increment(self.load_increment)
            })
            .collect()
    }
}
