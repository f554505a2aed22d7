//! Runtime configuration with environment overrides.
//!
//! Defaults come from [`crate::constants`]. Overrides are read through a
//! lookup closure so tests never touch the process environment.

use crate::constants::DEFAULT_PARTICLE_COUNT;
use crate::error::ConfigError;
use crate::gesture::Calibration;
use crate::smoothing::SmoothingRates;

pub const ENV_PARTICLES: &str = "NEBULA_PARTICLES";
pub const ENV_SEED: &str = "NEBULA_SEED";
pub const ENV_API_KEY: &str = "NEBULA_API_KEY";
pub const ENV_API_KEY_FALLBACK: &str = "API_KEY";
pub const ENV_PALETTE_MODEL: &str = "NEBULA_PALETTE_MODEL";

pub const DEFAULT_PALETTE_MODEL: &str = "gemini-3-flash-preview";

#[derive(Clone, Debug, PartialEq)]
pub struct NebulaConfig {
    pub particle_count: usize,
    /// Fixed seed for the field; `None` draws from entropy.
    pub seed: Option<u64>,
    pub calibration: Calibration,
    pub rates: SmoothingRates,
    /// Credential for palette generation; `None` disables the feature.
    pub api_key: Option<String>,
    pub palette_model: String,
}

impl Default for NebulaConfig {
    fn default() -> Self {
        Self {
            particle_count: DEFAULT_PARTICLE_COUNT,
            seed: None,
            calibration: Calibration::default(),
            rates: SmoothingRates::default(),
            api_key: None,
            palette_model: DEFAULT_PALETTE_MODEL.to_string(),
        }
    }
}

impl NebulaConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_with(|key| std::env::var(key).ok())
    }

    /// Build a config from a custom environment lookup.
    pub fn from_env_with<F>(get_env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            get_env(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let mut config = Self::default();

        if let Some(raw) = get(ENV_PARTICLES) {
            config.particle_count = match raw.parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => return Err(invalid(ENV_PARTICLES, raw, "positive particle count")),
            };
        }
        if let Some(raw) = get(ENV_SEED) {
            let seed = raw
                .parse::<u64>()
                .map_err(|_| invalid(ENV_SEED, raw, "unsigned 64-bit seed"))?;
            config.seed = Some(seed);
        }
        config.api_key = get(ENV_API_KEY).or_else(|| get(ENV_API_KEY_FALLBACK));
        if let Some(model) = get(ENV_PALETTE_MODEL) {
            config.palette_model = model;
        }
        Ok(config)
    }

    pub fn generation_enabled(&self) -> bool {
        self.api_key.is_some()
    }
}

fn invalid(name: &'static str, value: String, expected: &'static str) -> ConfigError {
    ConfigError::Invalid {
        name,
        value,
        expected,
    }
}
