use std::str::FromStr;

use fastconv_hal::{FastConvError, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_TOLERANCE: f64 = 1e-6;
pub const DEFAULT_DIRECT_THRESHOLD: usize = 32;

pub const ENV_TOLERANCE: &str = "FASTCONV_TOLERANCE";
pub const ENV_DIRECT_THRESHOLD: &str = "FASTCONV_DIRECT_THRESHOLD";
pub const ENV_BACKEND: &str = "FASTCONV_BACKEND";

/// Transform used where results must be integers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Complex FFT followed by rounding; may report a precision warning.
    Fft,
    /// Two-prime NTT with CRT reconstruction; exact within its range.
    #[default]
    Ntt,
}

impl FromStr for Backend {
    type Err = FastConvError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fft" => Ok(Backend::Fft),
            "ntt" => Ok(Backend::Ntt),
            other => Err(FastConvError::invalid_input(format!("unknown backend {other:?}, expected \"fft\" or \"ntt\""))),
        }
    }
}

/// Tunable parameters of the engine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Allowed distance of a floating result to its nearest integer, relative to
    /// `max(1, peak magnitude)` of the transform output and capped at a quarter unit.
    pub tolerance: f64,
    /// Structured products of order below this use the direct double loop.
    pub direct_threshold: usize,
    /// Transform used for integer convolutions and wildcard matching.
    pub integer_backend: Backend,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            direct_threshold: DEFAULT_DIRECT_THRESHOLD,
            integer_backend: Backend::default(),
        }
    }
}

impl EngineConfig {
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_direct_threshold(mut self, direct_threshold: usize) -> Self {
        self.direct_threshold = direct_threshold;
        self
    }

    pub fn with_integer_backend(mut self, backend: Backend) -> Self {
        self.integer_backend = backend;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(FastConvError::invalid_input(format!(
                "tolerance must be a finite non-negative number, got {}",
                self.tolerance
            )));
        }
        Ok(())
    }

    /// Defaults overridden by `FASTCONV_TOLERANCE`, `FASTCONV_DIRECT_THRESHOLD`
    /// and `FASTCONV_BACKEND` when set.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`EngineConfig::from_env`] with an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config: EngineConfig = EngineConfig::default();

        if let Some(value) = lookup(ENV_TOLERANCE) {
            config.tolerance = value
                .trim()
                .parse()
                .map_err(|_| FastConvError::invalid_input(format!("{ENV_TOLERANCE}={value:?} is not a number")))?;
        }

        if let Some(value) = lookup(ENV_DIRECT_THRESHOLD) {
            config.direct_threshold = value.trim().parse().map_err(|_| {
                FastConvError::invalid_input(format!("{ENV_DIRECT_THRESHOLD}={value:?} is not a non-negative integer"))
            })?;
        }

        if let Some(value) = lookup(ENV_BACKEND) {
            config.integer_backend = value.parse()?;
        }

        config.validate()?;
        Ok(config)
    }
}
