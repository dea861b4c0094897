use std::fmt::Debug;

use fastconv_hal::{Result, layouts::ComplexSeq};

use crate::{
    config::EngineConfig,
    convolution,
    structured::{self, CompressedStructuredMatrix},
    wildcard::{self, Alphabet, MatchReport},
};

/// Entry point bundling an [`EngineConfig`] with every operation of the crate.
///
/// The engine holds no state beyond its configuration: every call allocates and
/// drops its own buffers and tables, so a shared `&Engine` can be used from any
/// number of threads.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Engine {
    config: EngineConfig,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Engine configured from the `FASTCONV_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(EngineConfig::from_env()?)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn convolve(&self, x: &[f64], y: &[f64]) -> Result<Vec<f64>> {
        convolution::convolve(x, y)
    }

    pub fn convolve_complex(&self, x: &ComplexSeq, y: &ComplexSeq) -> Result<ComplexSeq> {
        convolution::convolve_complex(x, y)
    }

    pub fn convolve_integers(&self, x: &[i64], y: &[i64]) -> Result<Vec<i128>> {
        convolution::convolve_integers(x, y, &self.config)
    }

    pub fn convolve_unsigned(&self, x: &[u64], y: &[u64]) -> Result<Vec<u128>> {
        convolution::convolve_unsigned(x, y)
    }

    /// Toeplitz product `result[i] = Σ_j a[n-1+i-j] * v[j]`.
    pub fn multiply_structured(&self, a: &[f64], v: &[f64]) -> Result<Vec<f64>> {
        structured::multiply_structured(a, v, &self.config)
    }

    pub fn multiply_structured_integers(&self, a: &[i64], v: &[i64]) -> Result<Vec<i128>> {
        structured::multiply_structured_integers(a, v, &self.config)
    }

    pub fn multiply(&self, matrix: &CompressedStructuredMatrix<f64>, v: &[f64]) -> Result<Vec<f64>> {
        matrix.multiply(v, &self.config)
    }

    pub fn multiply_integers(&self, matrix: &CompressedStructuredMatrix<i64>, v: &[i64]) -> Result<Vec<i128>> {
        matrix.multiply_integers(v, &self.config)
    }

    pub fn match_wildcards<S: Ord + Clone + Debug>(&self, text: &[S], pattern: &[S], wildcard: S) -> Result<MatchReport> {
        wildcard::match_wildcards(text, pattern, wildcard, &self.config)
    }

    pub fn match_with_alphabet<S: Ord + Clone + Debug>(
        &self,
        alphabet: &Alphabet<S>,
        text: &[S],
        pattern: &[S],
    ) -> Result<MatchReport> {
        wildcard::match_with_alphabet(alphabet, text, pattern, &self.config)
    }

    pub fn match_wildcards_str(&self, text: &str, pattern: &str, wildcard: char) -> Result<MatchReport> {
        wildcard::match_wildcards_str(text, pattern, wildcard, &self.config)
    }
}

/// [`Engine::convolve`] with the default configuration.
pub fn convolve(x: &[f64], y: &[f64]) -> Result<Vec<f64>> {
    Engine::default().convolve(x, y)
}

/// [`Engine::multiply_structured`] with the default configuration.
pub fn multiply_structured(a: &[f64], v: &[f64]) -> Result<Vec<f64>> {
    Engine::default().multiply_structured(a, v)
}

/// [`Engine::match_wildcards`] with the default configuration (exact backend).
pub fn match_wildcards<S: Ord + Clone + Debug>(text: &[S], pattern: &[S], wildcard: S) -> Result<MatchReport> {
    Engine::default().match_wildcards(text, pattern, wildcard)
}
