use thiserror::Error;

/// Errors reported by the transform kernel and the convolution engine built on it.
///
/// Every failure is reported to the immediate caller; nothing in the engine is fatal.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum FastConvError {
    /// Malformed lengths, alphabet encoding collisions, zero-length sequences,
    /// values outside the exact range, or an invalid configuration.
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    /// A floating-point result that should be an integer is not within the
    /// configured tolerance of one. An infinite `deviation` means the value is
    /// not finite or lies beyond the range where `f64` represents every integer.
    #[error(
        "precision warning: output[{index}] = {value} deviates by {deviation:e} from the nearest integer (allowed {allowed:e})"
    )]
    PrecisionWarning {
        index: usize,
        value: f64,
        deviation: f64,
        allowed: f64,
    },
}

impl FastConvError {
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput { reason: reason.into() }
    }

    pub fn precision_warning(index: usize, value: f64, deviation: f64, allowed: f64) -> Self {
        Self::PrecisionWarning {
            index,
            value,
            deviation,
            allowed,
        }
    }

    /// Callers that need exact answers fall back to the modular path on this.
    pub fn is_precision_warning(&self) -> bool {
        matches!(self, Self::PrecisionWarning { .. })
    }
}

pub type Result<T> = std::result::Result<T, FastConvError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_problem() {
        let err: FastConvError = FastConvError::invalid_input("zero-length sequence");
        assert_eq!(err.to_string(), "invalid input: zero-length sequence");
        assert!(!err.is_precision_warning());

        let err: FastConvError = FastConvError::precision_warning(3, 2.4, 0.4, 1e-6);
        assert!(err.is_precision_warning());
        assert!(err.to_string().starts_with("precision warning: output[3] = 2.4"));
    }
}
