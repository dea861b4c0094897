//! # fastconv-core
//!
//! Convolution-based algorithms on top of the transform kernel of
//! [`fastconv_hal`]:
//!
//! - [`convolution`]: linear convolution of real, complex and integer sequences,
//!   with an exact two-prime NTT path for integers.
//! - [`structured`]: `O(n log n)` products of Toeplitz and Hankel matrices,
//!   stored as their `2n - 1` diagonals, with vectors.
//! - [`wildcard`]: substring matching where a reserved symbol in the pattern
//!   matches any single text symbol.
//!
//! [`Engine`] carries an [`EngineConfig`] and exposes every operation; the free
//! functions [`convolve`], [`multiply_structured`] and [`match_wildcards`] use
//! the default configuration.
//!
//! ```
//! use fastconv_core::{Engine, EngineConfig};
//!
//! let engine = Engine::new(EngineConfig::default()).unwrap();
//! let report = engine.match_wildcards_str("abcabc", "a?c", '?').unwrap();
//! assert_eq!(report.iter().collect::<Vec<_>>(), vec![0, 3]);
//! ```

pub mod config;
pub mod convolution;
pub mod engine;
pub mod structured;
pub mod test_suite;
pub mod wildcard;

pub use config::{Backend, EngineConfig};
pub use engine::{Engine, convolve, match_wildcards, multiply_structured};
pub use fastconv_hal::{Direction, FastConvError, Result, layouts::ComplexSeq};
pub use structured::{CompressedStructuredMatrix, StructureKind};
pub use wildcard::{Alphabet, MatchReport, WildcardPattern};
