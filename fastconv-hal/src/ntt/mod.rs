//! Number-theoretic transform over NTT-friendly primes `q < 2^62`.
//!
//! Exact integer convolutions are computed modulo two such primes and
//! recombined with [`CrtPair`], which represents values up to ~2^123.

mod barrett;
mod crt;
mod prime;
mod table;

pub use barrett::*;
pub use crt::*;
pub use prime::*;
pub use table::*;

/// Every generated prime satisfies `q = 1 mod 2^LOG_NTT_MAX`, bounding the NTT length.
pub const LOG_NTT_MAX: u32 = 32;

/// Bit size below which generated primes are taken, leaving headroom for lazy sums `< 2q`.
pub const PRIME_BIT_SIZE: u32 = 62;
