//! # fastconv-hal
//!
//! Transform kernel of the fastconv engine: forward and inverse discrete transforms
//! of sequences whose length is a power of two.
//!
//! Two families are provided:
//!
//! - **[`reim`]**: complex FFT over `f64` (or any [`num_traits::Float`]) on the
//!   split real/imaginary layout, where a complex vector of length `m` is stored as
//!   `[re_0, ..., re_{m-1}, im_0, ..., im_{m-1}]`.
//! - **[`ntt`]**: number-theoretic transform over NTT-friendly primes `q < 2^62`
//!   with Barrett-prepared twiddles, plus a two-prime CRT used to recover exact
//!   integer convolutions of up to ~123 bits.
//!
//! Both families are driven by a single routine parameterized by [`Direction`]:
//! the inverse uses the conjugate (resp. inverse) root of unity and a final `1/m`
//! scaling.
//!
//! Precomputed tables are plain values: they are built per call by the caller and
//! never cached across calls.

pub mod error;
pub mod layouts;
pub mod ntt;
pub mod reim;
pub mod source;

mod dft;

pub use dft::{forward_transform, inverse_transform, ntt_transform, transform};
pub use error::{FastConvError, Result};

/// Direction of a transform.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Forward,
    Inverse,
}

impl Direction {
    #[inline(always)]
    pub fn is_inverse(self) -> bool {
        self == Direction::Inverse
    }
}

/// Returns the power-of-two transform length that holds `len` entries.
///
/// Zero-length sequences cannot be transformed and yield [`FastConvError::InvalidInput`].
pub fn padded_len(len: usize) -> Result<usize> {
    if len == 0 {
        return Err(FastConvError::invalid_input("zero-length sequence"));
    }
    len.checked_next_power_of_two()
        .ok_or_else(|| FastConvError::invalid_input(format!("sequence length {len} has no power-of-two padding")))
}

#[inline(always)]
pub(crate) fn log2(m: usize) -> u32 {
    debug_assert!(m.is_power_of_two(), "m={m} is not a power of two");
    m.trailing_zeros()
}

/// Swaps `data[i]` and `data[rev(i)]` for all `i`, where `rev` reverses the
/// `log2(data.len())` low bits.
#[inline(always)]
pub(crate) fn bit_reverse_permute<T>(data: &mut [T]) {
    let m: usize = data.len();
    if m <= 2 {
        return;
    }
    let log_m: u32 = log2(m);
    for i in 0..m {
        let j: usize = i.reverse_bits() >> (usize::BITS - log_m);
        if i < j {
            data.swap(i, j);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padded_len_rounds_up() {
        assert_eq!(padded_len(1).unwrap(), 1);
        assert_eq!(padded_len(5).unwrap(), 8);
        assert_eq!(padded_len(1024).unwrap(), 1024);
        assert_eq!(padded_len(1025).unwrap(), 2048);
    }

    #[test]
    fn padded_len_rejects_empty() {
        assert!(matches!(padded_len(0), Err(FastConvError::InvalidInput { .. })));
    }

    #[test]
    fn bit_reverse_permute_is_an_involution() {
        let mut a: Vec<usize> = (0..16).collect();
        bit_reverse_permute(&mut a);
        assert_eq!(a[1], 8);
        assert_eq!(a[3], 12);
        bit_reverse_permute(&mut a);
        assert_eq!(a, (0..16).collect::<Vec<usize>>());
    }
}
