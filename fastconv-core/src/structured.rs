//! Products of compressed Toeplitz / Hankel matrices with vectors.
//!
//! An `n x n` matrix is stored as its `2n - 1` distinct anti-/diagonal values.
//!
//! - Toeplitz: `A[i][j] = a[n-1+i-j]`. Since `conv(a, v)[t] = Σ_j a[t-j] v[j]`,
//!   the product is `conv(a, v)[n-1+i]` for `i` in `0..n`.
//! - Hankel: `H[i][j] = a[i+j]`. With `w = reverse(v)`,
//!   `conv(a, w)[t] = Σ_j a[t-(n-1)+j] v[j]`, so the product is again
//!   `conv(a, w)[n-1+i]`.
//!
//! Both read the window `[n-1, 2n-1)` of a length `3n-2` convolution.

use fastconv_hal::{FastConvError, Result, ntt::CrtPair};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    config::EngineConfig,
    convolution::{check_signed_range, convolve, convolve_integers},
};

/// Which index combination the backing array is addressed by.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StructureKind {
    /// `A[i][j] = a[n-1+i-j]`
    #[default]
    Toeplitz,
    /// `A[i][j] = a[i+j]`
    Hankel,
}

/// An `n x n` structured matrix stored as a backing array of length `2n - 1`.
#[derive(Clone, Debug, PartialEq)]
pub struct CompressedStructuredMatrix<T> {
    n: usize,
    kind: StructureKind,
    backing: Vec<T>,
}

impl<T: Copy> CompressedStructuredMatrix<T> {
    pub fn new(kind: StructureKind, backing: Vec<T>) -> Result<Self> {
        if backing.len() % 2 == 0 {
            return Err(FastConvError::invalid_input(format!(
                "backing array length {} is not of the form 2n-1 with n >= 1",
                backing.len()
            )));
        }
        Ok(Self {
            n: backing.len().div_ceil(2),
            kind,
            backing,
        })
    }

    pub fn toeplitz(backing: Vec<T>) -> Result<Self> {
        Self::new(StructureKind::Toeplitz, backing)
    }

    pub fn hankel(backing: Vec<T>) -> Result<Self> {
        Self::new(StructureKind::Hankel, backing)
    }

    /// Order of the matrix.
    pub fn n(&self) -> usize {
        self.n
    }

    pub fn kind(&self) -> StructureKind {
        self.kind
    }

    pub fn backing(&self) -> &[T] {
        &self.backing
    }

    /// Position of `A[i][j]` in the backing array, always in `[0, 2n-2]`.
    #[inline(always)]
    pub fn backing_index(&self, i: usize, j: usize) -> usize {
        debug_assert!(i < self.n && j < self.n, "({i}, {j}) out of bounds for n={}", self.n);
        match self.kind {
            StructureKind::Toeplitz => self.n - 1 + i - j,
            StructureKind::Hankel => i + j,
        }
    }

    pub fn entry(&self, i: usize, j: usize) -> Option<T> {
        if i >= self.n || j >= self.n {
            return None;
        }
        Some(self.backing[self.backing_index(i, j)])
    }

    /// Expands to row-major dense rows.
    pub fn to_dense(&self) -> Vec<Vec<T>> {
        (0..self.n)
            .map(|i| (0..self.n).map(|j| self.backing[self.backing_index(i, j)]).collect())
            .collect()
    }

    fn check_vector_len(&self, len: usize) -> Result<()> {
        if len != self.n {
            return Err(FastConvError::invalid_input(format!(
                "vector of length {len} does not match a backing array of length {} (n = {})",
                self.backing.len(),
                self.n
            )));
        }
        Ok(())
    }

    /// The right operand of the convolution for this matrix kind.
    fn convolution_operand(&self, v: &[T]) -> Vec<T> {
        match self.kind {
            StructureKind::Toeplitz => v.to_vec(),
            StructureKind::Hankel => v.iter().rev().copied().collect(),
        }
    }

    /// `[n-1, 2n-1)`, the rows of the product inside a length `3n-2` convolution.
    fn product_window<U: Copy>(&self, raw: &[U]) -> Vec<U> {
        debug_assert_eq!(raw.len(), 3 * self.n - 2);
        raw[self.n - 1..2 * self.n - 1].to_vec()
    }
}

impl CompressedStructuredMatrix<f64> {
    /// Matrix-vector product, direct below `config.direct_threshold`, via FFT otherwise.
    pub fn multiply(&self, v: &[f64], config: &EngineConfig) -> Result<Vec<f64>> {
        self.check_vector_len(v.len())?;

        if self.n < config.direct_threshold {
            debug!(n = self.n, kind = ?self.kind, "direct structured product");
            return Ok((0..self.n)
                .map(|i| (0..self.n).map(|j| self.backing[self.backing_index(i, j)] * v[j]).sum())
                .collect());
        }

        debug!(n = self.n, kind = ?self.kind, "fft structured product");
        let raw: Vec<f64> = convolve(&self.backing, &self.convolution_operand(v))?;
        Ok(self.product_window(&raw))
    }
}

impl CompressedStructuredMatrix<i64> {
    /// Exact integer matrix-vector product. Above the direct threshold the
    /// configured integer backend is used; the FFT backend may report a
    /// precision warning.
    pub fn multiply_integers(&self, v: &[i64], config: &EngineConfig) -> Result<Vec<i128>> {
        self.check_vector_len(v.len())?;

        if self.n < config.direct_threshold {
            debug!(n = self.n, kind = ?self.kind, "direct structured product");
            check_signed_range(&self.backing, v, &CrtPair::standard())?;
            return Ok((0..self.n)
                .map(|i| {
                    (0..self.n)
                        .map(|j| self.backing[self.backing_index(i, j)] as i128 * v[j] as i128)
                        .sum()
                })
                .collect());
        }

        let raw: Vec<i128> = convolve_integers(&self.backing, &self.convolution_operand(v), config)?;
        debug!(n = self.n, kind = ?self.kind, backend = ?config.integer_backend, "transform structured product");
        Ok(self.product_window(&raw))
    }
}

/// Checks `len(a) = 2 * len(v) - 1`, the shape of a compressed product.
pub(crate) fn check_shapes(a_len: usize, v_len: usize) -> Result<()> {
    if v_len == 0 {
        return Err(FastConvError::invalid_input("structured product of a zero-length vector"));
    }
    if v_len.checked_mul(2).map(|x| x - 1) != Some(a_len) {
        return Err(FastConvError::invalid_input(format!(
            "backing array of length {a_len} does not match a vector of length {v_len} (expected {})",
            v_len.saturating_mul(2) - 1
        )));
    }
    Ok(())
}

/// `result[i] = Σ_j a[n-1+i-j] * v[j]` for a vector `v` of length `n`.
pub fn multiply_structured(a: &[f64], v: &[f64], config: &EngineConfig) -> Result<Vec<f64>> {
    check_shapes(a.len(), v.len())?;
    CompressedStructuredMatrix::toeplitz(a.to_vec())?.multiply(v, config)
}

/// Integer counterpart of [`multiply_structured`].
pub fn multiply_structured_integers(a: &[i64], v: &[i64], config: &EngineConfig) -> Result<Vec<i128>> {
    check_shapes(a.len(), v.len())?;
    CompressedStructuredMatrix::toeplitz(a.to_vec())?.multiply_integers(v, config)
}
