use itertools::izip;

use crate::error::{FastConvError, Result};

/// A finite sequence of complex numbers, stored as separate real and
/// imaginary parts of equal length.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ComplexSeq {
    re: Vec<f64>,
    im: Vec<f64>,
}

impl ComplexSeq {
    pub fn new(re: Vec<f64>, im: Vec<f64>) -> Result<Self> {
        if re.len() != im.len() {
            return Err(FastConvError::invalid_input(format!(
                "real part has {} entries but imaginary part has {}",
                re.len(),
                im.len()
            )));
        }
        Ok(Self { re, im })
    }

    pub fn from_real(re: &[f64]) -> Self {
        Self {
            re: re.to_vec(),
            im: vec![0.0; re.len()],
        }
    }

    pub fn zeros(len: usize) -> Self {
        Self {
            re: vec![0.0; len],
            im: vec![0.0; len],
        }
    }

    pub fn len(&self) -> usize {
        self.re.len()
    }

    pub fn is_empty(&self) -> bool {
        self.re.is_empty()
    }

    pub fn re(&self) -> &[f64] {
        &self.re
    }

    pub fn im(&self) -> &[f64] {
        &self.im
    }

    pub fn get(&self, i: usize) -> Option<(f64, f64)> {
        Some((*self.re.get(i)?, *self.im.get(i)?))
    }

    /// Copies the sequence into a zero-padded reim buffer of `2m` scalars.
    pub fn to_reim(&self, m: usize) -> Vec<f64> {
        assert!(self.len() <= m, "invalid m={} < len={}", m, self.len());
        let mut data: Vec<f64> = vec![0.0; 2 * m];
        data[..self.len()].copy_from_slice(&self.re);
        data[m..m + self.len()].copy_from_slice(&self.im);
        data
    }

    /// Reads the first `len` entries of a reim buffer of `2m` scalars.
    pub fn from_reim(data: &[f64], len: usize) -> Self {
        let m: usize = data.len() >> 1;
        assert!(len <= m, "invalid len={len} > m={m}");
        Self {
            re: data[..len].to_vec(),
            im: data[m..m + len].to_vec(),
        }
    }

    /// Largest entry-wise distance (max over real and imaginary parts).
    pub fn max_distance(&self, other: &ComplexSeq) -> f64 {
        assert_eq!(self.len(), other.len());
        izip!(self.re.iter().chain(self.im.iter()), other.re.iter().chain(other.im.iter()))
            .fold(0.0, |acc: f64, (a, b)| acc.max((a - b).abs()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reim_round_trip_pads_with_zeros() {
        let seq: ComplexSeq = ComplexSeq::new(vec![1.0, 2.0, 3.0], vec![-1.0, 0.5, 0.0]).unwrap();
        let data: Vec<f64> = seq.to_reim(4);
        assert_eq!(data, vec![1.0, 2.0, 3.0, 0.0, -1.0, 0.5, 0.0, 0.0]);
        assert_eq!(ComplexSeq::from_reim(&data, 3), seq);
        assert_eq!(seq.get(1), Some((2.0, 0.5)));
        assert_eq!(seq.get(3), None);
    }

    #[test]
    fn rejects_mismatched_parts() {
        assert!(ComplexSeq::new(vec![1.0], vec![]).is_err());
    }
}
