//! Linear convolution of finite sequences.
//!
//! Every entry point zero-pads both operands to a common power of two
//! `m >= n1 + n2 - 1`, runs two forward transforms, a pointwise product and one
//! inverse transform, then truncates to exactly `n1 + n2 - 1` entries. Cyclic
//! wrap-around cannot reach the kept window since `m >= n1 + n2 - 1`.

use fastconv_hal::{
    Direction, FastConvError, Result,
    layouts::ComplexSeq,
    ntt::{CrtPair, NttTable, Prime},
    padded_len,
    reim::{ReimDFTTable, peak_magnitude, reim_from_f64_ref, reim_from_i64_ref, reim_mul_inplace_ref, round_to_integers},
};
use itertools::izip;
use tracing::{debug, instrument};

use crate::config::{Backend, EngineConfig};

/// Length of the linear convolution of operands of lengths `n1` and `n2`.
pub fn output_len(n1: usize, n2: usize) -> Result<usize> {
    if n1 == 0 || n2 == 0 {
        return Err(FastConvError::invalid_input(format!(
            "cannot convolve zero-length sequences (lengths {n1} and {n2})"
        )));
    }
    n1.checked_add(n2 - 1)
        .ok_or_else(|| FastConvError::invalid_input(format!("convolution length {n1} + {n2} - 1 overflows")))
}

/// Convolution of real sequences through the complex FFT.
#[instrument(level = "debug", skip_all, fields(n1 = x.len(), n2 = y.len()))]
pub fn convolve(x: &[f64], y: &[f64]) -> Result<Vec<f64>> {
    let len: usize = output_len(x.len(), y.len())?;
    let m: usize = padded_len(len)?;
    debug!(len, m, "fft convolution");

    let mut a: Vec<f64> = vec![0.0; 2 * m];
    let mut b: Vec<f64> = vec![0.0; 2 * m];
    reim_from_f64_ref(&mut a, x);
    reim_from_f64_ref(&mut b, y);

    fft_cyclic_product(m, &mut a, &b);

    a.truncate(len);
    Ok(a)
}

/// Convolution of complex sequences through the complex FFT.
#[instrument(level = "debug", skip_all, fields(n1 = x.len(), n2 = y.len()))]
pub fn convolve_complex(x: &ComplexSeq, y: &ComplexSeq) -> Result<ComplexSeq> {
    let len: usize = output_len(x.len(), y.len())?;
    let m: usize = padded_len(len)?;
    debug!(len, m, "complex fft convolution");

    let mut a: Vec<f64> = x.to_reim(m);
    let b: Vec<f64> = y.to_reim(m);

    fft_cyclic_product(m, &mut a, &b);

    Ok(ComplexSeq::from_reim(&a, len))
}

/// Convolution of integer sequences through the complex FFT, rounded to integers.
///
/// Returns [`FastConvError::PrecisionWarning`] when an output is not within
/// `tolerance` (relative to the peak output magnitude) of an integer.
#[instrument(level = "debug", skip_all, fields(n1 = x.len(), n2 = y.len()))]
pub fn convolve_integers_fft(x: &[i64], y: &[i64], tolerance: f64) -> Result<Vec<i128>> {
    let len: usize = output_len(x.len(), y.len())?;
    let m: usize = padded_len(len)?;
    debug!(len, m, tolerance, "rounded fft convolution");

    let mut a: Vec<f64> = vec![0.0; 2 * m];
    let mut b: Vec<f64> = vec![0.0; 2 * m];
    reim_from_i64_ref(&mut a, x);
    reim_from_i64_ref(&mut b, y);

    fft_cyclic_product(m, &mut a, &b);

    let values: &[f64] = &a[..len];
    round_to_integers(values, tolerance, peak_magnitude(values))
}

/// Exact convolution of signed integers through two NTTs and CRT.
///
/// Fails with [`FastConvError::InvalidInput`] when `max|x| * max|y| * min(n1, n2)`
/// is not representable in the centered CRT range.
#[instrument(level = "debug", skip_all, fields(n1 = x.len(), n2 = y.len()))]
pub fn convolve_signed(x: &[i64], y: &[i64]) -> Result<Vec<i128>> {
    let len: usize = output_len(x.len(), y.len())?;
    let crt: CrtPair = CrtPair::standard();
    check_signed_range(x, y, &crt)?;

    let [p, q] = crt.primes();
    let rp: Vec<u64> = ntt_cyclic_product(
        &p,
        len,
        x.iter().map(|v| p.reduce_i64(*v)),
        y.iter().map(|v| p.reduce_i64(*v)),
    )?;
    let rq: Vec<u64> = ntt_cyclic_product(
        &q,
        len,
        x.iter().map(|v| q.reduce_i64(*v)),
        y.iter().map(|v| q.reduce_i64(*v)),
    )?;

    Ok(izip!(rp, rq).map(|(rp, rq)| crt.reconstruct_signed(rp, rq)).collect())
}

/// Exact convolution of non-negative integers through two NTTs and CRT.
///
/// Fails with [`FastConvError::InvalidInput`] when `max(x) * max(y) * min(n1, n2)`
/// reaches the CRT modulus.
#[instrument(level = "debug", skip_all, fields(n1 = x.len(), n2 = y.len()))]
pub fn convolve_unsigned(x: &[u64], y: &[u64]) -> Result<Vec<u128>> {
    let len: usize = output_len(x.len(), y.len())?;
    let crt: CrtPair = CrtPair::standard();

    let x_max: u64 = x.iter().copied().max().unwrap_or(0);
    let y_max: u64 = y.iter().copied().max().unwrap_or(0);
    check_exact_range(x_max, y_max, x.len().min(y.len()), crt.modulus() - 1)?;

    let [p, q] = crt.primes();
    let rp: Vec<u64> = ntt_cyclic_product(
        &p,
        len,
        x.iter().map(|v| p.reduce_u64(*v)),
        y.iter().map(|v| p.reduce_u64(*v)),
    )?;
    let rq: Vec<u64> = ntt_cyclic_product(
        &q,
        len,
        x.iter().map(|v| q.reduce_u64(*v)),
        y.iter().map(|v| q.reduce_u64(*v)),
    )?;

    Ok(izip!(rp, rq).map(|(rp, rq)| crt.reconstruct(rp, rq)).collect())
}

/// Integer convolution with the backend selected by `config.integer_backend`.
pub fn convolve_integers(x: &[i64], y: &[i64], config: &EngineConfig) -> Result<Vec<i128>> {
    match config.integer_backend {
        Backend::Ntt => convolve_signed(x, y),
        Backend::Fft => convolve_integers_fft(x, y, config.tolerance),
    }
}

/// Reference `O(n1 * n2)` convolution.
pub fn convolve_direct(x: &[f64], y: &[f64]) -> Result<Vec<f64>> {
    let len: usize = output_len(x.len(), y.len())?;
    let mut res: Vec<f64> = vec![0.0; len];
    for (i, xi) in x.iter().enumerate() {
        for (j, yj) in y.iter().enumerate() {
            res[i + j] += xi * yj;
        }
    }
    Ok(res)
}

/// Reference `O(n1 * n2)` convolution over integers.
///
/// Accepts exactly the inputs [`convolve_signed`] accepts.
pub fn convolve_direct_integers(x: &[i64], y: &[i64]) -> Result<Vec<i128>> {
    let len: usize = output_len(x.len(), y.len())?;
    check_signed_range(x, y, &CrtPair::standard())?;
    let mut res: Vec<i128> = vec![0; len];
    for (i, xi) in x.iter().enumerate() {
        for (j, yj) in y.iter().enumerate() {
            res[i + j] += *xi as i128 * *yj as i128;
        }
    }
    Ok(res)
}

/// `a <- IDFT(DFT(a) * DFT(b))` on reim buffers of `2m` scalars.
fn fft_cyclic_product(m: usize, a: &mut [f64], b: &[f64]) {
    let forward: ReimDFTTable<f64> = ReimDFTTable::new(m, Direction::Forward);
    let mut b: Vec<f64> = b.to_vec();
    forward.execute(a);
    forward.execute(&mut b);
    reim_mul_inplace_ref(a, &b);
    ReimDFTTable::<f64>::new(m, Direction::Inverse).execute(a);
}

/// Linear convolution mod q of two residue streams, truncated to `len`.
fn ntt_cyclic_product(
    prime: &Prime,
    len: usize,
    x: impl ExactSizeIterator<Item = u64>,
    y: impl ExactSizeIterator<Item = u64>,
) -> Result<Vec<u64>> {
    let m: usize = padded_len(len)?;
    if m as u64 > prime.max_ntt_len() {
        return Err(FastConvError::invalid_input(format!(
            "convolution length {len} exceeds the maximum NTT length {}",
            prime.max_ntt_len()
        )));
    }

    let mut a: Vec<u64> = vec![0; m];
    let mut b: Vec<u64> = vec![0; m];
    izip!(a.iter_mut(), x).for_each(|(a, x)| *a = x);
    izip!(b.iter_mut(), y).for_each(|(b, y)| *b = y);

    let table: NttTable = NttTable::new(*prime, m);
    table.execute(&mut a, Direction::Forward);
    table.execute(&mut b, Direction::Forward);
    izip!(a.iter_mut(), b.iter()).for_each(|(a, b)| *a = prime.mul(*a, *b));
    table.execute(&mut a, Direction::Inverse);

    a.truncate(len);
    Ok(a)
}

/// Checks that every output of a signed exact convolution is recoverable by `crt`.
pub(crate) fn check_signed_range(x: &[i64], y: &[i64], crt: &CrtPair) -> Result<()> {
    let x_max: u64 = x.iter().map(|v| v.unsigned_abs()).max().unwrap_or(0);
    let y_max: u64 = y.iter().map(|v| v.unsigned_abs()).max().unwrap_or(0);
    check_exact_range(x_max, y_max, x.len().min(y.len()), crt.max_signed())
}

/// Checks that every output of an exact convolution stays within `limit`.
fn check_exact_range(x_max: u64, y_max: u64, terms: usize, limit: u128) -> Result<()> {
    let bound: Option<u128> = (x_max as u128 * y_max as u128).checked_mul(terms as u128);
    match bound {
        Some(bound) if bound <= limit => Ok(()),
        _ => Err(FastConvError::invalid_input(format!(
            "exact convolution out of range: max|x| = {x_max}, max|y| = {y_max}, {terms} terms exceed {limit}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use fastconv_hal::source::Source;

    use super::*;

    #[test]
    fn output_length_is_n1_plus_n2_minus_one() {
        for (n1, n2) in [(1, 1), (1, 7), (5, 3), (8, 8), (9, 1)] {
            let x: Vec<f64> = vec![1.0; n1];
            let y: Vec<f64> = vec![1.0; n2];
            assert_eq!(convolve(&x, &y).unwrap().len(), n1 + n2 - 1);
            assert_eq!(convolve_signed(&vec![1; n1], &vec![1; n2]).unwrap().len(), n1 + n2 - 1);
        }
    }

    #[test]
    fn empty_operands_are_invalid() {
        assert!(matches!(convolve(&[], &[1.0]), Err(FastConvError::InvalidInput { .. })));
        assert!(matches!(convolve_unsigned(&[1], &[]), Err(FastConvError::InvalidInput { .. })));
        assert!(convolve_complex(&ComplexSeq::zeros(0), &ComplexSeq::zeros(2)).is_err());
    }

    #[test]
    fn polynomial_product() {
        // (1 + 2x + 3x^2)(4 + 5x) = 4 + 13x + 22x^2 + 15x^3
        let have: Vec<f64> = convolve(&[1.0, 2.0, 3.0], &[4.0, 5.0]).unwrap();
        izip!(have.iter(), [4.0, 13.0, 22.0, 15.0].iter()).for_each(|(h, w)| assert!((h - w).abs() < 1e-9));
        assert_eq!(convolve_signed(&[1, 2, 3], &[4, 5]).unwrap(), vec![4, 13, 22, 15]);
        assert_eq!(convolve_unsigned(&[1, 2, 3], &[4, 5]).unwrap(), vec![4, 13, 22, 15]);
        assert_eq!(convolve_integers_fft(&[1, 2, 3], &[4, 5], 1e-6).unwrap(), vec![4, 13, 22, 15]);
    }

    #[test]
    fn integer_backends_agree() {
        let x: Vec<i64> = vec![-7, 0, 12, 3, -1];
        let y: Vec<i64> = vec![2, -2, 9];
        let want: Vec<i128> = convolve_direct_integers(&x, &y).unwrap();
        for backend in [Backend::Ntt, Backend::Fft] {
            let config: EngineConfig = EngineConfig::default().with_integer_backend(backend);
            assert_eq!(convolve_integers(&x, &y, &config).unwrap(), want);
        }
    }

    #[test]
    fn complex_product() {
        // (1 + i) * (1 - i) = 2, single-entry sequences
        let x: ComplexSeq = ComplexSeq::new(vec![1.0], vec![1.0]).unwrap();
        let y: ComplexSeq = ComplexSeq::new(vec![1.0], vec![-1.0]).unwrap();
        let have: ComplexSeq = convolve_complex(&x, &y).unwrap();
        assert_eq!(have.len(), 1);
        assert!((have.re()[0] - 2.0).abs() < 1e-12 && have.im()[0].abs() < 1e-12);

        let have: ComplexSeq =
            convolve_complex(&ComplexSeq::from_real(&[1.0, 2.0, 3.0]), &ComplexSeq::from_real(&[4.0, 5.0])).unwrap();
        let want: ComplexSeq = ComplexSeq::from_real(&[4.0, 13.0, 22.0, 15.0]);
        assert!(have.max_distance(&want) < 1e-9);
    }

    #[test]
    fn signed_exact_handles_negatives_and_large_values() {
        let mut source: Source = Source::new([3u8; 32]);
        let mut x: Vec<i64> = vec![0; 37];
        let mut y: Vec<i64> = vec![0; 21];
        source.fill_i64(&mut x, 1 << 50);
        source.fill_i64(&mut y, 1 << 50);
        assert_eq!(convolve_signed(&x, &y).unwrap(), convolve_direct_integers(&x, &y).unwrap());
    }

    #[test]
    fn unsigned_exact_beyond_f64_range() {
        let x: Vec<u64> = vec![u32::MAX as u64 * 1000; 5];
        let y: Vec<u64> = vec![u32::MAX as u64; 3];
        let have: Vec<u128> = convolve_unsigned(&x, &y).unwrap();
        let unit: u128 = u32::MAX as u128 * 1000 * u32::MAX as u128;
        assert_eq!(have, vec![unit, 2 * unit, 3 * unit, 3 * unit, 3 * unit, 2 * unit, unit]);
    }

    #[test]
    fn exact_range_is_enforced() {
        let x: Vec<i64> = vec![i64::MAX; 4];
        assert!(matches!(convolve_signed(&x, &x), Err(FastConvError::InvalidInput { .. })));
        let x: Vec<u64> = vec![u64::MAX; 2];
        assert!(convolve_unsigned(&x, &x).is_err());
    }

    #[test]
    fn direct_reference_shares_the_exact_range() {
        let x: Vec<i64> = vec![i64::MIN; 3];
        assert!(matches!(convolve_direct_integers(&x, &x), Err(FastConvError::InvalidInput { .. })));
        assert_eq!(convolve_direct_integers(&[i64::MIN], &[1]).unwrap(), vec![i64::MIN as i128]);
    }

    #[test]
    fn fft_integers_report_precision_loss() {
        // Outputs around 2^60 cannot be rounded reliably in f64.
        let x: Vec<i64> = vec![1 << 30; 4];
        let err: FastConvError = convolve_integers_fft(&x, &x, 1e-6).unwrap_err();
        assert!(err.is_precision_warning());
    }
}
