use std::fmt::Debug;

use itertools::izip;
use num_traits::{Float, FloatConst};

use crate::{Direction, bit_reverse_permute, reim::cplx_twiddle};

/// Iterative radix-2 decimation-in-time DFT on reim layout.
///
/// `omg` is the table of [`crate::reim::ReimDFTTable`] built for `m` and `direction`.
/// The inverse direction scales the output by `1/m`.
pub fn dft_ref<R: Float + FloatConst + Debug>(m: usize, omg: &[R], direction: Direction, data: &mut [R]) {
    assert!(data.len() == 2 * m, "invalid data.len()={} != 2*m={}", data.len(), 2 * m);
    debug_assert!(omg.len() == m & !1, "invalid omg.len()={} for m={}", omg.len(), m);

    let (re, im) = data.split_at_mut(m);

    if m > 1 {
        bit_reverse_permute(re);
        bit_reverse_permute(im);

        let (omg_re, omg_im) = omg.split_at(m >> 1);

        let mut t: usize = 2;
        while t <= m {
            let size: usize = t >> 1;
            let stride: usize = m / t;
            izip!(re.chunks_exact_mut(t), im.chunks_exact_mut(t)).for_each(|(re, im)| {
                let (ra, rb) = re.split_at_mut(size);
                let (ia, ib) = im.split_at_mut(size);
                izip!(ra, ia, rb, ib, omg_re.iter().step_by(stride), omg_im.iter().step_by(stride)).for_each(
                    |(ra, ia, rb, ib, wr, wi)| {
                        cplx_twiddle(ra, ia, rb, ib, *wr, *wi);
                    },
                );
            });
            t <<= 1;
        }
    }

    if direction.is_inverse() {
        let m_inv: R = R::one() / R::from(m).unwrap();
        re.iter_mut().chain(im.iter_mut()).for_each(|x| *x = *x * m_inv);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{reim::ReimDFTTable, source::Source};

    fn naive_dft(re: &[f64], im: &[f64]) -> (Vec<f64>, Vec<f64>) {
        let m: usize = re.len();
        let mut out_re: Vec<f64> = vec![0.0; m];
        let mut out_im: Vec<f64> = vec![0.0; m];
        for k in 0..m {
            for j in 0..m {
                let angle: f64 = -2.0 * std::f64::consts::PI * ((j * k) % m) as f64 / m as f64;
                out_re[k] += re[j] * angle.cos() - im[j] * angle.sin();
                out_im[k] += re[j] * angle.sin() + im[j] * angle.cos();
            }
        }
        (out_re, out_im)
    }

    #[test]
    fn forward_matches_naive_dft() {
        let mut source: Source = Source::new([1u8; 32]);
        for log_m in 0..7 {
            let m: usize = 1 << log_m;
            let mut data: Vec<f64> = vec![0.0; 2 * m];
            source.fill_f64(&mut data, -1.0, 1.0);
            let (want_re, want_im) = naive_dft(&data[..m], &data[m..]);

            ReimDFTTable::<f64>::new(m, Direction::Forward).execute(&mut data);

            for k in 0..m {
                assert!((data[k] - want_re[k]).abs() < 1e-9, "m={m} k={k}: {} != {}", data[k], want_re[k]);
                assert!((data[m + k] - want_im[k]).abs() < 1e-9, "m={m} k={k}: {} != {}", data[m + k], want_im[k]);
            }
        }
    }

    #[test]
    fn impulse_transforms_to_constant() {
        let m: usize = 8;
        let mut data: Vec<f64> = vec![0.0; 2 * m];
        data[0] = 1.0;
        ReimDFTTable::<f64>::new(m, Direction::Forward).execute(&mut data);
        assert!(data[..m].iter().all(|x| (x - 1.0).abs() < 1e-15));
        assert!(data[m..].iter().all(|x| x.abs() < 1e-15));
    }

    #[test]
    fn round_trip_all_lengths_up_to_1024() {
        let mut source: Source = Source::new([0u8; 32]);
        for log_m in 0..=10 {
            let m: usize = 1 << log_m;
            let mut data: Vec<f64> = vec![0.0; 2 * m];
            source.fill_f64(&mut data, -100.0, 100.0);
            let want: Vec<f64> = data.clone();

            ReimDFTTable::<f64>::new(m, Direction::Forward).execute(&mut data);
            ReimDFTTable::<f64>::new(m, Direction::Inverse).execute(&mut data);

            izip!(data.iter(), want.iter()).for_each(|(have, want)| {
                assert!((have - want).abs() < 1e-9, "m={m}: {have} != {want}");
            });
        }
    }
}
