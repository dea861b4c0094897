use std::fmt::Debug;

use num_traits::{Float, FloatConst};

use crate::{Direction, reim::dft_ref};

/// Twiddle factors of an `m`-point complex DFT in one direction.
///
/// `omg` holds `exp(∓2πik/m)` for `k < m/2` in reim layout: the `m/2` cosines
/// followed by the `m/2` signed sines. The forward table uses the negative
/// exponent, the inverse table its conjugate.
pub struct ReimDFTTable<R: Float + FloatConst + Debug> {
    m: usize,
    direction: Direction,
    omg: Vec<R>,
}

impl<R: Float + FloatConst + Debug> ReimDFTTable<R> {
    pub fn new(m: usize, direction: Direction) -> Self {
        assert!(m.is_power_of_two(), "m must be a power of two but is {m}");

        let h: usize = m >> 1;
        let mut omg: Vec<R> = vec![R::zero(); 2 * h];

        let two_pi: R = R::from(2).unwrap() * R::PI();
        let m_float: R = R::from(m).unwrap();
        let sign: R = match direction {
            Direction::Forward => -R::one(),
            Direction::Inverse => R::one(),
        };

        let (omg_re, omg_im) = omg.split_at_mut(h);
        for k in 0..h {
            let angle: R = two_pi * R::from(k).unwrap() / m_float;
            omg_re[k] = angle.cos();
            omg_im[k] = sign * angle.sin();
        }

        Self { m, direction, omg }
    }

    pub fn m(&self) -> usize {
        self.m
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn omg(&self) -> &[R] {
        &self.omg
    }

    /// Transforms `data` (reim layout, `2m` scalars) in place.
    pub fn execute(&self, data: &mut [R]) {
        dft_ref(self.m, &self.omg, self.direction, data);
    }
}
