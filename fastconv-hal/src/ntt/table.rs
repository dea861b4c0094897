use itertools::izip;

use crate::{
    Direction, bit_reverse_permute,
    ntt::{Barrett, Prime},
};

/// Precomputed powers of a primitive `m`-th root of unity mod q (and of its
/// inverse) for cyclic NTTs of length `m`.
pub struct NttTable {
    prime: Prime,
    m: usize,
    psi_forward: Vec<Barrett>,
    psi_backward: Vec<Barrett>,
    m_inv: Barrett,
}

impl NttTable {
    pub fn new(prime: Prime, m: usize) -> Self {
        assert!(m.is_power_of_two(), "invalid argument: m={m} is not a power of two");
        assert!(
            m as u64 <= prime.max_ntt_len(),
            "invalid argument: m={m} exceeds the maximum NTT length {} of q={}",
            prime.max_ntt_len(),
            prime.q()
        );

        let psi: u64 = prime.primitive_nth_root(m as u64);
        let psi_inv: u64 = prime.inv(psi);

        let h: usize = m >> 1;
        let mut psi_forward: Vec<Barrett> = Vec::with_capacity(h);
        let mut psi_backward: Vec<Barrett> = Vec::with_capacity(h);

        let mut powers_forward: u64 = 1;
        let mut powers_backward: u64 = 1;
        for _ in 0..h {
            psi_forward.push(prime.prepare(powers_forward));
            psi_backward.push(prime.prepare(powers_backward));
            powers_forward = prime.mul(powers_forward, psi);
            powers_backward = prime.mul(powers_backward, psi_inv);
        }

        Self {
            prime,
            m,
            psi_forward,
            psi_backward,
            m_inv: prime.prepare(prime.inv(m as u64)),
        }
    }

    pub fn prime(&self) -> &Prime {
        &self.prime
    }

    pub fn m(&self) -> usize {
        self.m
    }

    /// Transforms `a` (length `m`, entries `< q`) in place.
    ///
    /// The inverse direction uses `psi^-1` and scales by `m^-1`, so
    /// `Inverse(Forward(a)) == a` exactly.
    pub fn execute(&self, a: &mut [u64], direction: Direction) {
        let m: usize = self.m;
        assert!(a.len() == m, "invalid a.len()={} != m={}", a.len(), m);
        debug_assert!(a.iter().all(|x| *x < self.prime.q()), "NTT input not reduced mod q");

        let psi: &[Barrett] = match direction {
            Direction::Forward => &self.psi_forward,
            Direction::Inverse => &self.psi_backward,
        };

        bit_reverse_permute(a);

        let mut t: usize = 2;
        while t <= m {
            let size: usize = t >> 1;
            let stride: usize = m / t;
            a.chunks_exact_mut(t).for_each(|a| {
                let (a, b) = a.split_at_mut(size);
                izip!(a, b, psi.iter().step_by(stride)).for_each(|(a, b, psi)| self.dit_inplace(a, b, *psi));
            });
            t <<= 1;
        }

        if direction.is_inverse() {
            a.iter_mut().for_each(|x| *x = self.prime.mul_external(self.m_inv, *x));
        }
    }

    #[inline(always)]
    fn dit_inplace(&self, a: &mut u64, b: &mut u64, psi: Barrett) {
        let bt: u64 = self.prime.mul_external(psi, *b);
        *b = self.prime.sub(*a, bt);
        *a = self.prime.add(*a, bt);
    }
}
