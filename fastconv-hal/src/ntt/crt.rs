use crate::ntt::{NttFriendlyPrimesGenerator, Prime};

/// Chinese remaindering over two distinct primes `p, q`, recovering integers in
/// `[0, p*q)` (or the centered range for signed values) from their residues.
#[derive(Clone, Copy, Debug)]
pub struct CrtPair {
    p: Prime,
    q: Prime,
    p_inv_mod_q: u64,
    modulus: u128,
}

impl CrtPair {
    pub fn new(p: Prime, q: Prime) -> Self {
        assert_ne!(p.q(), q.q(), "invalid argument: CRT primes must be distinct");
        Self {
            p,
            q,
            p_inv_mod_q: q.inv(q.reduce_u64(p.q())),
            modulus: p.q() as u128 * q.q() as u128,
        }
    }

    /// The two largest NTT-friendly primes below `2^62`.
    pub fn standard() -> Self {
        let mut generator: NttFriendlyPrimesGenerator = NttFriendlyPrimesGenerator::standard();
        let primes: Vec<Prime> = generator.next_downstream_primes(2);
        assert_eq!(primes.len(), 2, "NTT-friendly prime list exhausted");
        Self::new(primes[0], primes[1])
    }

    pub fn primes(&self) -> [Prime; 2] {
        [self.p, self.q]
    }

    /// `p*q`: unsigned values are exact when `< modulus`.
    pub fn modulus(&self) -> u128 {
        self.modulus
    }

    /// Largest magnitude recoverable by [`CrtPair::reconstruct_signed`].
    pub fn max_signed(&self) -> u128 {
        (self.modulus - 1) >> 1
    }

    /// Returns the unique `x` in `[0, p*q)` with `x = rp mod p` and `x = rq mod q`.
    #[inline(always)]
    pub fn reconstruct(&self, rp: u64, rq: u64) -> u128 {
        debug_assert!(rp < self.p.q() && rq < self.q.q());
        let diff: u64 = self.q.sub(rq, self.q.reduce_u64(rp));
        let k: u64 = self.q.mul(diff, self.p_inv_mod_q);
        rp as u128 + self.p.q() as u128 * k as u128
    }

    /// Same as [`CrtPair::reconstruct`] but returns the centered representative
    /// in `[-(p*q-1)/2, (p*q-1)/2]`.
    #[inline(always)]
    pub fn reconstruct_signed(&self, rp: u64, rq: u64) -> i128 {
        let x: u128 = self.reconstruct(rp, rq);
        if x > self.max_signed() {
            x as i128 - self.modulus as i128
        } else {
            x as i128
        }
    }
}
