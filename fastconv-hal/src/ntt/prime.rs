use primality_test::is_prime;

use crate::ntt::{Barrett, LOG_NTT_MAX, PRIME_BIT_SIZE};

/// An odd prime modulus `q < 2^62` with its 2-adic valuation, which bounds the
/// length of the NTTs it supports.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Prime {
    q: u64,
    two_adicity: u32,
}

impl Prime {
    /// Returns a new instance of Prime.
    /// Panics if q is not a prime > 2 or does not fit in 62 bits.
    pub fn new(q: u64) -> Self {
        assert!(q > 2 && is_prime(q), "invalid argument: q={q} is not an odd prime");
        Self::new_unchecked(q)
    }

    /// Returns a new instance of Prime.
    /// Does not check if q is a prime.
    pub fn new_unchecked(q: u64) -> Self {
        assert!(q > 2, "invalid argument: q={q} must be greater than 2");
        assert!(q < 1 << PRIME_BIT_SIZE, "invalid argument: q={q} does not fit in {PRIME_BIT_SIZE} bits");
        Self {
            q,
            two_adicity: (q - 1).trailing_zeros(),
        }
    }

    #[inline(always)]
    pub fn q(&self) -> u64 {
        self.q
    }

    #[inline(always)]
    pub fn two_adicity(&self) -> u32 {
        self.two_adicity
    }

    /// Largest power-of-two NTT length supported by q.
    pub fn max_ntt_len(&self) -> u64 {
        1 << self.two_adicity
    }

    #[inline(always)]
    pub fn add(&self, a: u64, b: u64) -> u64 {
        let r: u64 = a + b;
        if r >= self.q { r - self.q } else { r }
    }

    #[inline(always)]
    pub fn sub(&self, a: u64, b: u64) -> u64 {
        if a >= b { a - b } else { a + self.q - b }
    }

    #[inline(always)]
    pub fn mul(&self, a: u64, b: u64) -> u64 {
        ((a as u128 * b as u128) % self.q as u128) as u64
    }

    #[inline(always)]
    pub fn prepare(&self, v: u64) -> Barrett {
        Barrett::new(v, self.q)
    }

    #[inline(always)]
    pub fn mul_external(&self, lhs: Barrett, rhs: u64) -> u64 {
        lhs.mul(rhs, self.q)
    }

    #[inline(always)]
    pub fn reduce_u64(&self, x: u64) -> u64 {
        x % self.q
    }

    /// Maps a signed integer to its representative in `[0, q)`.
    #[inline(always)]
    pub fn reduce_i64(&self, x: i64) -> u64 {
        let r: u64 = x.unsigned_abs() % self.q;
        if x < 0 && r != 0 { self.q - r } else { r }
    }

    /// Returns x^exponent mod q.
    pub fn pow(&self, x: u64, exponent: u64) -> u64 {
        let mut base: u64 = x % self.q;
        let mut y: u64 = 1;
        let mut i: u64 = exponent;
        while i > 0 {
            if i & 1 == 1 {
                y = self.mul(y, base);
            }
            base = self.mul(base, base);
            i >>= 1;
        }
        y
    }

    /// Returns x^-1 mod q.
    /// User must ensure that x is not divisible by q.
    pub fn inv(&self, x: u64) -> u64 {
        debug_assert!(x % self.q != 0, "{x} is not invertible mod {}", self.q);
        self.pow(x, self.q - 2)
    }

    /// Returns a primitive nth root of unity mod q, nth_root being a power of two
    /// dividing q-1.
    ///
    /// For a quadratic non-residue `g`, `g^((q-1)/nth_root)` has order exactly
    /// `nth_root`, so candidates are tried until `psi^(nth_root/2) = -1`.
    pub fn primitive_nth_root(&self, nth_root: u64) -> u64 {
        assert!(
            nth_root.is_power_of_two() && nth_root <= self.max_ntt_len(),
            "invalid argument: nth_root={nth_root} is not a power of two dividing q-1={}",
            self.q - 1
        );

        if nth_root == 1 {
            return 1;
        }

        let exponent: u64 = (self.q - 1) / nth_root;
        let minus_one: u64 = self.q - 1;

        let mut candidate: u64 = 1;
        loop {
            candidate += 1;
            let psi: u64 = self.pow(candidate, exponent);
            if self.pow(psi, nth_root >> 1) == minus_one {
                debug_assert!(self.pow(psi, nth_root) == 1);
                return psi;
            }
        }
    }
}

/// Enumerates primes `q = 1 mod nth_root` downward from `2^bit_size`.
pub struct NttFriendlyPrimesGenerator {
    nth_root: u64,
    prev_prime: u64,
}

impl NttFriendlyPrimesGenerator {
    pub fn new(bit_size: u32, nth_root: u64) -> Self {
        assert!(nth_root.is_power_of_two(), "invalid argument: nth_root={nth_root} is not a power of two");
        assert!(bit_size <= PRIME_BIT_SIZE && nth_root < 1 << bit_size);
        Self {
            nth_root,
            prev_prime: (1 << bit_size) + 1 - nth_root,
        }
    }

    /// Generator of the primes used by the exact convolution path.
    pub fn standard() -> Self {
        Self::new(PRIME_BIT_SIZE, 1 << LOG_NTT_MAX)
    }

    /// Returns the next prime below the previous one, `None` once candidates drop
    /// under `nth_root`.
    pub fn next_downstream_prime(&mut self) -> Option<Prime> {
        while self.prev_prime > self.nth_root {
            let candidate: u64 = self.prev_prime;
            self.prev_prime -= self.nth_root;
            if is_prime(candidate) {
                return Some(Prime::new_unchecked(candidate));
            }
        }
        None
    }

    pub fn next_downstream_primes(&mut self, k: usize) -> Vec<Prime> {
        (0..k).map_while(|_| self.next_downstream_prime()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_primes_are_ntt_friendly() {
        let primes: Vec<Prime> = NttFriendlyPrimesGenerator::standard().next_downstream_primes(3);
        assert_eq!(primes.len(), 3);
        for w in primes.windows(2) {
            assert!(w[0].q() > w[1].q());
        }
        for prime in primes.iter() {
            assert!(is_prime(prime.q()));
            assert!(prime.q() < 1 << PRIME_BIT_SIZE);
            assert_eq!((prime.q() - 1) % (1 << LOG_NTT_MAX), 0);
            assert!(prime.two_adicity() >= LOG_NTT_MAX);
        }
    }

    #[test]
    fn small_prime_arithmetic() {
        // 998244353 = 119 * 2^23 + 1
        let prime: Prime = Prime::new(998244353);
        assert_eq!(prime.two_adicity(), 23);
        assert_eq!(prime.pow(3, prime.q() - 1), 1);
        assert_eq!(prime.mul(prime.inv(12345), 12345), 1);
        assert_eq!(prime.reduce_i64(-1), prime.q() - 1);
        assert_eq!(prime.reduce_i64(-(prime.q() as i64)), 0);
        assert_eq!(prime.sub(1, 2), prime.q() - 1);
        assert_eq!(prime.add(prime.q() - 1, 2), 1);
    }

    #[test]
    fn primitive_roots_have_exact_order() {
        let prime: Prime = Prime::new(998244353);
        for log_n in 0..=10 {
            let n: u64 = 1 << log_n;
            let psi: u64 = prime.primitive_nth_root(n);
            assert_eq!(prime.pow(psi, n), 1);
            if n > 1 {
                assert_eq!(prime.pow(psi, n >> 1), prime.q() - 1);
            }
        }
    }

    #[test]
    #[should_panic]
    fn unchecked_rejects_moduli_below_three() {
        let _ = Prime::new_unchecked(1);
    }

    #[test]
    #[should_panic]
    fn rejects_composite() {
        let _ = Prime::new(998244353 * 3);
    }
}
