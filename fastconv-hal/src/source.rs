use rand_chacha::{ChaCha8Rng, rand_core::SeedableRng};
use rand_core::RngCore;

const MAXF64: f64 = 9007199254740992.0;

/// Seeded ChaCha8 stream used to draw reproducible test and benchmark inputs.
pub struct Source {
    source: ChaCha8Rng,
}

impl Source {
    pub fn new(seed: [u8; 32]) -> Source {
        Source {
            source: ChaCha8Rng::from_seed(seed),
        }
    }

    pub fn branch(&mut self) -> ([u8; 32], Self) {
        let seed: [u8; 32] = self.new_seed();
        (seed, Source::new(seed))
    }

    pub fn new_seed(&mut self) -> [u8; 32] {
        let mut seed: [u8; 32] = [0u8; 32];
        self.fill_bytes(&mut seed);
        seed
    }

    /// Uniform in `[0, max)`, drawn by rejection on `next_u64() & mask`.
    #[inline(always)]
    pub fn next_u64n(&mut self, max: u64, mask: u64) -> u64 {
        let mut x: u64 = self.next_u64() & mask;
        while x >= max {
            x = self.next_u64() & mask;
        }
        x
    }

    /// Uniform in `[0, n)`.
    #[inline(always)]
    pub fn next_index(&mut self, n: usize) -> usize {
        assert!(n > 0, "invalid argument: n=0");
        let mask: u64 = (n as u64).next_power_of_two().wrapping_sub(1) | (n as u64);
        self.next_u64n(n as u64, mask) as usize
    }

    /// Uniform in `[-bound, bound]`.
    #[inline(always)]
    pub fn next_i64_bounded(&mut self, bound: u64) -> i64 {
        let span: u64 = 2 * bound + 1;
        let mask: u64 = span.next_power_of_two().wrapping_sub(1) | span;
        self.next_u64n(span, mask) as i64 - bound as i64
    }

    #[inline(always)]
    pub fn next_f64(&mut self, min: f64, max: f64) -> f64 {
        min + ((self.next_u64() << 11 >> 11) as f64) / MAXF64 * (max - min)
    }

    /// True with probability `p`.
    #[inline(always)]
    pub fn next_bool(&mut self, p: f64) -> bool {
        self.next_f64(0.0, 1.0) < p
    }

    pub fn fill_f64(&mut self, res: &mut [f64], min: f64, max: f64) {
        res.iter_mut().for_each(|x| *x = self.next_f64(min, max));
    }

    pub fn fill_i64(&mut self, res: &mut [i64], bound: u64) {
        res.iter_mut().for_each(|x| *x = self.next_i64_bounded(bound));
    }

    /// Draws `len` symbols uniformly from `alphabet`.
    pub fn sample_symbols<S: Clone>(&mut self, alphabet: &[S], len: usize) -> Vec<S> {
        (0..len).map(|_| alphabet[self.next_index(alphabet.len())].clone()).collect()
    }
}

impl RngCore for Source {
    #[inline(always)]
    fn next_u32(&mut self) -> u32 {
        self.source.next_u32()
    }

    #[inline(always)]
    fn next_u64(&mut self) -> u64 {
        self.source.next_u64()
    }

    #[inline(always)]
    fn fill_bytes(&mut self, bytes: &mut [u8]) {
        self.source.fill_bytes(bytes)
    }
}
