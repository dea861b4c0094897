/// A constant `value < q` together with `quotient = floor(value * 2^64 / q)`,
/// ready for multiplication by arbitrary `u64` operands without a division.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Barrett(pub u64, pub u64);

impl Barrett {
    /// Prepares `value` for multiplications modulo `q`.
    #[inline(always)]
    pub fn new(value: u64, q: u64) -> Self {
        debug_assert!(value < q, "value={value} >= q={q}");
        let quotient: u64 = (((value as u128) << 64) / q as u128) as u64;
        Barrett(value, quotient)
    }

    #[inline(always)]
    pub fn value(&self) -> u64 {
        self.0
    }

    #[inline(always)]
    pub fn quotient(&self) -> u64 {
        self.1
    }

    /// Returns `value * rhs mod q` in `[0, 2q)`.
    #[inline(always)]
    pub fn mul_lazy(&self, rhs: u64, q: u64) -> u64 {
        let t: u64 = ((self.quotient() as u128 * rhs as u128) >> 64) as u64;
        rhs.wrapping_mul(self.value()).wrapping_sub(q.wrapping_mul(t))
    }

    /// Returns `value * rhs mod q` in `[0, q)`.
    #[inline(always)]
    pub fn mul(&self, rhs: u64, q: u64) -> u64 {
        let r: u64 = self.mul_lazy(rhs, q);
        if r >= q { r - q } else { r }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_wide_multiplication() {
        let q: u64 = 0x3FFF_FFFF_0000_0001 - (1 << 32) * 6;
        for (v, x) in [(0u64, 5u64), (1, q - 1), (q - 1, q - 1), (123456789, u64::MAX), (q >> 1, 987654321987)] {
            let want: u64 = ((v as u128 * x as u128) % q as u128) as u64;
            assert_eq!(Barrett::new(v, q).mul(x, q), want, "v={v} x={x}");
            assert!(Barrett::new(v, q).mul_lazy(x, q) < 2 * q);
        }
    }
}
