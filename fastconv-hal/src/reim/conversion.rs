use itertools::izip;
use tracing::warn;

use crate::error::{FastConvError, Result};

/// Largest magnitude below which every integer is exactly representable as `f64`.
pub const MAX_EXACT_F64: f64 = 9007199254740992.0;

/// Upper bound on the accepted distance to the nearest integer, whatever the tolerance.
/// Past a quarter unit the nearest integer is no longer a trustworthy answer.
pub const ROUNDING_DEVIATION_CAP: f64 = 0.25;

/// Writes `a` into the real half of `res` (reim layout) and zeroes the rest.
#[inline(always)]
pub fn reim_from_f64_ref(res: &mut [f64], a: &[f64]) {
    let m: usize = res.len() >> 1;
    assert!(a.len() <= m, "invalid a.len()={} > m={}", a.len(), m);
    res.fill(0.);
    res[..a.len()].copy_from_slice(a);
}

/// Writes `a` into the real half of `res` (reim layout) and zeroes the rest.
#[inline(always)]
pub fn reim_from_i64_ref(res: &mut [f64], a: &[i64]) {
    let m: usize = res.len() >> 1;
    assert!(a.len() <= m, "invalid a.len()={} > m={}", a.len(), m);
    res.fill(0.);
    izip!(res.iter_mut(), a.iter()).for_each(|(r, a)| *r = *a as f64);
}

/// Deviation from the nearest integer accepted by [`round_to_integers`].
#[inline(always)]
pub fn allowed_deviation(tolerance: f64, scale: f64) -> f64 {
    (tolerance * scale.abs().max(1.0)).min(ROUNDING_DEVIATION_CAP)
}

/// Rounds every value to the nearest integer.
///
/// `scale` is the magnitude the rounding error is measured against, typically the
/// peak magnitude of the transform output the values were derived from. A value
/// farther than [`allowed_deviation`] from an integer, a non-finite value, or a
/// scale at or beyond [`MAX_EXACT_F64`] is reported as
/// [`FastConvError::PrecisionWarning`] instead of being rounded.
pub fn round_to_integers(values: &[f64], tolerance: f64, scale: f64) -> Result<Vec<i128>> {
    let allowed: f64 = allowed_deviation(tolerance, scale);

    if !(scale.abs() < MAX_EXACT_F64) {
        let index: usize = values
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.abs().total_cmp(&b.abs()))
            .map_or(0, |(i, _)| i);
        let value: f64 = values.get(index).copied().unwrap_or(scale);
        warn!(index, value, scale, "transform output exceeds the exact f64 integer range");
        return Err(FastConvError::precision_warning(index, value, f64::INFINITY, allowed));
    }

    values
        .iter()
        .enumerate()
        .map(|(index, &value)| {
            let rounded: f64 = value.round();
            let deviation: f64 = if value.is_finite() {
                (value - rounded).abs()
            } else {
                f64::INFINITY
            };
            if deviation > allowed {
                warn!(index, value, deviation, allowed, "rounded output outside tolerance");
                return Err(FastConvError::precision_warning(index, value, deviation, allowed));
            }
            Ok(rounded as i128)
        })
        .collect()
}

/// Peak absolute value of `values`, `0.0` when empty.
#[inline(always)]
pub fn peak_magnitude(values: &[f64]) -> f64 {
    values.iter().fold(0.0, |acc: f64, x| acc.max(x.abs()))
}
