//! Property checks against brute-force references, generic over the engine
//! configuration. Used by the unit tests of this crate and by
//! [`engine_test_suite!`](crate::engine_test_suite).

use std::collections::BTreeSet;

use fastconv_hal::{
    Direction, FastConvError,
    layouts::ComplexSeq,
    ntt::{NttTable, NttFriendlyPrimesGenerator, Prime},
    source::Source,
    transform,
};

use crate::{
    convolution::{convolve_direct, convolve_direct_integers},
    engine::Engine,
    structured::{CompressedStructuredMatrix, StructureKind},
    wildcard::{MatchReport, WILDCARD_CODE, WildcardPattern, match_encoded},
};

/// `O(n * m)` wildcard matching.
pub fn match_brute_force(text: &[u64], pattern: &[u64]) -> BTreeSet<usize> {
    if pattern.len() > text.len() {
        return BTreeSet::new();
    }
    (0..=text.len() - pattern.len())
        .filter(|i| {
            pattern
                .iter()
                .enumerate()
                .all(|(j, p)| *p == WILDCARD_CODE || text[i + j] == *p)
        })
        .collect()
}

/// Forward then inverse transform for every power of two up to 1024: FFT
/// within `1e-9`, NTT exactly.
pub fn test_transform_round_trip() {
    let mut source: Source = Source::new([0u8; 32]);
    let prime: Prime = NttFriendlyPrimesGenerator::standard()
        .next_downstream_prime()
        .expect("no NTT-friendly prime");

    for log_m in 0..=10 {
        let m: usize = 1 << log_m;

        let mut re: Vec<f64> = vec![0.0; m];
        let mut im: Vec<f64> = vec![0.0; m];
        source.fill_f64(&mut re, -1.0, 1.0);
        source.fill_f64(&mut im, -1.0, 1.0);
        let seq: ComplexSeq = ComplexSeq::new(re, im).unwrap();

        let back: ComplexSeq = transform(&transform(&seq, Direction::Forward).unwrap(), Direction::Inverse).unwrap();
        assert!(back.max_distance(&seq) < 1e-9, "fft m={m}");

        let values: Vec<u64> = (0..m).map(|_| source.next_u64n(prime.q(), u64::MAX >> 2)).collect();
        let table: NttTable = NttTable::new(prime, m);
        let mut data: Vec<u64> = values.clone();
        table.execute(&mut data, Direction::Forward);
        table.execute(&mut data, Direction::Inverse);
        assert_eq!(data, values, "ntt m={m}");
    }
}

/// Convolution against the double sum for every pair of lengths up to 8.
pub fn test_convolution(engine: &Engine) {
    let mut source: Source = Source::new([1u8; 32]);

    for n1 in 1..=8 {
        for n2 in 1..=8 {
            let mut x: Vec<f64> = vec![0.0; n1];
            let mut y: Vec<f64> = vec![0.0; n2];
            source.fill_f64(&mut x, -10.0, 10.0);
            source.fill_f64(&mut y, -10.0, 10.0);

            let have: Vec<f64> = engine.convolve(&x, &y).unwrap();
            let want: Vec<f64> = convolve_direct(&x, &y).unwrap();
            assert_eq!(have.len(), n1 + n2 - 1);
            have.iter()
                .zip(want.iter())
                .for_each(|(h, w)| assert!((h - w).abs() < 1e-9, "n1={n1} n2={n2}: {h} != {w}"));

            let mut xi: Vec<i64> = vec![0; n1];
            let mut yi: Vec<i64> = vec![0; n2];
            source.fill_i64(&mut xi, 1 << 12);
            source.fill_i64(&mut yi, 1 << 12);
            assert_eq!(
                engine.convolve_integers(&xi, &yi).unwrap(),
                convolve_direct_integers(&xi, &yi).unwrap(),
                "n1={n1} n2={n2}"
            );
        }
    }
}

/// Structured products of both kinds against the dense product for `n <= 8`.
pub fn test_structured(engine: &Engine) {
    let mut source: Source = Source::new([2u8; 32]);

    for n in 1..=8 {
        for kind in [StructureKind::Toeplitz, StructureKind::Hankel] {
            let mut a: Vec<i64> = vec![0; 2 * n - 1];
            let mut v: Vec<i64> = vec![0; n];
            source.fill_i64(&mut a, 100);
            source.fill_i64(&mut v, 100);

            let matrix: CompressedStructuredMatrix<i64> = CompressedStructuredMatrix::new(kind, a.clone()).unwrap();
            let want: Vec<i128> = matrix
                .to_dense()
                .iter()
                .map(|row| row.iter().zip(v.iter()).map(|(r, v)| *r as i128 * *v as i128).sum())
                .collect();
            assert_eq!(engine.multiply_integers(&matrix, &v).unwrap(), want, "{kind:?} n={n}");

            let af: Vec<f64> = a.iter().map(|x| *x as f64).collect();
            let vf: Vec<f64> = v.iter().map(|x| *x as f64).collect();
            let matrix: CompressedStructuredMatrix<f64> = CompressedStructuredMatrix::new(kind, af.clone()).unwrap();
            let have: Vec<f64> = engine.multiply(&matrix, &vf).unwrap();
            have.iter()
                .zip(want.iter())
                .for_each(|(h, w)| assert!((h - *w as f64).abs() < 1e-7, "{kind:?} n={n}: {h} != {w}"));

            if kind == StructureKind::Toeplitz {
                assert_eq!(engine.multiply_structured(&af, &vf).unwrap(), have);
            }
        }
    }
}

/// Wildcard matching against [`match_brute_force`] for texts up to 20 symbols
/// with random wildcard placement.
pub fn test_wildcard(engine: &Engine) {
    let mut source: Source = Source::new([3u8; 32]);

    for n in 1..=20 {
        for m in 1..=n {
            // Small alphabets so that matches occur.
            let symbols: u64 = 1 + source.next_index(3) as u64;
            let text: Vec<u64> = (0..n).map(|_| 1 + source.next_index(symbols as usize) as u64).collect();

            // Half the patterns are planted in the text.
            let mut pattern: Vec<u64> = if source.next_bool(0.5) {
                let start: usize = source.next_index(n - m + 1);
                text[start..start + m].to_vec()
            } else {
                (0..m).map(|_| 1 + source.next_index(symbols as usize) as u64).collect()
            };
            pattern.iter_mut().for_each(|p| {
                if source.next_bool(0.3) {
                    *p = WILDCARD_CODE
                }
            });

            let encoded: WildcardPattern = WildcardPattern::from_codes(pattern.clone()).unwrap();
            let have: MatchReport = match_encoded(&text, &encoded, engine.config()).unwrap();
            assert_eq!(
                have.positions(),
                &match_brute_force(&text, &pattern),
                "text={text:?} pattern={pattern:?}"
            );
        }
    }
}

/// Malformed inputs are rejected with [`FastConvError::InvalidInput`].
pub fn test_invalid_inputs(engine: &Engine) {
    let invalid = |err: FastConvError| matches!(err, FastConvError::InvalidInput { .. });

    assert!(invalid(engine.convolve(&[], &[1.0]).unwrap_err()));
    assert!(invalid(engine.convolve_integers(&[1], &[]).unwrap_err()));
    assert!(invalid(engine.multiply_structured(&[1.0; 6], &[1.0; 4]).unwrap_err()));
    assert!(invalid(engine.multiply_structured(&[1.0], &[]).unwrap_err()));
    assert!(invalid(engine.match_wildcards_str("abc", "", '?').unwrap_err()));
}

/// Declares one test per check of this module for an engine built from a config.
#[macro_export]
macro_rules! engine_test_suite {
    (
        mod $modname:ident,
        config = $config:expr,
        tests = {
            $( $(#[$attr:meta])* $test_name:ident => $impl:path ),+ $(,)?
        }
    ) => {
        mod $modname {
            #[allow(unused_imports)]
            use super::*;

            fn engine() -> $crate::engine::Engine {
                $crate::engine::Engine::new($config).expect("invalid engine config")
            }

            $(
                $(#[$attr])*
                #[test]
                fn $test_name() {
                    ($impl)(&engine());
                }
            )+
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Backend, EngineConfig};

    #[test]
    fn transform_round_trip() {
        test_transform_round_trip();
    }

    #[test]
    fn brute_force_reference() {
        assert_eq!(match_brute_force(&[1, 2, 1, 2], &[1, 0]), BTreeSet::from([0, 2]));
        assert!(match_brute_force(&[1], &[1, 1]).is_empty());
    }

    crate::engine_test_suite! {
        mod default_engine,
        config = EngineConfig::default(),
        tests = {
            convolution => crate::test_suite::test_convolution,
            structured => crate::test_suite::test_structured,
            wildcard => crate::test_suite::test_wildcard,
            invalid_inputs => crate::test_suite::test_invalid_inputs,
        }
    }

    crate::engine_test_suite! {
        mod fft_engine_transform_path,
        config = EngineConfig::default().with_integer_backend(Backend::Fft).with_direct_threshold(0),
        tests = {
            convolution => crate::test_suite::test_convolution,
            structured => crate::test_suite::test_structured,
            wildcard => crate::test_suite::test_wildcard,
        }
    }

    crate::engine_test_suite! {
        mod ntt_engine_transform_path,
        config = EngineConfig::default().with_direct_threshold(0),
        tests = {
            structured => crate::test_suite::test_structured,
        }
    }
}
