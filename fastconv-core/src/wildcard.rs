//! Substring matching with a single-symbol wildcard.
//!
//! Symbols are encoded as positive integers and the wildcard as `0`. For a text
//! `S` of length `n` and a pattern `P` of length `m`,
//!
//! `score(i) = Σ_j P[j] * (S[i+j] - P[j])^2 = A[i+m-1] - 2 * B[i+m-1] + C`
//!
//! with `A = conv(rev(P), S^2)`, `B = conv(rev(P^2), S)` and `C = Σ_j P[j]^3`.
//! Every term is non-negative, so `score(i) = 0` exactly when each position
//! either holds a wildcard in the pattern or agrees with the text.

use std::{
    collections::{BTreeMap, BTreeSet},
    fmt::Debug,
};

use fastconv_hal::{
    FastConvError, Result,
    reim::{peak_magnitude, round_to_integers},
};
use itertools::izip;
use tracing::debug;

use crate::{
    config::{Backend, EngineConfig},
    convolution::{convolve, convolve_unsigned},
};

/// Code of the wildcard symbol. Real symbols are numbered from 1.
pub const WILDCARD_CODE: u64 = 0;

/// Explicit symbol to code table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Alphabet<S: Ord> {
    codes: BTreeMap<S, u64>,
    wildcard: S,
}

impl<S: Ord + Clone + Debug> Alphabet<S> {
    /// Numbers `symbols` from 1 in order of first appearance, repeated symbols
    /// keeping their first code. Fails if a symbol equals the wildcard.
    pub fn new(symbols: impl IntoIterator<Item = S>, wildcard: S) -> Result<Self> {
        let mut codes: BTreeMap<S, u64> = BTreeMap::new();
        for symbol in symbols {
            if symbol == wildcard {
                return Err(FastConvError::invalid_input(format!(
                    "symbol {symbol:?} collides with the wildcard encoding"
                )));
            }
            let next: u64 = codes.len() as u64 + 1;
            codes.entry(symbol).or_insert(next);
        }
        Ok(Self { codes, wildcard })
    }

    /// Alphabet of every non-wildcard symbol of `text` and `pattern`.
    pub fn from_sequences(text: &[S], pattern: &[S], wildcard: S) -> Result<Self> {
        let symbols: Vec<S> = text
            .iter()
            .chain(pattern)
            .filter(|s| **s != wildcard)
            .cloned()
            .collect();
        Self::new(symbols, wildcard)
    }

    pub fn wildcard(&self) -> &S {
        &self.wildcard
    }

    /// Code of `symbol`, [`WILDCARD_CODE`] for the wildcard, `None` if unknown.
    pub fn code(&self, symbol: &S) -> Option<u64> {
        if *symbol == self.wildcard {
            return Some(WILDCARD_CODE);
        }
        self.codes.get(symbol).copied()
    }

    /// Number of real symbols.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn max_code(&self) -> u64 {
        self.codes.len() as u64
    }

    fn encode(&self, symbols: &[S]) -> Result<Vec<u64>> {
        symbols
            .iter()
            .enumerate()
            .map(|(i, s)| {
                self.code(s)
                    .ok_or_else(|| FastConvError::invalid_input(format!("symbol {s:?} at {i} is not in the alphabet")))
            })
            .collect()
    }

    /// Encodes a text. A wildcard symbol occurring in the text is kept as a
    /// literal that only a pattern wildcard matches.
    pub fn encode_text(&self, text: &[S]) -> Result<Vec<u64>> {
        self.encode(text)
    }

    pub fn encode_pattern(&self, pattern: &[S]) -> Result<WildcardPattern> {
        WildcardPattern::from_codes(self.encode(pattern)?)
    }
}

/// A non-empty encoded pattern.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WildcardPattern {
    codes: Vec<u64>,
    wildcards: usize,
}

impl WildcardPattern {
    pub fn from_codes(codes: Vec<u64>) -> Result<Self> {
        if codes.is_empty() {
            return Err(FastConvError::invalid_input("empty pattern"));
        }
        let wildcards: usize = codes.iter().filter(|c| **c == WILDCARD_CODE).count();
        Ok(Self { codes, wildcards })
    }

    pub fn codes(&self) -> &[u64] {
        &self.codes
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Number of wildcard positions.
    pub fn wildcards(&self) -> usize {
        self.wildcards
    }

    pub fn is_all_wildcards(&self) -> bool {
        self.wildcards == self.codes.len()
    }
}

/// Start offsets at which a pattern matches, in increasing order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MatchReport {
    positions: BTreeSet<usize>,
}

impl MatchReport {
    pub fn contains(&self, position: usize) -> bool {
        self.positions.contains(&position)
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.positions.iter().copied()
    }

    pub fn positions(&self) -> &BTreeSet<usize> {
        &self.positions
    }

    pub fn into_positions(self) -> BTreeSet<usize> {
        self.positions
    }
}

impl FromIterator<usize> for MatchReport {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        Self {
            positions: iter.into_iter().collect(),
        }
    }
}

/// Matches an encoded pattern against an encoded text with the backend of `config`.
pub fn match_encoded(text: &[u64], pattern: &WildcardPattern, config: &EngineConfig) -> Result<MatchReport> {
    let n: usize = text.len();
    let m: usize = pattern.len();

    if m > n {
        debug!(n, m, "pattern longer than text");
        return Ok(MatchReport::default());
    }

    if pattern.is_all_wildcards() {
        debug!(n, m, "all-wildcard pattern");
        return Ok((0..=n - m).collect());
    }

    debug!(n, m, wildcards = pattern.wildcards(), backend = ?config.integer_backend, "wildcard matching");
    let scores: Vec<i128> = match config.integer_backend {
        Backend::Ntt => exact_scores(text, pattern.codes())?,
        Backend::Fft => rounded_scores(text, pattern.codes(), config.tolerance)?,
    };

    Ok(scores
        .iter()
        .enumerate()
        .filter(|(_, score)| **score == 0)
        .map(|(i, _)| i)
        .collect())
}

/// Matches `pattern` against `text` where `wildcard` stands for any single symbol.
pub fn match_wildcards<S: Ord + Clone + Debug>(
    text: &[S],
    pattern: &[S],
    wildcard: S,
    config: &EngineConfig,
) -> Result<MatchReport> {
    let alphabet: Alphabet<S> = Alphabet::from_sequences(text, pattern, wildcard)?;
    match_with_alphabet(&alphabet, text, pattern, config)
}

/// Same as [`match_wildcards`] with a caller-supplied alphabet.
pub fn match_with_alphabet<S: Ord + Clone + Debug>(
    alphabet: &Alphabet<S>,
    text: &[S],
    pattern: &[S],
    config: &EngineConfig,
) -> Result<MatchReport> {
    let pattern: WildcardPattern = alphabet.encode_pattern(pattern)?;
    let text: Vec<u64> = alphabet.encode_text(text)?;
    match_encoded(&text, &pattern, config)
}

/// [`match_wildcards`] over the characters of two strings.
pub fn match_wildcards_str(text: &str, pattern: &str, wildcard: char, config: &EngineConfig) -> Result<MatchReport> {
    let text: Vec<char> = text.chars().collect();
    let pattern: Vec<char> = pattern.chars().collect();
    match_wildcards(&text, &pattern, wildcard, config)
}

/// `score(i)` for `i` in `[0, n-m]`, exactly.
fn exact_scores(text: &[u64], pattern: &[u64]) -> Result<Vec<i128>> {
    let m: usize = pattern.len();
    let n: usize = text.len();

    let p: Vec<u64> = pattern.iter().rev().copied().collect();
    let p_sq: Vec<u64> = p.iter().map(|x| checked_square(*x)).collect::<Result<_>>()?;
    let s_sq: Vec<u64> = text.iter().map(|x| checked_square(*x)).collect::<Result<_>>()?;

    let a: Vec<u128> = convolve_unsigned(&p, &s_sq)?;
    let b: Vec<u128> = convolve_unsigned(&p_sq, text)?;
    let c: u128 = pattern
        .iter()
        .try_fold(0u128, |acc, x| acc.checked_add(*x as u128 * *x as u128 * *x as u128))
        .ok_or_else(|| FastConvError::invalid_input("pattern cube sum overflows"))?;

    // a, b, c < 2^124 after the range checks of convolve_unsigned.
    Ok(izip!(&a[m - 1..n], &b[m - 1..n])
        .map(|(a, b)| *a as i128 - 2 * (*b as i128) + c as i128)
        .collect())
}

/// `score(i)` for `i` in `[0, n-m]`, through the complex FFT and rounding.
fn rounded_scores(text: &[u64], pattern: &[u64], tolerance: f64) -> Result<Vec<i128>> {
    let m: usize = pattern.len();
    let n: usize = text.len();

    let p: Vec<f64> = pattern.iter().rev().map(|x| *x as f64).collect();
    let p_sq: Vec<f64> = p.iter().map(|x| x * x).collect();
    let s: Vec<f64> = text.iter().map(|x| *x as f64).collect();
    let s_sq: Vec<f64> = s.iter().map(|x| x * x).collect();

    let a: Vec<f64> = convolve(&p, &s_sq)?;
    let b: Vec<f64> = convolve(&p_sq, &s)?;
    let c: f64 = p.iter().map(|x| x * x * x).sum();

    let scores: Vec<f64> = izip!(&a[m - 1..n], &b[m - 1..n])
        .map(|(a, b)| a - 2.0 * b + c)
        .collect();

    // The score cancels terms as large as the peak of A, not the score itself.
    let scale: f64 = peak_magnitude(&a).max(c);
    round_to_integers(&scores, tolerance, scale)
}

fn checked_square(x: u64) -> Result<u64> {
    x.checked_mul(x)
        .ok_or_else(|| FastConvError::invalid_input(format!("symbol code {x} is too large to square")))
}
