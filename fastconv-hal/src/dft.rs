use tracing::trace;

use crate::{
    Direction,
    error::{FastConvError, Result},
    layouts::ComplexSeq,
    ntt::{NttTable, Prime},
    padded_len,
    reim::ReimDFTTable,
};

/// Transforms `seq`, zero-padded to the next power of two, in the given direction.
///
/// The output has the padded length. Zero-length input is rejected.
pub fn transform(seq: &ComplexSeq, direction: Direction) -> Result<ComplexSeq> {
    let m: usize = padded_len(seq.len())?;
    trace!(len = seq.len(), m, ?direction, "complex transform");
    let mut data: Vec<f64> = seq.to_reim(m);
    ReimDFTTable::<f64>::new(m, direction).execute(&mut data);
    Ok(ComplexSeq::from_reim(&data, m))
}

pub fn forward_transform(seq: &ComplexSeq) -> Result<ComplexSeq> {
    transform(seq, Direction::Forward)
}

pub fn inverse_transform(seq: &ComplexSeq) -> Result<ComplexSeq> {
    transform(seq, Direction::Inverse)
}

/// Number-theoretic counterpart of [`transform`]: values are reduced mod q and
/// zero-padded to the next power of two, which must not exceed the largest NTT
/// length supported by the prime.
pub fn ntt_transform(values: &[u64], prime: &Prime, direction: Direction) -> Result<Vec<u64>> {
    let m: usize = padded_len(values.len())?;
    if m as u64 > prime.max_ntt_len() {
        return Err(FastConvError::invalid_input(format!(
            "transform length {m} exceeds the maximum NTT length {} of q={}",
            prime.max_ntt_len(),
            prime.q()
        )));
    }
    trace!(len = values.len(), m, ?direction, q = prime.q(), "number-theoretic transform");
    let mut data: Vec<u64> = vec![0; m];
    data.iter_mut().zip(values).for_each(|(d, v)| *d = prime.reduce_u64(*v));
    NttTable::new(*prime, m).execute(&mut data, direction);
    Ok(data)
}
