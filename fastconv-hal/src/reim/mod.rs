//! Complex FFT on the split real/imaginary ("reim") layout.
//!
//! A complex vector of length `m` occupies `2m` scalars: the `m` real parts
//! followed by the `m` imaginary parts.

mod arithmetic;
mod conversion;
mod dft_ref;
mod table;

pub use arithmetic::*;
pub use conversion::*;
pub use dft_ref::*;
pub use table::*;

#[inline(always)]
pub(crate) fn cplx_twiddle<R: num_traits::Float>(ra: &mut R, ia: &mut R, rb: &mut R, ib: &mut R, omg_re: R, omg_im: R) {
    let dr: R = *rb * omg_re - *ib * omg_im;
    let di: R = *rb * omg_im + *ib * omg_re;
    *rb = *ra - dr;
    *ib = *ia - di;
    *ra = *ra + dr;
    *ia = *ia + di;
}
