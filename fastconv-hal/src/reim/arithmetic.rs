use itertools::izip;

/// res <- res * a, pointwise complex product on reim layout.
#[inline(always)]
pub fn reim_mul_inplace_ref(res: &mut [f64], a: &[f64]) {
    assert_eq!(res.len(), a.len(), "invalid a.len()={} != res.len()={}", a.len(), res.len());
    let m: usize = res.len() >> 1;
    let (res_re, res_im) = res.split_at_mut(m);
    let (a_re, a_im) = a.split_at(m);
    izip!(res_re, res_im, a_re, a_im).for_each(|(rr, ri, ar, ai)| {
        let re: f64 = *rr * ar - *ri * ai;
        let im: f64 = *rr * ai + *ri * ar;
        *rr = re;
        *ri = im;
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mul_is_complex_product() {
        // (1 + 2i)(3 - i) = 5 + 5i, (0 + 1i)(0 + 1i) = -1
        let mut res: Vec<f64> = vec![1.0, 0.0, 2.0, 1.0];
        let a: Vec<f64> = vec![3.0, 0.0, -1.0, 1.0];
        reim_mul_inplace_ref(&mut res, &a);
        assert_eq!(res, vec![5.0, -1.0, 5.0, 0.0]);
    }
}
