//! Fast recursive type-II DCT (Nayuki's algorithm).
//!
//! Used by the Image-Code perceptual hash. The evaluation order is part of
//! the output contract: symmetric and antisymmetric halves are computed in
//! separate passes, recursed, then interleaved, with the antisymmetric
//! divisor evaluated as `cos(...) * 2.0`. Reordering or fusing these
//! operations can flip low-order mantissa bits and break known-answer
//! outputs on the comparison against the block median.
//!
//! See: <https://www.nayuki.io/page/fast-discrete-cosine-transform-algorithms>

use std::f64::consts::PI;

use iscc_core::{IsccError, IsccResult};

/// Computes the type-II DCT of `v`.
///
/// The input length must be a power of two (length 1 is the identity).
pub fn alg_dct(v: &[f64]) -> IsccResult<Vec<f64>> {
    if !v.len().is_power_of_two() {
        return Err(IsccError::InvalidInput(format!(
            "DCT input length must be a power of two, got {}",
            v.len()
        )));
    }
    Ok(dct_recursive(v))
}

fn dct_recursive(v: &[f64]) -> Vec<f64> {
    let n = v.len();
    if n == 1 {
        return v.to_vec();
    }

    let half = n / 2;
    let alpha: Vec<f64> = (0..half).map(|i| v[i] + v[n - 1 - i]).collect();
    let beta: Vec<f64> = (0..half)
        .map(|i| {
            let divisor = ((i as f64 + 0.5) * PI / n as f64).cos() * 2.0;
            (v[i] - v[n - 1 - i]) / divisor
        })
        .collect();

    let alpha = dct_recursive(&alpha);
    let beta = dct_recursive(&beta);

    let mut out = Vec::with_capacity(n);
    for i in 0..half - 1 {
        out.push(alpha[i]);
        out.push(beta[i] + beta[i + 1]);
    }
    out.push(alpha[half - 1]);
    out.push(beta[half - 1]);
    out
}
