//! The Wilson-Burg spectral factorization driver (component D): given a
//! symmetric auto-correlation `R` of odd extent, iteratively overwrites a
//! filter's coefficients so that `apply(apply_transpose(delta)) ≈ R`.
//!
//! One pair of (`factor_wilson_burg_*d`, `Workspace*d`) per rank, mirroring
//! the per-rank split of `kernels`. Each iteration is:
//!
//! 1. `T = applyInverseTranspose(S)`
//! 2. `U = applyInverse(T)`
//! 3. `U[center] = (U[center] + 1) * 0.5`, then zero `U`'s anti-causal half
//! 4. `T = apply(U)`
//! 5. For every lag `j`, pull `a[j] <- T[center + lag[j]]`; converged once
//!    every update is within `sqrt(S[center] * epsilon)`.

use ndarray::{Array1, Array2, Array3};

use crate::array::{embed_1d, embed_2d, embed_3d, zero_before_1d, zero_before_2d, zero_before_3d};
use crate::error::{FilterError, Result};
use crate::kernels::Filter;

/// Padding multiplier applied to `max_k - min_k` when sizing the workspace
/// buffers. Generous padding minimizes truncation of the infinite-support
/// tail of `1/A'`.
const PAD_MULTIPLIER: usize = 100;

fn validate_params(maxiter: usize, epsilon: f32) -> Result<()> {
    if maxiter < 1 {
        return Err(FilterError::InvalidArgument("maxiter must be >= 1".into()));
    }
    if !(epsilon > 0.0) {
        return Err(FilterError::InvalidArgument("epsilon must be > 0".into()));
    }
    Ok(())
}

fn check_odd(len: usize, axis: &str) -> Result<()> {
    if len == 0 || len % 2 == 0 {
        return Err(FilterError::InvalidArgument(format!(
            "autocorrelation extent along {axis} must be odd, got {len}"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------- 1-D ----

/// Reusable scratch buffers for repeated 1-D factorizations, so callers
/// doing many factorizations back to back don't pay for a fresh allocation
/// every time.
#[derive(Debug, Default)]
pub struct Workspace1d {
    s: Array1<f32>,
    t: Array1<f32>,
    u: Array1<f32>,
    n1: usize,
}

impl Workspace1d {
    pub fn new() -> Self {
        Self { s: Array1::zeros(0), t: Array1::zeros(0), u: Array1::zeros(0), n1: 0 }
    }

    fn ensure(&mut self, n1: usize) {
        if self.n1 != n1 {
            self.s = Array1::zeros(n1);
            self.t = Array1::zeros(n1);
            self.u = Array1::zeros(n1);
            self.n1 = n1;
        } else {
            self.s.fill(0.0);
            self.t.fill(0.0);
            self.u.fill(0.0);
        }
    }
}

/// Factors `r` into `filter`'s coefficients, allocating its own workspace.
pub fn factor_wilson_burg_1d(
    filter: &mut Filter,
    r: &Array1<f32>,
    maxiter: usize,
    epsilon: f32,
) -> Result<()> {
    let mut ws = Workspace1d::new();
    factor_wilson_burg_1d_with(filter, r, maxiter, epsilon, &mut ws)
}

/// Same as [`factor_wilson_burg_1d`], reusing a caller-provided workspace
/// across repeated calls instead of allocating fresh buffers each time.
pub fn factor_wilson_burg_1d_with(
    filter: &mut Filter,
    r: &Array1<f32>,
    maxiter: usize,
    epsilon: f32,
    ws: &mut Workspace1d,
) -> Result<()> {
    validate_params(maxiter, epsilon)?;
    let len1 = r.len();
    check_odd(len1, "1")?;

    let (min1, max1) = (filter.lags().min1(), filter.lags().max1());
    let span1 = (max1 - min1) as usize;
    let n1 = len1 + PAD_MULTIPLIER * span1;
    ws.ensure(n1);

    let center_r1 = (len1 - 1) / 2;
    // k1 is pinned `max_k` cells from the right edge so the filter's own
    // reach fits, but must also leave room for R's own half-width when R
    // is wider than `2*max1+1` (otherwise the embed below runs off the
    // right edge of the workspace).
    let k1 = n1 - 1 - max1.max(center_r1 as i32) as usize;
    let offset1 = k1 - center_r1;
    embed_1d(r, &mut ws.s, offset1);

    {
        let coeffs = filter.lags_mut().a_mut();
        coeffs.fill(0.0);
        coeffs[0] = ws.s[k1].sqrt();
    }
    filter.lags_mut().refresh_a0();

    let eemax = ws.s[k1] * epsilon;

    for _ in 0..maxiter {
        filter.apply_inverse_transpose_1d(&ws.s, &mut ws.t);
        filter.apply_inverse_1d(&ws.t, &mut ws.u);
        ws.u[k1] += 1.0;
        ws.u[k1] *= 0.5;
        zero_before_1d(&mut ws.u, k1);
        filter.apply_1d(&ws.u, &mut ws.t);

        let lag1 = filter.lags().lag1().to_vec();
        let mut new_a = filter.lags().a().to_vec();
        let mut converged = true;
        for j in 0..lag1.len() {
            let idx = (k1 as i64 + lag1[j] as i64) as usize;
            let aj = ws.t[idx];
            let e = new_a[j] - aj;
            if e * e > eemax {
                converged = false;
            }
            new_a[j] = aj;
        }
        filter.lags_mut().a_mut().copy_from_slice(&new_a);
        filter.lags_mut().refresh_a0();

        if converged {
            return Ok(());
        }
    }
    Err(FilterError::Convergence { iterations: maxiter })
}

// ---------------------------------------------------------------- 2-D ----

#[derive(Debug, Default)]
pub struct Workspace2d {
    s: Array2<f32>,
    t: Array2<f32>,
    u: Array2<f32>,
    shape: (usize, usize),
}

impl Workspace2d {
    pub fn new() -> Self {
        Self { s: Array2::zeros((0, 0)), t: Array2::zeros((0, 0)), u: Array2::zeros((0, 0)), shape: (0, 0) }
    }

    fn ensure(&mut self, shape: (usize, usize)) {
        if self.shape != shape {
            self.s = Array2::zeros(shape);
            self.t = Array2::zeros(shape);
            self.u = Array2::zeros(shape);
            self.shape = shape;
        } else {
            self.s.fill(0.0);
            self.t.fill(0.0);
            self.u.fill(0.0);
        }
    }
}

pub fn factor_wilson_burg_2d(
    filter: &mut Filter,
    r: &Array2<f32>,
    maxiter: usize,
    epsilon: f32,
) -> Result<()> {
    let mut ws = Workspace2d::new();
    factor_wilson_burg_2d_with(filter, r, maxiter, epsilon, &mut ws)
}

pub fn factor_wilson_burg_2d_with(
    filter: &mut Filter,
    r: &Array2<f32>,
    maxiter: usize,
    epsilon: f32,
    ws: &mut Workspace2d,
) -> Result<()> {
    validate_params(maxiter, epsilon)?;
    let (len2, len1) = r.dim();
    check_odd(len1, "1")?;
    check_odd(len2, "2")?;

    let lags = filter.lags();
    let span1 = (lags.max1() - lags.min1()) as usize;
    let span2 = (lags.max2() - lags.min2()) as usize;
    let n1 = len1 + PAD_MULTIPLIER * span1;
    let n2 = len2 + PAD_MULTIPLIER * span2;
    ws.ensure((n2, n1));

    let center_r1 = (len1 - 1) / 2;
    let center_r2 = (len2 - 1) / 2;
    // See the 1-D case: the right margin must cover whichever is larger,
    // the filter's own reach or R's half-width, or the embed below runs
    // off the edge of the workspace.
    let k1 = n1 - 1 - filter.lags().max1().max(center_r1 as i32) as usize;
    let k2 = n2 - 1 - filter.lags().max2().max(center_r2 as i32) as usize;
    embed_2d(r, &mut ws.s, k1 - center_r1, k2 - center_r2);

    {
        let coeffs = filter.lags_mut().a_mut();
        coeffs.fill(0.0);
        coeffs[0] = ws.s[[k2, k1]].sqrt();
    }
    filter.lags_mut().refresh_a0();

    let eemax = ws.s[[k2, k1]] * epsilon;

    for _ in 0..maxiter {
        filter.apply_inverse_transpose_2d(&ws.s, &mut ws.t);
        filter.apply_inverse_2d(&ws.t, &mut ws.u);
        ws.u[[k2, k1]] += 1.0;
        ws.u[[k2, k1]] *= 0.5;
        zero_before_2d(&mut ws.u, k1, k2);
        filter.apply_2d(&ws.u, &mut ws.t);

        let lag1 = filter.lags().lag1().to_vec();
        let lag2 = filter.lags().lag2().to_vec();
        let mut new_a = filter.lags().a().to_vec();
        let mut converged = true;
        for j in 0..lag1.len() {
            let idx1 = (k1 as i64 + lag1[j] as i64) as usize;
            let idx2 = (k2 as i64 + lag2[j] as i64) as usize;
            let aj = ws.t[[idx2, idx1]];
            let e = new_a[j] - aj;
            if e * e > eemax {
                converged = false;
            }
            new_a[j] = aj;
        }
        filter.lags_mut().a_mut().copy_from_slice(&new_a);
        filter.lags_mut().refresh_a0();

        if converged {
            return Ok(());
        }
    }
    Err(FilterError::Convergence { iterations: maxiter })
}

// ---------------------------------------------------------------- 3-D ----

#[derive(Debug, Default)]
pub struct Workspace3d {
    s: Array3<f32>,
    t: Array3<f32>,
    u: Array3<f32>,
    shape: (usize, usize, usize),
}

impl Workspace3d {
    pub fn new() -> Self {
        Self {
            s: Array3::zeros((0, 0, 0)),
            t: Array3::zeros((0, 0, 0)),
            u: Array3::zeros((0, 0, 0)),
            shape: (0, 0, 0),
        }
    }

    fn ensure(&mut self, shape: (usize, usize, usize)) {
        if self.shape != shape {
            self.s = Array3::zeros(shape);
            self.t = Array3::zeros(shape);
            self.u = Array3::zeros(shape);
            self.shape = shape;
        } else {
            self.s.fill(0.0);
            self.t.fill(0.0);
            self.u.fill(0.0);
        }
    }
}

pub fn factor_wilson_burg_3d(
    filter: &mut Filter,
    r: &Array3<f32>,
    maxiter: usize,
    epsilon: f32,
) -> Result<()> {
    let mut ws = Workspace3d::new();
    factor_wilson_burg_3d_with(filter, r, maxiter, epsilon, &mut ws)
}

pub fn factor_wilson_burg_3d_with(
    filter: &mut Filter,
    r: &Array3<f32>,
    maxiter: usize,
    epsilon: f32,
    ws: &mut Workspace3d,
) -> Result<()> {
    validate_params(maxiter, epsilon)?;
    let (len3, len2, len1) = r.dim();
    check_odd(len1, "1")?;
    check_odd(len2, "2")?;
    check_odd(len3, "3")?;

    let lags = filter.lags();
    let span1 = (lags.max1() - lags.min1()) as usize;
    let span2 = (lags.max2() - lags.min2()) as usize;
    let span3 = (lags.max3() - lags.min3()) as usize;
    let n1 = len1 + PAD_MULTIPLIER * span1;
    let n2 = len2 + PAD_MULTIPLIER * span2;
    let n3 = len3 + PAD_MULTIPLIER * span3;
    ws.ensure((n3, n2, n1));

    let center_r1 = (len1 - 1) / 2;
    let center_r2 = (len2 - 1) / 2;
    let center_r3 = (len3 - 1) / 2;
    // See the 1-D case: the right margin must cover whichever is larger,
    // the filter's own reach or R's half-width, or the embed below runs
    // off the edge of the workspace.
    let k1 = n1 - 1 - filter.lags().max1().max(center_r1 as i32) as usize;
    let k2 = n2 - 1 - filter.lags().max2().max(center_r2 as i32) as usize;
    let k3 = n3 - 1 - filter.lags().max3().max(center_r3 as i32) as usize;
    embed_3d(r, &mut ws.s, k1 - center_r1, k2 - center_r2, k3 - center_r3);

    {
        let coeffs = filter.lags_mut().a_mut();
        coeffs.fill(0.0);
        coeffs[0] = ws.s[[k3, k2, k1]].sqrt();
    }
    filter.lags_mut().refresh_a0();

    let eemax = ws.s[[k3, k2, k1]] * epsilon;

    for _ in 0..maxiter {
        filter.apply_inverse_transpose_3d(&ws.s, &mut ws.t);
        filter.apply_inverse_3d(&ws.t, &mut ws.u);
        ws.u[[k3, k2, k1]] += 1.0;
        ws.u[[k3, k2, k1]] *= 0.5;
        zero_before_3d(&mut ws.u, k1, k2, k3);
        filter.apply_3d(&ws.u, &mut ws.t);

        let lag1 = filter.lags().lag1().to_vec();
        let lag2 = filter.lags().lag2().to_vec();
        let lag3 = filter.lags().lag3().to_vec();
        let mut new_a = filter.lags().a().to_vec();
        let mut converged = true;
        for j in 0..lag1.len() {
            let idx1 = (k1 as i64 + lag1[j] as i64) as usize;
            let idx2 = (k2 as i64 + lag2[j] as i64) as usize;
            let idx3 = (k3 as i64 + lag3[j] as i64) as usize;
            let aj = ws.t[[idx3, idx2, idx1]];
            let e = new_a[j] - aj;
            if e * e > eemax {
                converged = false;
            }
            new_a[j] = aj;
        }
        filter.lags_mut().a_mut().copy_from_slice(&new_a);
        filter.lags_mut().refresh_a0();

        if converged {
            return Ok(());
        }
    }
    Err(FilterError::Convergence { iterations: maxiter })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lag::LagSet;

    /// Builds the symmetric, odd-length autocorrelation of a known
    /// filter, used by scenarios S5/S6.
    fn autocorrelation_of(taps: &[f32], padded_len: usize) -> Array1<f32> {
        let half = padded_len / 2;
        let mut r = Array1::<f32>::zeros(padded_len);
        for lag in 0..=half {
            let mut acc = 0.0f32;
            for i in 0..taps.len() {
                if i + lag < taps.len() {
                    acc += taps[i] * taps[i + lag];
                }
            }
            r[half + lag] = acc;
            r[half - lag] = acc;
        }
        r
    }

    #[test]
    fn wilson_burg_converges_to_known_filter() {
        let lags = LagSet::new_1d_impulse(vec![0, 1, 2, 3, 4]).unwrap();
        let mut filter = Filter::new(lags);
        let r = autocorrelation_of(&[1.0, -0.9, 0.2], 11);

        factor_wilson_burg_1d(&mut filter, &r, 100, 1e-6).expect("should converge");

        let a = filter.lags().a();
        assert!((a[0] - 1.0).abs() < 1e-3);
        assert!((a[1] - (-0.9)).abs() < 1e-3);
        assert!((a[2] - 0.2).abs() < 1e-3);
        for &coeff in &a[3..] {
            assert!(coeff.abs() < 1e-3);
        }
    }

    #[test]
    fn wilson_burg_reports_error_when_maxiter_exhausted() {
        let lags = LagSet::new_1d_impulse(vec![0, 1, 2, 3, 4]).unwrap();
        let mut filter = Filter::new(lags);
        let r = autocorrelation_of(&[1.0, -0.9, 0.2], 11);

        let err = factor_wilson_burg_1d(&mut filter, &r, 1, 1e-6).unwrap_err();
        assert_eq!(err, FilterError::Convergence { iterations: 1 });
    }

    #[test]
    fn rejects_even_length_autocorrelation() {
        let lags = LagSet::new_1d_impulse(vec![0, 1]).unwrap();
        let mut filter = Filter::new(lags);
        let r = Array1::<f32>::zeros(10);
        assert!(factor_wilson_burg_1d(&mut filter, &r, 10, 1e-6).is_err());
    }

    #[test]
    fn rejects_bad_maxiter_and_epsilon() {
        let lags = LagSet::new_1d_impulse(vec![0, 1]).unwrap();
        let mut filter = Filter::new(lags);
        let r = autocorrelation_of(&[1.0, -0.5], 9);
        assert!(factor_wilson_burg_1d(&mut filter, &r, 0, 1e-6).is_err());
        assert!(factor_wilson_burg_1d(&mut filter, &r, 10, 0.0).is_err());
    }

    #[test]
    fn fixed_point_reapplies_to_autocorrelation() {
        let lags = LagSet::new_1d_impulse(vec![0, 1, 2]).unwrap();
        let mut filter = Filter::new(lags);
        let r = autocorrelation_of(&[1.0, -0.6, 0.1], 9);
        factor_wilson_burg_1d(&mut filter, &r, 200, 1e-8).expect("should converge");

        // apply(apply_transpose(delta)) should reproduce R near the center.
        let n = 9;
        let mut delta = Array1::<f32>::zeros(n);
        let center = n / 2;
        delta[center] = 1.0;
        let mut tmp = Array1::<f32>::zeros(n);
        filter.apply_transpose_1d(&delta, &mut tmp);
        let mut out = Array1::<f32>::zeros(n);
        filter.apply_1d(&tmp, &mut out);

        for k in (center - 2)..=(center + 2) {
            assert!((out[k] - r[k]).abs() < 5e-2, "k={k}: {} vs {}", out[k], r[k]);
        }
    }

    #[test]
    fn workspace_can_be_reused_across_calls() {
        let mut ws = Workspace1d::new();
        let lags = LagSet::new_1d_impulse(vec![0, 1, 2]).unwrap();
        let mut filter = Filter::new(lags);
        let r = autocorrelation_of(&[1.0, -0.3, 0.05], 9);

        factor_wilson_burg_1d_with(&mut filter, &r, 100, 1e-6, &mut ws).unwrap();
        let first_a0 = filter.lags().a0();

        // Refactoring the same R again from a fresh filter should reproduce
        // the same fixed point, proving the reused workspace is fully
        // zeroed each call.
        let lags2 = LagSet::new_1d_impulse(vec![0, 1, 2]).unwrap();
        let mut filter2 = Filter::new(lags2);
        factor_wilson_burg_1d_with(&mut filter2, &r, 100, 1e-6, &mut ws).unwrap();
        assert!((filter2.lags().a0() - first_a0).abs() < 1e-5);
    }
}
