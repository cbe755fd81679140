//! The four 1-D kernels: `apply`, `apply_transpose`, `apply_inverse`,
//! `apply_inverse_transpose`. Only `lag1`/`a` are consulted; `lag2`/`lag3`
//! are ignored regardless of the `LagSet`'s native rank.

use ndarray::Array1;

use crate::kernels::common::{checked_add, checked_sub, interior_hi_add, interior_hi_sub, interior_lo_add, interior_lo_sub};
use crate::lag::LagSet;

pub fn apply(lags: &LagSet, x: &Array1<f32>, y: &mut Array1<f32>) {
    let n1 = x.len();
    let lag1 = lags.lag1();
    let a = lags.a();
    let a0 = lags.a0();
    let i1lo = interior_lo_sub(lags.max1());
    let i1hi = interior_hi_sub(n1, lags.min1());

    for i1 in 0..n1 {
        let mut acc = a0 * x[i1];
        if i1 >= i1lo && i1 < i1hi {
            for j in 1..lag1.len() {
                acc += a[j] * x[(i1 as i32 - lag1[j]) as usize];
            }
        } else {
            for j in 1..lag1.len() {
                if let Some(s1) = checked_sub(i1, lag1[j], n1) {
                    acc += a[j] * x[s1];
                }
            }
        }
        y[i1] = acc;
    }
}

pub fn apply_transpose(lags: &LagSet, x: &Array1<f32>, y: &mut Array1<f32>) {
    let n1 = x.len();
    let lag1 = lags.lag1();
    let a = lags.a();
    let a0 = lags.a0();
    let i1lo = interior_lo_add(lags.min1());
    let i1hi = interior_hi_add(n1, lags.max1());

    for i1 in (0..n1).rev() {
        let mut acc = a0 * x[i1];
        if i1 >= i1lo && i1 < i1hi {
            for j in 1..lag1.len() {
                acc += a[j] * x[(i1 as i32 + lag1[j]) as usize];
            }
        } else {
            for j in 1..lag1.len() {
                if let Some(s1) = checked_add(i1, lag1[j], n1) {
                    acc += a[j] * x[s1];
                }
            }
        }
        y[i1] = acc;
    }
}

pub fn apply_inverse_in_place(lags: &LagSet, y: &mut Array1<f32>) {
    let n1 = y.len();
    let lag1 = lags.lag1();
    let a = lags.a();
    let a0_inv = lags.a0_inv();
    let i1lo = interior_lo_sub(lags.max1());
    let i1hi = interior_hi_sub(n1, lags.min1());

    for i1 in 0..n1 {
        let mut acc = y[i1];
        if i1 >= i1lo && i1 < i1hi {
            for j in 1..lag1.len() {
                acc -= a[j] * y[(i1 as i32 - lag1[j]) as usize];
            }
        } else {
            for j in 1..lag1.len() {
                if let Some(s1) = checked_sub(i1, lag1[j], n1) {
                    acc -= a[j] * y[s1];
                }
            }
        }
        y[i1] = acc * a0_inv;
    }
}

pub fn apply_inverse(lags: &LagSet, x: &Array1<f32>, y: &mut Array1<f32>) {
    y.assign(x);
    apply_inverse_in_place(lags, y);
}

pub fn apply_inverse_transpose_in_place(lags: &LagSet, y: &mut Array1<f32>) {
    let n1 = y.len();
    let lag1 = lags.lag1();
    let a = lags.a();
    let a0_inv = lags.a0_inv();
    let i1lo = interior_lo_add(lags.min1());
    let i1hi = interior_hi_add(n1, lags.max1());

    for i1 in (0..n1).rev() {
        let mut acc = y[i1];
        if i1 >= i1lo && i1 < i1hi {
            for j in 1..lag1.len() {
                acc -= a[j] * y[(i1 as i32 + lag1[j]) as usize];
            }
        } else {
            for j in 1..lag1.len() {
                if let Some(s1) = checked_add(i1, lag1[j], n1) {
                    acc -= a[j] * y[s1];
                }
            }
        }
        y[i1] = acc * a0_inv;
    }
}

pub fn apply_inverse_transpose(lags: &LagSet, x: &Array1<f32>, y: &mut Array1<f32>) {
    y.assign(x);
    apply_inverse_transpose_in_place(lags, y);
}
