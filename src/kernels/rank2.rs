//! The four 2-D kernels. Arrays are indexed `[i2, i1]` with `i1` the
//! fastest-varying axis. Only `lag1`/`lag2`/`a` are consulted; `lag3` is
//! ignored regardless of the `LagSet`'s native rank.

use ndarray::Array2;

use crate::kernels::common::{checked_add, checked_sub, interior_hi_add, interior_hi_sub, interior_lo_add, interior_lo_sub};
use crate::lag::LagSet;

pub fn apply(lags: &LagSet, x: &Array2<f32>, y: &mut Array2<f32>) {
    let (n2, n1) = x.dim();
    let lag1 = lags.lag1();
    let lag2 = lags.lag2();
    let a = lags.a();
    let a0 = lags.a0();
    let m = lag1.len();

    let i1lo = interior_lo_sub(lags.max1());
    let i1hi = interior_hi_sub(n1, lags.min1());
    let i2lo = interior_lo_sub(lags.max2());
    let i2hi = interior_hi_sub(n2, lags.min2());

    for i2 in 0..n2 {
        let row_interior = i2 >= i2lo && i2 < i2hi;
        for i1 in 0..n1 {
            let mut acc = a0 * x[[i2, i1]];
            if row_interior && i1 >= i1lo && i1 < i1hi {
                for j in 1..m {
                    let s1 = (i1 as i32 - lag1[j]) as usize;
                    let s2 = (i2 as i32 - lag2[j]) as usize;
                    acc += a[j] * x[[s2, s1]];
                }
            } else {
                for j in 1..m {
                    if let (Some(s1), Some(s2)) = (
                        checked_sub(i1, lag1[j], n1),
                        checked_sub(i2, lag2[j], n2),
                    ) {
                        acc += a[j] * x[[s2, s1]];
                    }
                }
            }
            y[[i2, i1]] = acc;
        }
    }
}

pub fn apply_transpose(lags: &LagSet, x: &Array2<f32>, y: &mut Array2<f32>) {
    let (n2, n1) = x.dim();
    let lag1 = lags.lag1();
    let lag2 = lags.lag2();
    let a = lags.a();
    let a0 = lags.a0();
    let m = lag1.len();

    let i1lo = interior_lo_add(lags.min1());
    let i1hi = interior_hi_add(n1, lags.max1());
    let i2lo = interior_lo_add(lags.min2());
    let i2hi = interior_hi_add(n2, lags.max2());

    for i2 in (0..n2).rev() {
        let row_interior = i2 >= i2lo && i2 < i2hi;
        for i1 in (0..n1).rev() {
            let mut acc = a0 * x[[i2, i1]];
            if row_interior && i1 >= i1lo && i1 < i1hi {
                for j in 1..m {
                    let s1 = (i1 as i32 + lag1[j]) as usize;
                    let s2 = (i2 as i32 + lag2[j]) as usize;
                    acc += a[j] * x[[s2, s1]];
                }
            } else {
                for j in 1..m {
                    if let (Some(s1), Some(s2)) = (
                        checked_add(i1, lag1[j], n1),
                        checked_add(i2, lag2[j], n2),
                    ) {
                        acc += a[j] * x[[s2, s1]];
                    }
                }
            }
            y[[i2, i1]] = acc;
        }
    }
}

pub fn apply_inverse_in_place(lags: &LagSet, y: &mut Array2<f32>) {
    let (n2, n1) = y.dim();
    let lag1 = lags.lag1();
    let lag2 = lags.lag2();
    let a = lags.a();
    let a0_inv = lags.a0_inv();
    let m = lag1.len();

    let i1lo = interior_lo_sub(lags.max1());
    let i1hi = interior_hi_sub(n1, lags.min1());
    let i2lo = interior_lo_sub(lags.max2());
    let i2hi = interior_hi_sub(n2, lags.min2());

    for i2 in 0..n2 {
        let row_interior = i2 >= i2lo && i2 < i2hi;
        for i1 in 0..n1 {
            let mut acc = y[[i2, i1]];
            if row_interior && i1 >= i1lo && i1 < i1hi {
                for j in 1..m {
                    let s1 = (i1 as i32 - lag1[j]) as usize;
                    let s2 = (i2 as i32 - lag2[j]) as usize;
                    acc -= a[j] * y[[s2, s1]];
                }
            } else {
                for j in 1..m {
                    if let (Some(s1), Some(s2)) = (
                        checked_sub(i1, lag1[j], n1),
                        checked_sub(i2, lag2[j], n2),
                    ) {
                        acc -= a[j] * y[[s2, s1]];
                    }
                }
            }
            y[[i2, i1]] = acc * a0_inv;
        }
    }
}

pub fn apply_inverse(lags: &LagSet, x: &Array2<f32>, y: &mut Array2<f32>) {
    y.assign(x);
    apply_inverse_in_place(lags, y);
}

pub fn apply_inverse_transpose_in_place(lags: &LagSet, y: &mut Array2<f32>) {
    let (n2, n1) = y.dim();
    let lag1 = lags.lag1();
    let lag2 = lags.lag2();
    let a = lags.a();
    let a0_inv = lags.a0_inv();
    let m = lag1.len();

    let i1lo = interior_lo_add(lags.min1());
    let i1hi = interior_hi_add(n1, lags.max1());
    let i2lo = interior_lo_add(lags.min2());
    let i2hi = interior_hi_add(n2, lags.max2());

    for i2 in (0..n2).rev() {
        let row_interior = i2 >= i2lo && i2 < i2hi;
        for i1 in (0..n1).rev() {
            let mut acc = y[[i2, i1]];
            if row_interior && i1 >= i1lo && i1 < i1hi {
                for j in 1..m {
                    let s1 = (i1 as i32 + lag1[j]) as usize;
                    let s2 = (i2 as i32 + lag2[j]) as usize;
                    acc -= a[j] * y[[s2, s1]];
                }
            } else {
                for j in 1..m {
                    if let (Some(s1), Some(s2)) = (
                        checked_add(i1, lag1[j], n1),
                        checked_add(i2, lag2[j], n2),
                    ) {
                        acc -= a[j] * y[[s2, s1]];
                    }
                }
            }
            y[[i2, i1]] = acc * a0_inv;
        }
    }
}

pub fn apply_inverse_transpose(lags: &LagSet, x: &Array2<f32>, y: &mut Array2<f32>) {
    y.assign(x);
    apply_inverse_transpose_in_place(lags, y);
}
