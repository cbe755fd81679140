//! The four 3-D kernels. Arrays are indexed `[i3, i2, i1]` with `i1` the
//! fastest-varying axis; all of `lag1`/`lag2`/`lag3`/`a` are consulted.

use ndarray::Array3;

use crate::kernels::common::{checked_add, checked_sub, interior_hi_add, interior_hi_sub, interior_lo_add, interior_lo_sub};
use crate::lag::LagSet;

pub fn apply(lags: &LagSet, x: &Array3<f32>, y: &mut Array3<f32>) {
    let (n3, n2, n1) = x.dim();
    let lag1 = lags.lag1();
    let lag2 = lags.lag2();
    let lag3 = lags.lag3();
    let a = lags.a();
    let a0 = lags.a0();
    let m = lag1.len();

    let i1lo = interior_lo_sub(lags.max1());
    let i1hi = interior_hi_sub(n1, lags.min1());
    let i2lo = interior_lo_sub(lags.max2());
    let i2hi = interior_hi_sub(n2, lags.min2());
    let i3lo = interior_lo_sub(lags.max3());
    let i3hi = interior_hi_sub(n3, lags.min3());

    for i3 in 0..n3 {
        let slab_interior = i3 >= i3lo && i3 < i3hi;
        for i2 in 0..n2 {
            let row_interior = slab_interior && i2 >= i2lo && i2 < i2hi;
            for i1 in 0..n1 {
                let mut acc = a0 * x[[i3, i2, i1]];
                if row_interior && i1 >= i1lo && i1 < i1hi {
                    for j in 1..m {
                        let s1 = (i1 as i32 - lag1[j]) as usize;
                        let s2 = (i2 as i32 - lag2[j]) as usize;
                        let s3 = (i3 as i32 - lag3[j]) as usize;
                        acc += a[j] * x[[s3, s2, s1]];
                    }
                } else {
                    for j in 1..m {
                        if let (Some(s1), Some(s2), Some(s3)) = (
                            checked_sub(i1, lag1[j], n1),
                            checked_sub(i2, lag2[j], n2),
                            checked_sub(i3, lag3[j], n3),
                        ) {
                            acc += a[j] * x[[s3, s2, s1]];
                        }
                    }
                }
                y[[i3, i2, i1]] = acc;
            }
        }
    }
}

pub fn apply_transpose(lags: &LagSet, x: &Array3<f32>, y: &mut Array3<f32>) {
    let (n3, n2, n1) = x.dim();
    let lag1 = lags.lag1();
    let lag2 = lags.lag2();
    let lag3 = lags.lag3();
    let a = lags.a();
    let a0 = lags.a0();
    let m = lag1.len();

    let i1lo = interior_lo_add(lags.min1());
    let i1hi = interior_hi_add(n1, lags.max1());
    let i2lo = interior_lo_add(lags.min2());
    let i2hi = interior_hi_add(n2, lags.max2());
    let i3lo = interior_lo_add(lags.min3());
    let i3hi = interior_hi_add(n3, lags.max3());

    for i3 in (0..n3).rev() {
        let slab_interior = i3 >= i3lo && i3 < i3hi;
        for i2 in (0..n2).rev() {
            let row_interior = slab_interior && i2 >= i2lo && i2 < i2hi;
            for i1 in (0..n1).rev() {
                let mut acc = a0 * x[[i3, i2, i1]];
                if row_interior && i1 >= i1lo && i1 < i1hi {
                    for j in 1..m {
                        let s1 = (i1 as i32 + lag1[j]) as usize;
                        let s2 = (i2 as i32 + lag2[j]) as usize;
                        let s3 = (i3 as i32 + lag3[j]) as usize;
                        acc += a[j] * x[[s3, s2, s1]];
                    }
                } else {
                    for j in 1..m {
                        if let (Some(s1), Some(s2), Some(s3)) = (
                            checked_add(i1, lag1[j], n1),
                            checked_add(i2, lag2[j], n2),
                            checked_add(i3, lag3[j], n3),
                        ) {
                            acc += a[j] * x[[s3, s2, s1]];
                        }
                    }
                }
                y[[i3, i2, i1]] = acc;
            }
        }
    }
}

pub fn apply_inverse_in_place(lags: &LagSet, y: &mut Array3<f32>) {
    let (n3, n2, n1) = y.dim();
    let lag1 = lags.lag1();
    let lag2 = lags.lag2();
    let lag3 = lags.lag3();
    let a = lags.a();
    let a0_inv = lags.a0_inv();
    let m = lag1.len();

    let i1lo = interior_lo_sub(lags.max1());
    let i1hi = interior_hi_sub(n1, lags.min1());
    let i2lo = interior_lo_sub(lags.max2());
    let i2hi = interior_hi_sub(n2, lags.min2());
    let i3lo = interior_lo_sub(lags.max3());
    let i3hi = interior_hi_sub(n3, lags.min3());

    for i3 in 0..n3 {
        let slab_interior = i3 >= i3lo && i3 < i3hi;
        for i2 in 0..n2 {
            let row_interior = slab_interior && i2 >= i2lo && i2 < i2hi;
            for i1 in 0..n1 {
                let mut acc = y[[i3, i2, i1]];
                if row_interior && i1 >= i1lo && i1 < i1hi {
                    for j in 1..m {
                        let s1 = (i1 as i32 - lag1[j]) as usize;
                        let s2 = (i2 as i32 - lag2[j]) as usize;
                        let s3 = (i3 as i32 - lag3[j]) as usize;
                        acc -= a[j] * y[[s3, s2, s1]];
                    }
                } else {
                    for j in 1..m {
                        if let (Some(s1), Some(s2), Some(s3)) = (
                            checked_sub(i1, lag1[j], n1),
                            checked_sub(i2, lag2[j], n2),
                            checked_sub(i3, lag3[j], n3),
                        ) {
                            acc -= a[j] * y[[s3, s2, s1]];
                        }
                    }
                }
                y[[i3, i2, i1]] = acc * a0_inv;
            }
        }
    }
}

pub fn apply_inverse(lags: &LagSet, x: &Array3<f32>, y: &mut Array3<f32>) {
    y.assign(x);
    apply_inverse_in_place(lags, y);
}

pub fn apply_inverse_transpose_in_place(lags: &LagSet, y: &mut Array3<f32>) {
    let (n3, n2, n1) = y.dim();
    let lag1 = lags.lag1();
    let lag2 = lags.lag2();
    let lag3 = lags.lag3();
    let a = lags.a();
    let a0_inv = lags.a0_inv();
    let m = lag1.len();

    let i1lo = interior_lo_add(lags.min1());
    let i1hi = interior_hi_add(n1, lags.max1());
    let i2lo = interior_lo_add(lags.min2());
    let i2hi = interior_hi_add(n2, lags.max2());
    let i3lo = interior_lo_add(lags.min3());
    let i3hi = interior_hi_add(n3, lags.max3());

    for i3 in (0..n3).rev() {
        let slab_interior = i3 >= i3lo && i3 < i3hi;
        for i2 in (0..n2).rev() {
            let row_interior = slab_interior && i2 >= i2lo && i2 < i2hi;
            for i1 in (0..n1).rev() {
                let mut acc = y[[i3, i2, i1]];
                if row_interior && i1 >= i1lo && i1 < i1hi {
                    for j in 1..m {
                        let s1 = (i1 as i32 + lag1[j]) as usize;
                        let s2 = (i2 as i32 + lag2[j]) as usize;
                        let s3 = (i3 as i32 + lag3[j]) as usize;
                        acc -= a[j] * y[[s3, s2, s1]];
                    }
                } else {
                    for j in 1..m {
                        if let (Some(s1), Some(s2), Some(s3)) = (
                            checked_add(i1, lag1[j], n1),
                            checked_add(i2, lag2[j], n2),
                            checked_add(i3, lag3[j], n3),
                        ) {
                            acc -= a[j] * y[[s3, s2, s1]];
                        }
                    }
                }
                y[[i3, i2, i1]] = acc * a0_inv;
            }
        }
    }
}

pub fn apply_inverse_transpose(lags: &LagSet, x: &Array3<f32>, y: &mut Array3<f32>) {
    y.assign(x);
    apply_inverse_transpose_in_place(lags, y);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn helix_filter_3d() -> LagSet {
        LagSet::new_3d(
            vec![0, 1, 0, 1],
            vec![0, 0, 1, 0],
            vec![0, 0, 0, 1],
            vec![1.0, 0.5, 0.3, 0.2],
        )
        .unwrap()
    }

    #[test]
    fn impulse_identity_3d() {
        let lags = LagSet::new_3d(vec![0], vec![0], vec![0], vec![1.0]).unwrap();
        let x = Array3::from_shape_fn((3, 4, 5), |(k, r, c)| (k * 20 + r * 5 + c) as f32);
        let mut y = Array3::<f32>::zeros((3, 4, 5));
        apply(&lags, &x, &mut y);
        assert_eq!(y, x);
        apply_inverse(&lags, &x, &mut y);
        assert_eq!(y, x);
    }

    #[test]
    fn forward_apply_places_impulse_response() {
        let lags = helix_filter_3d();
        let mut x = Array3::<f32>::zeros((6, 6, 6));
        x[[3, 3, 3]] = 1.0;
        let mut y = Array3::<f32>::zeros((6, 6, 6));
        apply(&lags, &x, &mut y);

        let lag1 = lags.lag1();
        let lag2 = lags.lag2();
        let lag3 = lags.lag3();
        let a = lags.a();
        for j in 0..lag1.len() {
            let i1 = (3 + lag1[j]) as usize;
            let i2 = (3 + lag2[j]) as usize;
            let i3 = (3 + lag3[j]) as usize;
            assert!((y[[i3, i2, i1]] - a[j]).abs() < 1e-6);
        }
    }

    #[test]
    fn transpose_duality_3d() {
        let lags = helix_filter_3d();
        let mut seed: u32 = 0xabcd_1234;
        let mut next = || {
            seed ^= seed << 13;
            seed ^= seed >> 17;
            seed ^= seed << 5;
            (seed as f32 / u32::MAX as f32) * 2.0 - 1.0
        };
        let x = Array3::from_shape_fn((6, 6, 6), |_| next());
        let z = Array3::from_shape_fn((6, 6, 6), |_| next());

        let mut ax = Array3::<f32>::zeros((6, 6, 6));
        apply(&lags, &x, &mut ax);
        let mut atz = Array3::<f32>::zeros((6, 6, 6));
        apply_transpose(&lags, &z, &mut atz);

        let lhs: f32 = ax.iter().zip(z.iter()).map(|(a, b)| a * b).sum();
        let rhs: f32 = x.iter().zip(atz.iter()).map(|(a, b)| a * b).sum();
        assert!((lhs - rhs).abs() <= 1e-4 * lhs.abs().max(rhs.abs()).max(1.0));
    }
}
