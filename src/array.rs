//! Contiguous buffer primitives shared by `kernels` and `wilson_burg`.
//!
//! The filter kernels themselves work directly against `ndarray`'s
//! `Array1`/`Array2`/`Array3<f32>`, which already provide allocation,
//! zero-fill, and element access. What is left for this module is the
//! handful of primitives `ndarray` has no single call for: copying one
//! buffer into a larger, zero-padded one at an arbitrary origin, and
//! zeroing the "anti-causal" half of a buffer relative to a helix center.

use ndarray::{Array1, Array2, Array3};

/// Copies `src` into `dst` such that `src[0]` lands at `dst[offset]`.
/// `dst` must already be large enough; cells outside the copied range are
/// left untouched (callers are expected to have zero-initialized `dst`).
pub fn embed_1d(src: &Array1<f32>, dst: &mut Array1<f32>, offset: usize) {
    let n = src.len();
    dst.slice_mut(ndarray::s![offset..offset + n]).assign(src);
}

/// Copies `src` into `dst` such that `src[(0, 0)]` lands at
/// `dst[(offset2, offset1)]`.
pub fn embed_2d(src: &Array2<f32>, dst: &mut Array2<f32>, offset1: usize, offset2: usize) {
    let (n2, n1) = src.dim();
    dst.slice_mut(ndarray::s![offset2..offset2 + n2, offset1..offset1 + n1])
        .assign(src);
}

/// Copies `src` into `dst` such that `src[(0, 0, 0)]` lands at
/// `dst[(offset3, offset2, offset1)]`.
pub fn embed_3d(
    src: &Array3<f32>,
    dst: &mut Array3<f32>,
    offset1: usize,
    offset2: usize,
    offset3: usize,
) {
    let (n3, n2, n1) = src.dim();
    dst.slice_mut(ndarray::s![
        offset3..offset3 + n3,
        offset2..offset2 + n2,
        offset1..offset1 + n1
    ])
    .assign(src);
}

/// Zeros every cell strictly before `center` (exclusive), keeping
/// `arr[center]` and everything after it untouched. This is the 1-D case
/// of the Wilson-Burg "zero the anti-causal half" step.
pub fn zero_before_1d(arr: &mut Array1<f32>, center: usize) {
    arr.slice_mut(ndarray::s![..center]).fill(0.0);
}

/// Zeros every cell lexicographically earlier than `(center2, center1)`
/// under the helix order (`i2` slowest, `i1` fastest): full rows
/// `i2 < center2`, then within row `i2 == center2` the cells `i1 <
/// center1`.
pub fn zero_before_2d(arr: &mut Array2<f32>, center1: usize, center2: usize) {
    if center2 > 0 {
        arr.slice_mut(ndarray::s![..center2, ..]).fill(0.0);
    }
    arr.slice_mut(ndarray::s![center2, ..center1]).fill(0.0);
}

/// Zeros every cell lexicographically earlier than
/// `(center3, center2, center1)` under the helix order (`i3` slowest,
/// `i1` fastest).
pub fn zero_before_3d(arr: &mut Array3<f32>, center1: usize, center2: usize, center3: usize) {
    if center3 > 0 {
        arr.slice_mut(ndarray::s![..center3, .., ..]).fill(0.0);
    }
    if center2 > 0 {
        arr.slice_mut(ndarray::s![center3, ..center2, ..]).fill(0.0);
    }
    arr.slice_mut(ndarray::s![center3, center2, ..center1]).fill(0.0);
}
