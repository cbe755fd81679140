//! `Filter`: the minimum-phase causal filter, and its twelve boundary-correct
//! application kernels (`{apply, apply_transpose, apply_inverse,
//! apply_inverse_transpose} x {1D, 2D, 3D}`).
//!
//! Each kernel partitions its output into an interior region, where the
//! inner loop over lags runs with no bounds check, and an edge region that
//! falls back to a guarded loop. See `kernels::common` for the bound
//! arithmetic. Arrays are indexed with the slowest axis first and `i1` the
//! fastest-varying axis: `[i1]`, `[i2, i1]`, `[i3, i2, i1]`.

pub(crate) mod common;
pub mod rank1;
pub mod rank2;
pub mod rank3;

use ndarray::{Array1, Array2, Array3};

use crate::lag::LagSet;

/// A minimum-phase causal filter: a fixed helical lag geometry plus
/// mutable coefficients. Owns its lag arrays and coefficients; never
/// allocates inside the kernels themselves.
#[derive(Debug, Clone)]
pub struct Filter {
    lags: LagSet,
}

impl Filter {
    pub fn new(lags: LagSet) -> Self {
        Filter { lags }
    }

    pub fn lags(&self) -> &LagSet {
        &self.lags
    }

    pub(crate) fn lags_mut(&mut self) -> &mut LagSet {
        &mut self.lags
    }

    // ---- 1-D ----

    /// `y = a0*x + sum_{j>=1} a[j] * x[i - lag1[j]]` (zero out of range).
    pub fn apply_1d(&self, x: &Array1<f32>, y: &mut Array1<f32>) {
        rank1::apply(&self.lags, x, y)
    }

    /// The exact transpose of [`Filter::apply_1d`].
    pub fn apply_transpose_1d(&self, x: &Array1<f32>, y: &mut Array1<f32>) {
        rank1::apply_transpose(&self.lags, x, y)
    }

    /// The causal stable inverse of [`Filter::apply_1d`]. `y` may alias `x`.
    pub fn apply_inverse_1d(&self, x: &Array1<f32>, y: &mut Array1<f32>) {
        rank1::apply_inverse(&self.lags, x, y)
    }

    /// Same as [`Filter::apply_inverse_1d`], operating on `y` in place.
    pub fn apply_inverse_1d_in_place(&self, y: &mut Array1<f32>) {
        rank1::apply_inverse_in_place(&self.lags, y)
    }

    /// The exact transpose of [`Filter::apply_inverse_1d`]. `y` may alias `x`.
    pub fn apply_inverse_transpose_1d(&self, x: &Array1<f32>, y: &mut Array1<f32>) {
        rank1::apply_inverse_transpose(&self.lags, x, y)
    }

    /// Same as [`Filter::apply_inverse_transpose_1d`], in place.
    pub fn apply_inverse_transpose_1d_in_place(&self, y: &mut Array1<f32>) {
        rank1::apply_inverse_transpose_in_place(&self.lags, y)
    }

    // ---- 2-D ----

    pub fn apply_2d(&self, x: &Array2<f32>, y: &mut Array2<f32>) {
        rank2::apply(&self.lags, x, y)
    }

    pub fn apply_transpose_2d(&self, x: &Array2<f32>, y: &mut Array2<f32>) {
        rank2::apply_transpose(&self.lags, x, y)
    }

    pub fn apply_inverse_2d(&self, x: &Array2<f32>, y: &mut Array2<f32>) {
        rank2::apply_inverse(&self.lags, x, y)
    }

    pub fn apply_inverse_2d_in_place(&self, y: &mut Array2<f32>) {
        rank2::apply_inverse_in_place(&self.lags, y)
    }

    pub fn apply_inverse_transpose_2d(&self, x: &Array2<f32>, y: &mut Array2<f32>) {
        rank2::apply_inverse_transpose(&self.lags, x, y)
    }

    pub fn apply_inverse_transpose_2d_in_place(&self, y: &mut Array2<f32>) {
        rank2::apply_inverse_transpose_in_place(&self.lags, y)
    }

    // ---- 3-D ----

    pub fn apply_3d(&self, x: &Array3<f32>, y: &mut Array3<f32>) {
        rank3::apply(&self.lags, x, y)
    }

    pub fn apply_transpose_3d(&self, x: &Array3<f32>, y: &mut Array3<f32>) {
        rank3::apply_transpose(&self.lags, x, y)
    }

    pub fn apply_inverse_3d(&self, x: &Array3<f32>, y: &mut Array3<f32>) {
        rank3::apply_inverse(&self.lags, x, y)
    }

    pub fn apply_inverse_3d_in_place(&self, y: &mut Array3<f32>) {
        rank3::apply_inverse_in_place(&self.lags, y)
    }

    pub fn apply_inverse_transpose_3d(&self, x: &Array3<f32>, y: &mut Array3<f32>) {
        rank3::apply_inverse_transpose(&self.lags, x, y)
    }

    pub fn apply_inverse_transpose_3d_in_place(&self, y: &mut Array3<f32>) {
        rank3::apply_inverse_transpose_in_place(&self.lags, y)
    }
}
