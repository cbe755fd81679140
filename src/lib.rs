//! Multidimensional minimum-phase causal filters with Wilson-Burg
//! factorization.
//!
//! A [`kernels::Filter`] is a causal, stable linear filter over 1-D, 2-D,
//! or 3-D dense arrays, parameterized by a sparse, helically-ordered lag
//! pattern ([`lag::LagSet`]). It exposes four boundary-correct operators —
//! forward, transpose, inverse, inverse-transpose — each safe to apply
//! right up to an array's edges. [`wilson_burg`] builds such a filter from
//! a symmetric auto-correlation via an iterative fixed-point algorithm.
//!
//! This crate does not do frequency-domain work, non-minimum-phase
//! filtering, or filter-state serialization; those are out of scope by
//! design.

pub mod array;
pub mod error;
pub mod kernels;
pub mod lag;
pub mod wilson_burg;

pub use error::{FilterError, Result};
pub use kernels::Filter;
pub use lag::{impulse, LagSet, Rank};
pub use wilson_burg::{
    factor_wilson_burg_1d, factor_wilson_burg_1d_with, factor_wilson_burg_2d,
    factor_wilson_burg_2d_with, factor_wilson_burg_3d, factor_wilson_burg_3d_with, Workspace1d,
    Workspace2d, Workspace3d,
};
