use crate::error::{FilterError, Result};

/// Which dimensionality a [`LagSet`] was validated against.
///
/// This only records *how the set was constructed*; the kernel entry point
/// actually invoked (`apply_1d`, `apply_2d`, `apply_3d`, ...) independently
/// decides which of `lag1`/`lag2`/`lag3` are consulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rank {
    One,
    Two,
    Three,
}

/// An immutable description of `m` helically-ordered lags, plus the
/// mutable filter coefficients that ride alongside them.
///
/// Entry `j = 0` is always the zero lag with `a[0] != 0`. Every other
/// entry satisfies the causality invariant for the rank it was constructed
/// with. Lag arrays never change after construction; `a` is overwritten in
/// place by the `factor_wilson_burg_*` family in [`crate::wilson_burg`].
#[derive(Debug, Clone)]
pub struct LagSet {
    rank: Rank,
    lag1: Vec<i32>,
    lag2: Vec<i32>,
    lag3: Vec<i32>,
    a: Vec<f32>,
    min1: i32,
    max1: i32,
    min2: i32,
    max2: i32,
    min3: i32,
    max3: i32,
    a0: f32,
    a0_inv: f32,
}

/// Returns the conventional initial coefficient vector `(1, 0, ..., 0)`.
pub fn impulse(m: usize) -> Vec<f32> {
    let mut a = vec![0.0f32; m];
    if m > 0 {
        a[0] = 1.0;
    }
    a
}

fn min_max(values: &[i32]) -> (i32, i32) {
    let mut lo = values[0];
    let mut hi = values[0];
    for &v in &values[1..] {
        lo = lo.min(v);
        hi = hi.max(v);
    }
    (lo, hi)
}

fn check_common(lag1: &[i32], a: &[f32]) -> Result<()> {
    if lag1.is_empty() {
        return Err(FilterError::InvalidArgument("lag set must have m >= 1 entries".into()));
    }
    if lag1.len() != a.len() {
        return Err(FilterError::InvalidArgument(format!(
            "lag array length {} does not match coefficient length {}",
            lag1.len(),
            a.len()
        )));
    }
    if a[0] == 0.0 {
        return Err(FilterError::InvalidArgument("a[0] must be nonzero".into()));
    }
    Ok(())
}

impl LagSet {
    /// Builds a 1-D lag set, validating `lag1[0] == 0` and `lag1[j] > 0`
    /// for `j >= 1`.
    pub fn new_1d(lag1: Vec<i32>, a: Vec<f32>) -> Result<Self> {
        check_common(&lag1, &a)?;
        if lag1[0] != 0 {
            return Err(FilterError::InvalidArgument("lag1[0] must be 0".into()));
        }
        for j in 1..lag1.len() {
            if lag1[j] <= 0 {
                return Err(FilterError::InvalidArgument(format!(
                    "1-D causality violated at j={j}: lag1 must be > 0"
                )));
            }
        }
        let (min1, max1) = min_max(&lag1);
        let m = lag1.len();
        Ok(Self {
            rank: Rank::One,
            lag1,
            lag2: vec![0; m],
            lag3: vec![0; m],
            a0: a[0],
            a0_inv: 1.0 / a[0],
            a,
            min1,
            max1,
            min2: 0,
            max2: 0,
            min3: 0,
            max3: 0,
        })
    }

    /// Builds a 1-D lag set with the impulse `(1, 0, ..., 0)` coefficients.
    pub fn new_1d_impulse(lag1: Vec<i32>) -> Result<Self> {
        let a = impulse(lag1.len());
        Self::new_1d(lag1, a)
    }

    /// Builds a 2-D lag set, validating `lag2[j] >= 0` for `j >= 1`, and
    /// `lag1[j] > 0` whenever `lag2[j] == 0`.
    pub fn new_2d(lag1: Vec<i32>, lag2: Vec<i32>, a: Vec<f32>) -> Result<Self> {
        check_common(&lag1, &a)?;
        if lag1.len() != lag2.len() {
            return Err(FilterError::InvalidArgument(
                "lag1 and lag2 must have the same length".into(),
            ));
        }
        if lag1[0] != 0 || lag2[0] != 0 {
            return Err(FilterError::InvalidArgument("lag[0] must be the zero vector".into()));
        }
        for j in 1..lag1.len() {
            if lag2[j] < 0 {
                return Err(FilterError::InvalidArgument(format!(
                    "2-D causality violated at j={j}: lag2 must be >= 0"
                )));
            }
            if lag2[j] == 0 && lag1[j] <= 0 {
                return Err(FilterError::InvalidArgument(format!(
                    "2-D causality violated at j={j}: lag1 must be > 0 when lag2 == 0"
                )));
            }
        }
        let (min1, max1) = min_max(&lag1);
        let (min2, max2) = min_max(&lag2);
        let m = lag1.len();
        Ok(Self {
            rank: Rank::Two,
            lag1,
            lag2,
            lag3: vec![0; m],
            a0: a[0],
            a0_inv: 1.0 / a[0],
            a,
            min1,
            max1,
            min2,
            max2,
            min3: 0,
            max3: 0,
        })
    }

    /// Builds a 2-D lag set with impulse coefficients.
    pub fn new_2d_impulse(lag1: Vec<i32>, lag2: Vec<i32>) -> Result<Self> {
        let a = impulse(lag1.len());
        Self::new_2d(lag1, lag2, a)
    }

    /// Builds a 3-D lag set, validating `lag3[j] >= 0` for `j >= 1`, the
    /// 2-D rule whenever `lag3[j] == 0`, and the 1-D rule whenever
    /// `lag3[j] == lag2[j] == 0`.
    pub fn new_3d(lag1: Vec<i32>, lag2: Vec<i32>, lag3: Vec<i32>, a: Vec<f32>) -> Result<Self> {
        check_common(&lag1, &a)?;
        if lag1.len() != lag2.len() || lag1.len() != lag3.len() {
            return Err(FilterError::InvalidArgument(
                "lag1, lag2, and lag3 must have the same length".into(),
            ));
        }
        if lag1[0] != 0 || lag2[0] != 0 || lag3[0] != 0 {
            return Err(FilterError::InvalidArgument("lag[0] must be the zero vector".into()));
        }
        for j in 1..lag1.len() {
            if lag3[j] < 0 {
                return Err(FilterError::InvalidArgument(format!(
                    "3-D causality violated at j={j}: lag3 must be >= 0"
                )));
            }
            if lag3[j] == 0 {
                if lag2[j] < 0 {
                    return Err(FilterError::InvalidArgument(format!(
                        "3-D causality violated at j={j}: lag2 must be >= 0 when lag3 == 0"
                    )));
                }
                if lag2[j] == 0 && lag1[j] <= 0 {
                    return Err(FilterError::InvalidArgument(format!(
                        "3-D causality violated at j={j}: lag1 must be > 0 when lag2 == lag3 == 0"
                    )));
                }
            }
        }
        let (min1, max1) = min_max(&lag1);
        let (min2, max2) = min_max(&lag2);
        let (min3, max3) = min_max(&lag3);
        Ok(Self {
            rank: Rank::Three,
            lag1,
            lag2,
            lag3,
            a0: a[0],
            a0_inv: 1.0 / a[0],
            a,
            min1,
            max1,
            min2,
            max2,
            min3,
            max3,
        })
    }

    /// Builds a 3-D lag set with impulse coefficients.
    pub fn new_3d_impulse(lag1: Vec<i32>, lag2: Vec<i32>, lag3: Vec<i32>) -> Result<Self> {
        let a = impulse(lag1.len());
        Self::new_3d(lag1, lag2, lag3, a)
    }

    pub fn rank(&self) -> Rank {
        self.rank
    }

    pub fn m(&self) -> usize {
        self.lag1.len()
    }

    pub fn lag1(&self) -> &[i32] {
        &self.lag1
    }

    pub fn lag2(&self) -> &[i32] {
        &self.lag2
    }

    pub fn lag3(&self) -> &[i32] {
        &self.lag3
    }

    pub fn a(&self) -> &[f32] {
        &self.a
    }

    pub fn a0(&self) -> f32 {
        self.a0
    }

    pub fn a0_inv(&self) -> f32 {
        self.a0_inv
    }

    pub fn min1(&self) -> i32 {
        self.min1
    }
    pub fn max1(&self) -> i32 {
        self.max1
    }
    pub fn min2(&self) -> i32 {
        self.min2
    }
    pub fn max2(&self) -> i32 {
        self.max2
    }
    pub fn min3(&self) -> i32 {
        self.min3
    }
    pub fn max3(&self) -> i32 {
        self.max3
    }

    /// Mutable access to the coefficient vector, for use by
    /// `factor_wilson_burg`. The lag geometry is never exposed mutably.
    pub(crate) fn a_mut(&mut self) -> &mut [f32] {
        &mut self.a
    }

    /// Recomputes `a0`/`a0_inv` after `a[0]` has been overwritten directly
    /// through [`LagSet::a_mut`].
    pub(crate) fn refresh_a0(&mut self) {
        self.a0 = self.a[0];
        self.a0_inv = 1.0 / self.a0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn impulse_vector() {
        assert_eq!(impulse(3), vec![1.0, 0.0, 0.0]);
        assert_eq!(impulse(0), Vec::<f32>::new());
    }

    #[test]
    fn rejects_zero_length() {
        assert!(LagSet::new_1d(vec![], vec![]).is_err());
    }

    #[test]
    fn rejects_zero_a0() {
        assert!(LagSet::new_1d(vec![0, 1], vec![0.0, 1.0]).is_err());
    }

    #[test]
    fn rejects_nonpositive_1d_lag() {
        assert!(LagSet::new_1d(vec![0, 0], vec![1.0, 1.0]).is_err());
        assert!(LagSet::new_1d(vec![0, -1], vec![1.0, 1.0]).is_err());
    }

    #[test]
    fn accepts_valid_1d() {
        let l = LagSet::new_1d(vec![0, 1, 2], vec![1.0, -0.5, 0.25]).unwrap();
        assert_eq!(l.m(), 3);
        assert_eq!(l.min1(), 0);
        assert_eq!(l.max1(), 2);
        assert_eq!(l.a0(), 1.0);
        assert_eq!(l.a0_inv(), 1.0);
    }

    #[test]
    fn rejects_2d_negative_lag2() {
        assert!(LagSet::new_2d(vec![0, 1], vec![0, -1], vec![1.0, 0.5]).is_err());
    }

    #[test]
    fn rejects_2d_lag2_zero_lag1_nonpositive() {
        assert!(LagSet::new_2d(vec![0, 0], vec![0, 0], vec![1.0, 0.5]).is_err());
        assert!(LagSet::new_2d(vec![0, -1], vec![0, 0], vec![1.0, 0.5]).is_err());
    }

    #[test]
    fn accepts_valid_2d_helix() {
        let l = LagSet::new_2d(
            vec![0, 1, -1, 0, 1],
            vec![0, 0, 1, 1, 1],
            vec![1.0, 0.25, 0.1, 0.3, 0.15],
        )
        .unwrap();
        assert_eq!(l.m(), 5);
        assert_eq!(l.min1(), -1);
        assert_eq!(l.max1(), 1);
        assert_eq!(l.min2(), 0);
        assert_eq!(l.max2(), 1);
    }

    #[test]
    fn rejects_3d_negative_lag3() {
        assert!(LagSet::new_3d(vec![0, 1], vec![0, 0], vec![0, -1], vec![1.0, 0.5]).is_err());
    }

    #[test]
    fn accepts_valid_3d_helix() {
        let l = LagSet::new_3d(
            vec![0, 1, 0, 1],
            vec![0, 0, 1, 0],
            vec![0, 0, 0, 1],
            vec![1.0, 0.5, 0.3, 0.2],
        )
        .unwrap();
        assert_eq!(l.m(), 4);
        assert_eq!(l.min3(), 0);
        assert_eq!(l.max3(), 1);
    }
}
