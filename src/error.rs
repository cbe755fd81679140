use std::fmt::{Display, Formatter};

/// Errors raised by filter construction and Wilson-Burg factorization.
///
/// Out-of-range index access during kernel application is *not* an error —
/// it is defined as a zero contribution (see `kernels`). Only the two
/// variants below are ever returned.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterError {
    /// A construction-time violation: bad lag geometry, mismatched lengths,
    /// `a[0] == 0`, even-extent autocorrelation, or a non-positive
    /// `maxiter`/`epsilon` passed to `factor_wilson_burg`.
    InvalidArgument(String),
    /// `factor_wilson_burg` exhausted `iterations` without satisfying the
    /// convergence criterion. The filter's coefficients are left in their
    /// last-iteration state.
    Convergence { iterations: usize },
}

impl std::error::Error for FilterError {}

impl Display for FilterError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FilterError::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
            FilterError::Convergence { iterations } => {
                write!(f, "Wilson-Burg did not converge after {iterations} iterations")
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, FilterError>;
