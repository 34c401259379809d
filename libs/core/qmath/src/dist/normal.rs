use std::f64::consts::FRAC_1_SQRT_2;

use crate::num::Erfc;

// -----------------------------------------------------------------------------
// StdNormal
// -----------------------------------------------------------------------------
/// Standard normal distribution, N(0, 1).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct StdNormal;

impl StdNormal {
    /// Cumulative distribution function.
    ///
    /// Evaluated as `erfc(-x / sqrt(2)) / 2` so that the lower tail keeps
    /// its relative precision down to the smallest representable values.
    /// The upper tail rounds to `1.0` once `1 - cdf(x)` drops below the
    /// machine epsilon.
    ///
    /// # Example
    /// ```
    /// use qmath::dist::StdNormal;
    ///
    /// assert_eq!(StdNormal.cdf(0.0), 0.5);
    /// assert!(StdNormal.cdf(-30.0) > 0.0);
    /// ```
    #[inline]
    pub fn cdf(&self, x: f64) -> f64 {
        0.5 * Erfc::erfc(-x * FRAC_1_SQRT_2)
    }
}
