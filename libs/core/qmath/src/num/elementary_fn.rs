// -----------------------------------------------------------------------------
// Erfc
// -----------------------------------------------------------------------------
/// Trait to generalize complementary error function interface.
///
/// `erfc(x) = 1 - erf(x)`, evaluated without cancellation for large `x`.
pub trait Erfc: Sized {
    type Output: Into<Self>;

    fn erfc(self) -> Self::Output;
}

impl Erfc for f64 {
    type Output = Self;

    #[inline]
    fn erfc(self) -> Self::Output {
        libm::erfc(self)
    }
}

impl Erfc for f32 {
    type Output = Self;

    #[inline]
    fn erfc(self) -> Self::Output {
        libm::erfcf(self)
    }
}
