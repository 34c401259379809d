use std::convert::Infallible;

use chrono::NaiveDate;

// -----------------------------------------------------------------------------
// YearFrac
// -----------------------------------------------------------------------------
/// Year fraction between two dates.
pub trait YearFrac<D = NaiveDate> {
    type Error;

    fn year_frac(&self, start: &D, end: &D) -> Result<f64, Self::Error>;
}

// -----------------------------------------------------------------------------
// Act365f
// -----------------------------------------------------------------------------
/// Actual/365 Fixed, the convention of the Black-Scholes time-to-expiry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Act365f;

impl YearFrac for Act365f {
    type Error = Infallible;

    #[inline]
    fn year_frac(&self, start: &NaiveDate, end: &NaiveDate) -> Result<f64, Self::Error> {
        let days = (*end - *start).num_days() as f64;
        Ok(days / 365.0)
    }
}
