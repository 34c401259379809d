use qmath::dist::StdNormal;

use crate::{HedgeError, OptionType};

/// Largest `f64` strictly below one.
const BELOW_ONE: f64 = 1.0 - f64::EPSILON / 2.0;

// -----------------------------------------------------------------------------
// d1
// delta
// -----------------------------------------------------------------------------
/// Black-Scholes `d1` term.
///
/// `d1 = (ln(S/K) + (r + sigma^2 / 2) T) / (sigma sqrt(T))`
pub fn d1(
    spot: f64,
    strike: f64,
    time_to_expiry: f64,
    rate: f64,
    vol: f64,
) -> Result<f64, HedgeError> {
    ensure_positive("time_to_expiry", time_to_expiry)?;
    ensure_positive("vol", vol)?;
    ensure_price("spot", spot)?;
    ensure_price("strike", strike)?;
    if !rate.is_finite() {
        return Err(HedgeError::InvalidParameter {
            name: "rate",
            value: rate,
        });
    }
    let drift = (rate + 0.5 * vol * vol) * time_to_expiry;
    Ok(((spot / strike).ln() + drift) / (vol * time_to_expiry.sqrt()))
}

/// Black-Scholes delta of a European option on a non-dividend paying underlying.
///
/// The result lies in `(0, 1)` for calls and in `(-1, 0)` for puts.
/// Where the normal distribution saturates in `f64`, the value is pinned
/// to the nearest representable number inside the open interval.
///
/// # Example
/// ```
/// use qhedge::{delta::delta, OptionType};
///
/// let call = delta(OptionType::Call, 100.0, 90.0, 1.0, 0.05, 0.2).unwrap();
/// let put = delta(OptionType::Put, 100.0, 90.0, 1.0, 0.05, 0.2).unwrap();
///
/// assert!((call - 0.8097).abs() < 1e-4);
/// assert!((call - put - 1.0).abs() < 1e-12);
/// ```
pub fn delta(
    option_type: OptionType,
    spot: f64,
    strike: f64,
    time_to_expiry: f64,
    rate: f64,
    vol: f64,
) -> Result<f64, HedgeError> {
    let d1 = d1(spot, strike, time_to_expiry, rate, vol)?;
    let delta = match option_type {
        OptionType::Call => open_unit(StdNormal.cdf(d1)),
        OptionType::Put => -open_unit(StdNormal.cdf(-d1)),
    };
    Ok(delta)
}

#[inline]
fn open_unit(p: f64) -> f64 {
    p.clamp(f64::MIN_POSITIVE, BELOW_ONE)
}

#[inline]
fn ensure_positive(name: &'static str, value: f64) -> Result<(), HedgeError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(HedgeError::InvalidParameter { name, value })
    }
}

/// Spot and strike come from market data, so a bad one is an invalid input.
#[inline]
fn ensure_price(name: &'static str, value: f64) -> Result<(), HedgeError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(HedgeError::InvalidInput { name, value })
    }
}
