use crate::{HedgeError, HedgeParameters};

// -----------------------------------------------------------------------------
// Sizing
// -----------------------------------------------------------------------------
/// Number of contracts offsetting the portfolio exposure.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, schemars::JsonSchema)]
pub struct Sizing {
    pub contracts_required: f64,
    pub contract_multiplier: u32,
}

impl Sizing {
    /// Premium paid for the whole hedge at the given per-share option price.
    ///
    /// Returns [None] if the price is negative or missing.
    #[inline]
    pub fn total_cost(&self, option_price: f64) -> Option<f64> {
        if 0.0 <= option_price && option_price.is_finite() {
            Some(self.contracts_required * self.contract_multiplier as f64 * option_price)
        } else {
            None
        }
    }
}

// -----------------------------------------------------------------------------
// size
// -----------------------------------------------------------------------------
/// Contracts needed so that `contracts * multiplier * |delta|` offsets
/// `portfolio_value * portfolio_volatility`.
///
/// A zero delta, or one so small that the count overflows, fails with
/// [HedgeError::DivisionByZero] instead of producing an unbounded count.
///
/// # Example
/// ```
/// use qhedge::{sizing::size, HedgeParameters};
///
/// let params = HedgeParameters::new(100.0, 0.05, 1.0, 1_000_000.0, 0.1137).unwrap();
/// let sizing = size(0.5, &params).unwrap();
///
/// assert!((sizing.contracts_required - 2274.0).abs() < 1e-9);
/// assert!(size(0.0, &params).is_err());
/// ```
pub fn size(delta: f64, params: &HedgeParameters) -> Result<Sizing, HedgeError> {
    let hedge_ratio = params.contract_multiplier() as f64 * delta.abs();
    if hedge_ratio == 0.0 || delta.is_nan() {
        return Err(HedgeError::DivisionByZero { delta });
    }
    let contracts_required = params.exposure() / hedge_ratio;
    if !contracts_required.is_finite() {
        return Err(HedgeError::DivisionByZero { delta });
    }
    Ok(Sizing {
        contracts_required,
        contract_multiplier: params.contract_multiplier(),
    })
}
