use crate::{delta::delta, sizing::size, HedgeError, HedgeParameters, OptionContract, OptionType};

// -----------------------------------------------------------------------------
// HedgeQuote
// -----------------------------------------------------------------------------
/// Hedge built from a single contract.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, schemars::JsonSchema)]
pub struct HedgeQuote {
    pub option_type: OptionType,
    pub strike: f64,
    pub delta: f64,
    pub implied_volatility: f64,
    pub option_price: f64,
    pub contracts_required: f64,
    pub total_cost: f64,
    /// Strike over spot.
    pub moneyness: f64,
}

impl HedgeQuote {
    /// Price the hedge of `params` with `contract`.
    ///
    /// The contract's implied volatility is used as is; a missing or
    /// negative last price makes the cost undefined and is rejected.
    pub fn evaluate(
        contract: &OptionContract,
        option_type: OptionType,
        params: &HedgeParameters,
    ) -> Result<Self, HedgeError> {
        let delta = delta(
            option_type,
            params.spot(),
            contract.strike,
            params.time_to_expiry(),
            params.risk_free_rate(),
            contract.implied_volatility,
        )?;
        let sizing = size(delta, params)?;
        let total_cost =
            sizing
                .total_cost(contract.last_price)
                .ok_or(HedgeError::InvalidInput {
                    name: "last_price",
                    value: contract.last_price,
                })?;
        log::trace!(
            "strike={} delta={} contracts={} cost={}",
            contract.strike,
            delta,
            sizing.contracts_required,
            total_cost
        );
        Ok(Self {
            option_type,
            strike: contract.strike,
            delta,
            implied_volatility: contract.implied_volatility,
            option_price: contract.last_price,
            contracts_required: sizing.contracts_required,
            total_cost,
            moneyness: contract.strike / params.spot(),
        })
    }
}
