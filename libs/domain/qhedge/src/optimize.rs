use crate::{
    select::{ClosestStrike, SelectionPolicy},
    HedgeError, HedgeParameters, HedgeQuote, OptionChain, OptionContract,
};

// -----------------------------------------------------------------------------
// HedgeCost
// -----------------------------------------------------------------------------
/// Cost of hedging with one contract during a chain scan.
///
/// A contract without a positive implied volatility cannot be priced and
/// is assigned an infinite cost: it is counted as evaluated but can never
/// be the minimum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HedgeCost {
    Finite(HedgeQuote),
    Infinite,
}

impl HedgeCost {
    pub fn of(
        contract: &OptionContract,
        chain: &OptionChain,
        params: &HedgeParameters,
    ) -> Result<Self, HedgeError> {
        if !contract.has_positive_vol() {
            log::debug!(
                "Strike {} has implied volatility {}, treated as infinite cost",
                contract.strike,
                contract.implied_volatility
            );
            return Ok(HedgeCost::Infinite);
        }
        HedgeQuote::evaluate(contract, chain.option_type, params).map(HedgeCost::Finite)
    }
}

// -----------------------------------------------------------------------------
// Rejection
// MinCost
// -----------------------------------------------------------------------------
/// Contract of the chain which failed to be evaluated.
#[derive(Debug, Clone, PartialEq, serde::Serialize, schemars::JsonSchema)]
pub struct Rejection {
    pub contract: OptionContract,
    pub error: HedgeError,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, schemars::JsonSchema)]
pub struct MinCost {
    pub best: HedgeQuote,
    /// Number of contracts scanned, including infinite cost and rejected ones.
    pub evaluated: usize,
    /// Contracts whose evaluation failed, in chain order.
    pub rejected: Vec<Rejection>,
}

/// Cheapest hedge over the whole chain.
///
/// Contracts are scanned in chain order and the first one reaching the
/// minimum total cost is kept. A contract failing evaluation, e.g. with a
/// missing last price or a delta too small to size, does not stop the scan;
/// it is reported in [MinCost::rejected].
///
/// # Example
/// ```
/// use qhedge::{optimize::minimize_cost, HedgeParameters, OptionChain, OptionContract, OptionType};
///
/// let chain = OptionChain::new(
///     OptionType::Put,
///     vec![
///         OptionContract::new(11.0, 0.9, 0.35),
///         OptionContract::new(12.0, 0.0, 0.60),
///         OptionContract::new(13.0, 0.8, f64::NAN),
///     ],
/// );
/// let params = HedgeParameters::new(12.9, 0.05, 1.0, 1_000_000.0, 0.1137).unwrap();
///
/// let found = minimize_cost(&chain, &params).unwrap();
/// assert_eq!(found.best.strike, 11.0);
/// assert_eq!(found.evaluated, 3);
/// assert_eq!(found.rejected.len(), 1);
/// ```
pub fn minimize_cost(
    chain: &OptionChain,
    params: &HedgeParameters,
) -> Result<MinCost, HedgeError> {
    if chain.is_empty() {
        return Err(HedgeError::EmptyChain);
    }
    let mut best: Option<HedgeQuote> = None;
    let mut rejected = Vec::new();
    let mut evaluated = 0;
    for contract in chain.iter() {
        evaluated += 1;
        match HedgeCost::of(contract, chain, params) {
            Ok(HedgeCost::Finite(quote)) => {
                if best.map_or(true, |b| quote.total_cost < b.total_cost) {
                    best = Some(quote);
                }
            }
            Ok(HedgeCost::Infinite) => {}
            Err(error) => {
                log::debug!("Strike {} is rejected: {}", contract.strike, error);
                rejected.push(Rejection {
                    contract: *contract,
                    error,
                });
            }
        }
    }
    match best {
        Some(best) => Ok(MinCost {
            best,
            evaluated,
            rejected,
        }),
        None => Err(HedgeError::NoValidCandidate { evaluated }),
    }
}

// -----------------------------------------------------------------------------
// fixed_ratio
// -----------------------------------------------------------------------------
/// Hedge with the strike closest to `ratio * spot`.
pub fn fixed_ratio(
    chain: &OptionChain,
    params: &HedgeParameters,
    ratio: f64,
) -> Result<HedgeQuote, HedgeError> {
    let contract = ClosestStrike { percentage: ratio }.select(chain, params.spot())?;
    HedgeQuote::evaluate(contract, chain.option_type, params)
}

// -----------------------------------------------------------------------------
// HedgeComparison
// -----------------------------------------------------------------------------
/// Minimum-cost hedge side by side with the fixed-ratio one.
#[derive(Debug, Clone, PartialEq, serde::Serialize, schemars::JsonSchema)]
pub struct HedgeComparison {
    pub min_cost: MinCost,
    pub fixed_ratio: HedgeQuote,
    pub ratio: f64,
    /// Extra premium paid by the fixed-ratio hedge, never negative.
    pub difference: f64,
}

/// Run both the minimum-cost scan and the fixed-ratio pick on `chain`.
///
/// Both are computed independently, so the same contract may be chosen twice.
pub fn compare(
    chain: &OptionChain,
    params: &HedgeParameters,
    ratio: f64,
) -> Result<HedgeComparison, HedgeError> {
    let min_cost = minimize_cost(chain, params)?;
    let fixed = fixed_ratio(chain, params, ratio)?;
    Ok(HedgeComparison {
        difference: fixed.total_cost - min_cost.best.total_cost,
        min_cost,
        fixed_ratio: fixed,
        ratio,
    })
}

#[cfg(test)]
mod tests {
    use crate::OptionType;

    use super::*;
    use rstest::rstest;

    fn params(spot: f64) -> HedgeParameters {
        HedgeParameters::new(spot, 0.05, 1.0, 1_000_000.0, 0.1137).unwrap()
    }

    fn call_chain() -> OptionChain {
        OptionChain::new(
            OptionType::Call,
            vec![
                OptionContract::new(80.0, 0.25, 22.0),
                OptionContract::new(85.0, 0.22, 17.5),
                OptionContract::new(90.0, 0.20, 13.0),
                OptionContract::new(95.0, 0.19, 9.0),
                OptionContract::new(100.0, 0.18, 6.0),
            ],
        )
    }

    #[test]
    fn test_minimize_cost() {
        let tested = minimize_cost(&call_chain(), &params(100.0)).unwrap();

        assert_eq!(tested.evaluated, 5);
        assert!(tested.rejected.is_empty());
        assert_eq!(tested.best.strike, 100.0);
        approx::assert_abs_diff_eq!(tested.best.total_cost, 1060171.9373310802, epsilon = 1e-4);
    }

    #[test]
    fn test_minimize_cost_matches_brute_force() {
        let chain = call_chain();
        let params = params(100.0);

        let tested = minimize_cost(&chain, &params).unwrap();

        for c in chain.iter() {
            let quote = HedgeQuote::evaluate(c, chain.option_type, &params).unwrap();
            assert!(tested.best.total_cost <= quote.total_cost);
        }
    }

    #[test]
    fn test_minimize_cost_skips_infinite_cost() {
        let mut chain = call_chain();
        chain.contracts[4].implied_volatility = 0.0;
        chain.contracts[3].implied_volatility = f64::NAN;

        let tested = minimize_cost(&chain, &params(100.0)).unwrap();

        assert_eq!(tested.evaluated, 5);
        assert_eq!(tested.best.strike, 90.0);
    }

    #[test]
    fn test_minimize_cost_tie_takes_first() {
        let chain = OptionChain::new(
            OptionType::Put,
            vec![
                OptionContract::new(100.0, 0.2, 0.0),
                OptionContract::new(95.0, 0.2, 0.0),
            ],
        );

        let tested = minimize_cost(&chain, &params(100.0)).unwrap();

        assert_eq!(tested.best.total_cost, 0.0);
        assert_eq!(tested.best.strike, 100.0);
    }

    #[rstest]
    #[case(0.0)]
    #[case(-0.3)]
    fn test_minimize_cost_no_valid_candidate(#[case] vol: f64) {
        let chain = OptionChain::new(
            OptionType::Call,
            vec![
                OptionContract::new(90.0, vol, 1.0),
                OptionContract::new(95.0, vol, 1.0),
                OptionContract::new(100.0, vol, 1.0),
            ],
        );

        let tested = minimize_cost(&chain, &params(100.0));

        assert_eq!(tested, Err(HedgeError::NoValidCandidate { evaluated: 3 }));
    }

    #[test]
    fn test_minimize_cost_empty_chain() {
        let chain = OptionChain::new(OptionType::Call, vec![]);

        assert_eq!(
            minimize_cost(&chain, &params(100.0)),
            Err(HedgeError::EmptyChain)
        );
    }

    #[rstest]
    #[case(OptionContract::new(200.0, 1e-5, 0.01), HedgeError::DivisionByZero { delta: f64::MIN_POSITIVE })]
    #[case(OptionContract::new(95.0, 0.2, -1.0), HedgeError::InvalidInput { name: "last_price", value: -1.0 })]
    #[case(OptionContract::new(0.0, 0.2, 5.0), HedgeError::InvalidInput { name: "strike", value: 0.0 })]
    fn test_minimize_cost_reports_rejected(
        #[case] contract: OptionContract,
        #[case] expected: HedgeError,
    ) {
        let chain = OptionChain::new(
            OptionType::Call,
            vec![OptionContract::new(90.0, 0.2, 13.0), contract],
        );

        let tested = minimize_cost(&chain, &params(100.0)).unwrap();

        assert_eq!(tested.best.strike, 90.0);
        assert_eq!(tested.evaluated, 2);
        assert_eq!(
            tested.rejected,
            vec![Rejection {
                contract,
                error: expected
            }]
        );
    }

    #[test]
    fn test_minimize_cost_rejects_missing_fields() {
        let chain = OptionChain::new(
            OptionType::Call,
            vec![
                OptionContract::new(90.0, 0.2, 13.0),
                OptionContract::new(95.0, 0.2, f64::NAN),
                OptionContract::new(f64::NAN, 0.2, 5.0),
            ],
        );

        let tested = minimize_cost(&chain, &params(100.0)).unwrap();

        assert_eq!(tested.best.strike, 90.0);
        assert_eq!(tested.evaluated, 3);
        assert_eq!(tested.rejected.len(), 2);
        assert!(matches!(
            tested.rejected[0].error,
            HedgeError::InvalidInput {
                name: "last_price",
                ..
            }
        ));
        assert!(matches!(
            tested.rejected[1].error,
            HedgeError::InvalidInput { name: "strike", .. }
        ));
    }

    #[test]
    fn test_minimize_cost_nothing_priced() {
        let chain = OptionChain::new(
            OptionType::Call,
            vec![
                OptionContract::new(90.0, 0.0, 13.0),
                OptionContract::new(95.0, 0.2, f64::NAN),
            ],
        );

        let tested = minimize_cost(&chain, &params(100.0));

        assert_eq!(tested, Err(HedgeError::NoValidCandidate { evaluated: 2 }));
    }

    #[test]
    fn test_hedge_cost_infinite() {
        let contract = OptionContract::new(90.0, 0.0, 13.0);

        let tested = HedgeCost::of(&contract, &call_chain(), &params(100.0)).unwrap();

        assert_eq!(tested, HedgeCost::Infinite);
    }

    #[test]
    fn test_fixed_ratio() {
        let tested = fixed_ratio(&call_chain(), &params(90.0), 1.1).unwrap();

        assert_eq!(tested.strike, 100.0);
        approx::assert_abs_diff_eq!(tested.moneyness, 100.0 / 90.0, epsilon = 1e-12);
    }

    #[rstest]
    #[case(100.0, 1.1)]
    #[case(100.0, 0.9)]
    #[case(90.0, 1.1)]
    #[case(120.0, 0.75)]
    fn test_compare_min_cost_not_above_fixed_ratio(#[case] spot: f64, #[case] ratio: f64) {
        let tested = compare(&call_chain(), &params(spot), ratio).unwrap();

        assert!(tested.min_cost.best.total_cost <= tested.fixed_ratio.total_cost);
        assert!(tested.difference >= 0.0);
        assert_eq!(tested.ratio, ratio);
    }

    #[test]
    fn test_compare_same_contract_on_both_sides() {
        let tested = compare(&call_chain(), &params(90.0), 1.1).unwrap();

        assert_eq!(tested.min_cost.best.strike, 100.0);
        assert_eq!(tested.fixed_ratio.strike, 100.0);
        assert_eq!(tested.min_cost.best, tested.fixed_ratio);
        assert_eq!(tested.difference, 0.0);
    }

    #[test]
    fn test_compare_put_chain() {
        let chain = OptionChain::new(
            OptionType::Put,
            vec![
                OptionContract::new(10.0, 1.10, 0.05),
                OptionContract::new(11.0, 0.95, 0.20),
                OptionContract::new(12.0, 0.0, 0.45),
                OptionContract::new(13.0, 0.80, 0.95),
                OptionContract::new(15.0, 0.75, 2.40),
            ],
        );

        let tested = compare(&chain, &params(12.9), 0.9).unwrap();

        assert_eq!(tested.min_cost.evaluated, 5);
        assert_eq!(tested.fixed_ratio.strike, 11.0);
        assert!(tested.min_cost.best.delta < 0.0);
        assert!(tested.min_cost.best.total_cost <= tested.fixed_ratio.total_cost);
    }
}
