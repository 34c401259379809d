use crate::{HedgeError, HedgeParameters, HedgeQuote, OptionChain, OptionContract, OptionType};

// -----------------------------------------------------------------------------
// SelectionPolicy
// -----------------------------------------------------------------------------
/// Rule choosing the single contract to hedge with.
///
/// Contracts with a missing or non-positive strike or implied volatility
/// are never returned.
pub trait SelectionPolicy {
    fn select<'a>(
        &self,
        chain: &'a OptionChain,
        spot: f64,
    ) -> Result<&'a OptionContract, HedgeError>;
}

/// Quotable contracts of a non-empty chain, in chain order.
fn candidates(
    chain: &OptionChain,
    spot: f64,
) -> Result<impl Iterator<Item = &OptionContract>, HedgeError> {
    if spot.is_nan() || spot <= 0.0 {
        return Err(HedgeError::InvalidInput {
            name: "spot",
            value: spot,
        });
    }
    if chain.is_empty() {
        return Err(HedgeError::EmptyChain);
    }
    Ok(chain.iter().filter(|c| c.is_quotable()))
}

fn ensure_percentage(percentage: f64) -> Result<(), HedgeError> {
    if percentage > 0.0 && percentage.is_finite() {
        Ok(())
    } else {
        Err(HedgeError::InvalidParameter {
            name: "percentage",
            value: percentage,
        })
    }
}

// -----------------------------------------------------------------------------
// OutOfTheMoney
// -----------------------------------------------------------------------------
/// Highest strike not above `percentage * spot`.
///
/// When no strike qualifies, the lowest strike of the chain is returned
/// instead, even though it lies above the threshold.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize, schemars::JsonSchema)]
pub struct OutOfTheMoney {
    pub percentage: f64,
}

impl SelectionPolicy for OutOfTheMoney {
    fn select<'a>(
        &self,
        chain: &'a OptionChain,
        spot: f64,
    ) -> Result<&'a OptionContract, HedgeError> {
        ensure_percentage(self.percentage)?;
        let threshold = self.percentage * spot;

        // equal strikes: the last one in chain order qualifies, the first one is the lowest
        let mut highest_qualified: Option<&OptionContract> = None;
        let mut lowest: Option<&OptionContract> = None;
        for c in candidates(chain, spot)? {
            if c.strike <= threshold && highest_qualified.map_or(true, |h| h.strike <= c.strike) {
                highest_qualified = Some(c);
            }
            if lowest.map_or(true, |l| c.strike < l.strike) {
                lowest = Some(c);
            }
        }
        match highest_qualified {
            Some(c) => Ok(c),
            None => {
                log::debug!(
                    "No strike at or below {threshold}, falling back to the lowest strike"
                );
                lowest.ok_or(HedgeError::NoCandidate)
            }
        }
    }
}

// -----------------------------------------------------------------------------
// ClosestStrike
// -----------------------------------------------------------------------------
/// Strike nearest to `percentage * spot`.
///
/// Among equally close strikes the first one in chain order wins.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize, schemars::JsonSchema)]
pub struct ClosestStrike {
    pub percentage: f64,
}

impl SelectionPolicy for ClosestStrike {
    fn select<'a>(
        &self,
        chain: &'a OptionChain,
        spot: f64,
    ) -> Result<&'a OptionContract, HedgeError> {
        ensure_percentage(self.percentage)?;
        let target = self.percentage * spot;

        let mut closest: Option<(&OptionContract, f64)> = None;
        for c in candidates(chain, spot)? {
            let dist = (c.strike - target).abs();
            if closest.map_or(true, |(_, d)| dist < d) {
                closest = Some((c, dist));
            }
        }
        closest.map(|(c, _)| c).ok_or(HedgeError::NoCandidate)
    }
}

// -----------------------------------------------------------------------------
// Selection
// -----------------------------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize, schemars::JsonSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Selection {
    OutOfTheMoney(OutOfTheMoney),
    ClosestStrike(ClosestStrike),
}

impl Selection {
    /// Policy used by the single-pick hedge when none is configured:
    /// 90% of spot for calls and the strike closest to 110% of spot for puts.
    #[inline]
    pub fn default_for(option_type: OptionType) -> Self {
        match option_type {
            OptionType::Call => Selection::OutOfTheMoney(OutOfTheMoney { percentage: 0.9 }),
            OptionType::Put => Selection::ClosestStrike(ClosestStrike { percentage: 1.1 }),
        }
    }

    #[inline]
    pub fn percentage(&self) -> f64 {
        match self {
            Selection::OutOfTheMoney(p) => p.percentage,
            Selection::ClosestStrike(p) => p.percentage,
        }
    }
}

impl SelectionPolicy for Selection {
    #[inline]
    fn select<'a>(
        &self,
        chain: &'a OptionChain,
        spot: f64,
    ) -> Result<&'a OptionContract, HedgeError> {
        match self {
            Selection::OutOfTheMoney(p) => p.select(chain, spot),
            Selection::ClosestStrike(p) => p.select(chain, spot),
        }
    }
}

// -----------------------------------------------------------------------------
// quote_selected
// -----------------------------------------------------------------------------
/// Hedge with the contract chosen by `policy`.
pub fn quote_selected<P: SelectionPolicy + ?Sized>(
    chain: &OptionChain,
    params: &HedgeParameters,
    policy: &P,
) -> Result<HedgeQuote, HedgeError> {
    let contract = policy.select(chain, params.spot())?;
    HedgeQuote::evaluate(contract, chain.option_type, params)
}
