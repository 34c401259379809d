use chrono::NaiveDate;
use qmath::num::Positive;

use crate::{
    daycount::{Act365f, YearFrac},
    HedgeError,
};

/// Shares represented by one listed equity option contract.
pub const DEFAULT_CONTRACT_MULTIPLIER: u32 = 100;

// -----------------------------------------------------------------------------
// HedgeParameters
// -----------------------------------------------------------------------------
/// Market and portfolio inputs shared by every evaluation of a run.
///
/// # Example
/// ```
/// use qhedge::HedgeParameters;
///
/// let params = HedgeParameters::new(100.0, 0.05, 1.0, 1_000_000.0, 0.1137).unwrap();
///
/// assert_eq!(params.contract_multiplier(), 100);
/// assert!(HedgeParameters::new(0.0, 0.05, 1.0, 1_000_000.0, 0.1137).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, schemars::JsonSchema)]
pub struct HedgeParameters {
    spot: Positive<f64>,
    risk_free_rate: f64,
    time_to_expiry: Positive<f64>,
    portfolio_value: Positive<f64>,
    portfolio_volatility: Positive<f64>,
    contract_multiplier: Positive<u32>,
}

//
// ser/de
//
impl<'de> serde::Deserialize<'de> for HedgeParameters {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        fn default_contract_multiplier() -> u32 {
            DEFAULT_CONTRACT_MULTIPLIER
        }

        #[derive(serde::Deserialize)]
        struct Inner {
            spot: f64,
            risk_free_rate: f64,
            time_to_expiry: f64,
            portfolio_value: f64,
            portfolio_volatility: f64,
            #[serde(default = "default_contract_multiplier")]
            contract_multiplier: u32,
        }
        let inner = Inner::deserialize(deserializer)?;
        Self::new(
            inner.spot,
            inner.risk_free_rate,
            inner.time_to_expiry,
            inner.portfolio_value,
            inner.portfolio_volatility,
        )
        .and_then(|p| p.with_contract_multiplier(inner.contract_multiplier))
        .map_err(serde::de::Error::custom)
    }
}

//
// ctor
//
impl HedgeParameters {
    /// Create parameters with the default contract multiplier.
    ///
    /// Non-positive or non-finite spot is rejected as [HedgeError::InvalidInput]
    /// since it comes from the market feed. The other quantities are
    /// configuration and are rejected as [HedgeError::InvalidParameter].
    pub fn new(
        spot: f64,
        risk_free_rate: f64,
        time_to_expiry: f64,
        portfolio_value: f64,
        portfolio_volatility: f64,
    ) -> Result<Self, HedgeError> {
        let positive_param = |name, value| {
            finite_positive(value).ok_or(HedgeError::InvalidParameter { name, value })
        };
        let spot = finite_positive(spot).ok_or(HedgeError::InvalidInput {
            name: "spot",
            value: spot,
        })?;
        if !risk_free_rate.is_finite() {
            return Err(HedgeError::InvalidParameter {
                name: "risk_free_rate",
                value: risk_free_rate,
            });
        }
        Ok(Self {
            spot,
            risk_free_rate,
            time_to_expiry: positive_param("time_to_expiry", time_to_expiry)?,
            portfolio_value: positive_param("portfolio_value", portfolio_value)?,
            portfolio_volatility: positive_param("portfolio_volatility", portfolio_volatility)?,
            contract_multiplier: Positive::new(DEFAULT_CONTRACT_MULTIPLIER)
                .ok_or(HedgeError::InvalidParameter {
                    name: "contract_multiplier",
                    value: DEFAULT_CONTRACT_MULTIPLIER as f64,
                })?,
        })
    }

    #[inline]
    pub fn with_contract_multiplier(self, contract_multiplier: u32) -> Result<Self, HedgeError> {
        let contract_multiplier =
            Positive::new(contract_multiplier).ok_or(HedgeError::InvalidParameter {
                name: "contract_multiplier",
                value: contract_multiplier as f64,
            })?;
        Ok(Self {
            contract_multiplier,
            ..self
        })
    }

    /// Act/365F year fraction from the valuation date to the expiry.
    ///
    /// Expired or same-day options have no positive time to expiry
    /// and are rejected.
    pub fn years_until(valuation: &NaiveDate, expiry: &NaiveDate) -> Result<f64, HedgeError> {
        let dcf = Act365f
            .year_frac(valuation, expiry)
            .unwrap_or_else(|e| match e {});
        if dcf > 0.0 {
            Ok(dcf)
        } else {
            Err(HedgeError::InvalidParameter {
                name: "time_to_expiry",
                value: dcf,
            })
        }
    }
}

#[inline]
fn finite_positive(value: f64) -> Option<Positive<f64>> {
    Positive::new(value).filter(|v| v.get().is_finite())
}

//
// methods
//
impl HedgeParameters {
    #[inline]
    pub fn spot(&self) -> f64 {
        self.spot.get()
    }

    #[inline]
    pub fn risk_free_rate(&self) -> f64 {
        self.risk_free_rate
    }

    #[inline]
    pub fn time_to_expiry(&self) -> f64 {
        self.time_to_expiry.get()
    }

    #[inline]
    pub fn portfolio_value(&self) -> f64 {
        self.portfolio_value.get()
    }

    #[inline]
    pub fn portfolio_volatility(&self) -> f64 {
        self.portfolio_volatility.get()
    }

    #[inline]
    pub fn contract_multiplier(&self) -> u32 {
        self.contract_multiplier.get()
    }

    /// Portfolio value at risk for a one standard deviation move,
    /// which the hedge must offset.
    #[inline]
    pub fn exposure(&self) -> f64 {
        self.portfolio_value() * self.portfolio_volatility()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_new() {
        let params = HedgeParameters::new(100.0, 0.05, 1.0, 1_000_000.0, 0.1137).unwrap();

        assert_eq!(params.spot(), 100.0);
        assert_eq!(params.risk_free_rate(), 0.05);
        assert_eq!(params.time_to_expiry(), 1.0);
        assert_eq!(params.portfolio_value(), 1_000_000.0);
        assert_eq!(params.portfolio_volatility(), 0.1137);
        assert_eq!(params.contract_multiplier(), 100);
        approx::assert_abs_diff_eq!(params.exposure(), 113_700.0, epsilon = 1e-8);
    }

    #[rstest]
    #[case(0.0, 0.05, 1.0, 1e6, 0.1, HedgeError::InvalidInput { name: "spot", value: 0.0 })]
    #[case(-1.0, 0.05, 1.0, 1e6, 0.1, HedgeError::InvalidInput { name: "spot", value: -1.0 })]
    #[case(100.0, 0.05, 0.0, 1e6, 0.1, HedgeError::InvalidParameter { name: "time_to_expiry", value: 0.0 })]
    #[case(100.0, 0.05, 1.0, 0.0, 0.1, HedgeError::InvalidParameter { name: "portfolio_value", value: 0.0 })]
    #[case(100.0, 0.05, 1.0, 1e6, -0.1, HedgeError::InvalidParameter { name: "portfolio_volatility", value: -0.1 })]
    #[case(100.0, f64::INFINITY, 1.0, 1e6, 0.1, HedgeError::InvalidParameter { name: "risk_free_rate", value: f64::INFINITY })]
    #[case(f64::INFINITY, 0.05, 1.0, 1e6, 0.1, HedgeError::InvalidInput { name: "spot", value: f64::INFINITY })]
    #[case(100.0, 0.05, f64::INFINITY, 1e6, 0.1, HedgeError::InvalidParameter { name: "time_to_expiry", value: f64::INFINITY })]
    #[case(100.0, 0.05, 1.0, f64::INFINITY, 0.1, HedgeError::InvalidParameter { name: "portfolio_value", value: f64::INFINITY })]
    #[case(100.0, 0.05, 1.0, 1e6, f64::INFINITY, HedgeError::InvalidParameter { name: "portfolio_volatility", value: f64::INFINITY })]
    fn test_new_err(
        #[case] spot: f64,
        #[case] rate: f64,
        #[case] tte: f64,
        #[case] value: f64,
        #[case] vol: f64,
        #[case] expected: HedgeError,
    ) {
        let tested = HedgeParameters::new(spot, rate, tte, value, vol);

        assert_eq!(tested, Err(expected));
    }

    #[test]
    fn test_negative_rate_is_allowed() {
        let params = HedgeParameters::new(100.0, -0.005, 1.0, 1e6, 0.1).unwrap();

        assert_eq!(params.risk_free_rate(), -0.005);
    }

    #[test]
    fn test_with_contract_multiplier() {
        let params = HedgeParameters::new(100.0, 0.05, 1.0, 1e6, 0.1).unwrap();

        assert_eq!(
            params.with_contract_multiplier(10).unwrap().contract_multiplier(),
            10
        );
        assert_eq!(
            params.with_contract_multiplier(0),
            Err(HedgeError::InvalidParameter {
                name: "contract_multiplier",
                value: 0.0
            })
        );
    }

    #[test]
    fn test_years_until() {
        let valuation = NaiveDate::from_ymd_opt(2024, 5, 17).unwrap();
        let expiry = NaiveDate::from_ymd_opt(2024, 6, 21).unwrap();

        let tested = HedgeParameters::years_until(&valuation, &expiry).unwrap();

        approx::assert_abs_diff_eq!(tested, 35. / 365., epsilon = 1e-12);
        assert!(HedgeParameters::years_until(&expiry, &expiry).is_err());
        assert!(HedgeParameters::years_until(&expiry, &valuation).is_err());
    }

    #[test]
    fn test_de() {
        let ser = r#"{
            "spot": 12.9,
            "risk_free_rate": 0.05,
            "time_to_expiry": 1.0,
            "portfolio_value": 1000000.0,
            "portfolio_volatility": 0.1137
        }"#;

        let tested: HedgeParameters = serde_json::from_str(ser).unwrap();

        assert_eq!(
            tested,
            HedgeParameters::new(12.9, 0.05, 1.0, 1e6, 0.1137).unwrap()
        );
    }

    #[rstest]
    #[case(r#"{"spot": 0.0, "risk_free_rate": 0.05, "time_to_expiry": 1.0, "portfolio_value": 1.0, "portfolio_volatility": 0.1}"#)]
    #[case(r#"{"spot": 1.0, "risk_free_rate": 0.05, "time_to_expiry": 0.0, "portfolio_value": 1.0, "portfolio_volatility": 0.1}"#)]
    #[case(r#"{"spot": 1.0, "risk_free_rate": 0.05, "time_to_expiry": 1.0, "portfolio_value": 1.0, "portfolio_volatility": 0.1, "contract_multiplier": 0}"#)]
    #[case(r#"{"spot": 1.0, "time_to_expiry": 1.0, "portfolio_value": 1.0, "portfolio_volatility": 0.1}"#)]
    fn test_de_err(#[case] ser: &str) {
        let tested: Result<HedgeParameters, _> = serde_json::from_str(ser);

        assert!(tested.is_err());
    }
}
