use std::{fs::File, io::BufReader, path::Path};

use anyhow::Context;
use chrono::NaiveDate;
use qhedge::{HedgeParameters, DEFAULT_CONTRACT_MULTIPLIER};

/// Horizon used when neither the config nor the market data give one.
const DEFAULT_TIME_TO_EXPIRY: f64 = 1.0;

// -----------------------------------------------------------------------------
// HedgeConfig
// -----------------------------------------------------------------------------
/// Portfolio and model settings of a hedge run, read from YAML.
///
/// Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize, schemars::JsonSchema)]
#[serde(default, deny_unknown_fields)]
pub struct HedgeConfig {
    pub portfolio_value: f64,
    pub portfolio_volatility: f64,
    pub risk_free_rate: f64,
    /// Years to expiry. Derived from the valuation and expiry dates when omitted.
    pub time_to_expiry: Option<f64>,
    pub contract_multiplier: u32,
}

impl Default for HedgeConfig {
    fn default() -> Self {
        Self {
            portfolio_value: 1_000_000.0,
            portfolio_volatility: 0.1137,
            risk_free_rate: 0.05,
            time_to_expiry: None,
            contract_multiplier: DEFAULT_CONTRACT_MULTIPLIER,
        }
    }
}

impl HedgeConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let file =
            File::open(path).with_context(|| format!("Failed to open config at {:?}", path))?;
        serde_yaml::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to parse config at {:?}", path))
    }

    pub fn time_to_expiry(
        &self,
        valuation: Option<NaiveDate>,
        expiry: Option<NaiveDate>,
    ) -> anyhow::Result<f64> {
        if let Some(tte) = self.time_to_expiry {
            return Ok(tte);
        }
        match (valuation, expiry) {
            (Some(valuation), Some(expiry)) => {
                let tte = HedgeParameters::years_until(&valuation, &expiry)
                    .with_context(|| format!("Expiry {expiry} is not after {valuation}"))?;
                log::info!("Time to expiry from {valuation} to {expiry}: {tte}");
                Ok(tte)
            }
            _ => {
                log::warn!(
                    "Valuation or expiry date is unknown, using {DEFAULT_TIME_TO_EXPIRY} year"
                );
                Ok(DEFAULT_TIME_TO_EXPIRY)
            }
        }
    }

    pub fn to_params(
        &self,
        spot: f64,
        valuation: Option<NaiveDate>,
        expiry: Option<NaiveDate>,
    ) -> anyhow::Result<HedgeParameters> {
        let tte = self.time_to_expiry(valuation, expiry)?;
        let params = HedgeParameters::new(
            spot,
            self.risk_free_rate,
            tte,
            self.portfolio_value,
            self.portfolio_volatility,
        )?
        .with_contract_multiplier(self.contract_multiplier)?;
        Ok(params)
    }
}
