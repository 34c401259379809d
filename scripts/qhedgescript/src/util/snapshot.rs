use std::{collections::BTreeMap, fs::File, io::BufReader, path::Path};

use anyhow::Context;
use chrono::NaiveDate;
use qhedge::{
    datasrc::{OptionChainSrc, SpotSrc},
    OptionChain, OptionContract, OptionType,
};

// -----------------------------------------------------------------------------
// Snapshot
// -----------------------------------------------------------------------------
/// Market data saved from a quote provider, keyed by ticker symbol.
///
/// ```json
/// {
///   "as_of": "2024-06-03",
///   "underlyings": {
///     "SPY": {
///       "spot": 527.8,
///       "expiry": "2024-06-07",
///       "calls": [{ "strike": 520.0, "impliedVolatility": 0.14, "lastPrice": 9.1 }],
///       "puts": []
///     }
///   }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize, schemars::JsonSchema)]
pub struct Snapshot {
    /// Date the quotes were taken.
    #[serde(default)]
    pub as_of: Option<NaiveDate>,
    pub underlyings: BTreeMap<String, Underlying>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize, schemars::JsonSchema)]
pub struct Underlying {
    #[serde(default)]
    pub spot: Option<f64>,
    /// Nearest expiration, which all contracts below share.
    #[serde(default)]
    pub expiry: Option<NaiveDate>,
    #[serde(default)]
    pub calls: Vec<OptionContract>,
    #[serde(default)]
    pub puts: Vec<OptionContract>,
}

impl Snapshot {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let file =
            File::open(path).with_context(|| format!("Failed to open snapshot at {:?}", path))?;
        let snapshot: Self = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to parse snapshot at {:?}", path))?;
        log::info!(
            "Loaded snapshot as of {:?} with {} underlyings",
            snapshot.as_of,
            snapshot.underlyings.len()
        );
        Ok(snapshot)
    }

    fn underlying(&self, symbol: &str) -> anyhow::Result<&Underlying> {
        self.underlyings
            .get(symbol)
            .or_else(|| self.underlyings.get(&symbol.to_uppercase()))
            .with_context(|| format!("Symbol {symbol} is not in the snapshot"))
    }
}

impl SpotSrc for Snapshot {
    fn get_spot(&self, symbol: &str) -> anyhow::Result<f64> {
        self.underlying(symbol)?
            .spot
            .with_context(|| format!("No spot for {symbol} in the snapshot, pass it explicitly"))
    }
}

impl OptionChainSrc for Snapshot {
    fn get_option_chain(
        &self,
        symbol: &str,
        option_type: OptionType,
    ) -> anyhow::Result<OptionChain> {
        let underlying = self.underlying(symbol)?;
        let contracts = match option_type {
            OptionType::Call => underlying.calls.clone(),
            OptionType::Put => underlying.puts.clone(),
        };
        log::info!(
            "Loaded {} {option_type} contracts of {symbol} expiring {:?}",
            contracts.len(),
            underlying.expiry
        );
        let chain = OptionChain::new(option_type, contracts);
        Ok(match underlying.expiry {
            Some(expiry) => chain.with_expiry(expiry),
            None => chain,
        })
    }
}
