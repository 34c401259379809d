pub mod pick;
pub mod schema;
pub mod search;

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::ValueEnum;
use qhedge::{
    datasrc::{OptionChainSrc, SpotSrc},
    HedgeParameters, OptionChain, OptionType,
};

use crate::util::{config::HedgeConfig, report::Format, snapshot::Snapshot};

// -----------------------------------------------------------------------------
// Cmd
// -----------------------------------------------------------------------------
pub trait Cmd {
    fn run(&self) -> anyhow::Result<()>;
}

// -----------------------------------------------------------------------------
// Commands
// -----------------------------------------------------------------------------
#[derive(Debug, clap::Subcommand)]
#[clap(rename_all = "snake_case")]
pub enum Commands {
    /// Hedge with the contract chosen by a strike selection policy
    Pick(pick::Args),
    /// Search the cheapest hedge and compare it with the fixed-ratio one
    Search(search::Args),
    /// Print JSON schemas of inputs and reports
    Schema(schema::Args),
}

impl Cmd for Commands {
    fn run(&self) -> anyhow::Result<()> {
        match self {
            Commands::Pick(args) => args.run(),
            Commands::Search(args) => args.run(),
            Commands::Schema(args) => args.run(),
        }
    }
}

// -----------------------------------------------------------------------------
// OptionTypeArg
// -----------------------------------------------------------------------------
#[derive(ValueEnum, Debug, Clone, Copy)]
#[clap(rename_all = "snake_case")]
pub enum OptionTypeArg {
    Call,
    Put,
}

impl From<OptionTypeArg> for OptionType {
    fn from(arg: OptionTypeArg) -> Self {
        match arg {
            OptionTypeArg::Call => OptionType::Call,
            OptionTypeArg::Put => OptionType::Put,
        }
    }
}

// -----------------------------------------------------------------------------
// MarketArgs
// -----------------------------------------------------------------------------
#[derive(Debug, clap::Args)]
pub struct MarketArgs {
    /// Market snapshot file in JSON
    #[clap(long = "snapshot")]
    pub snapshot: PathBuf,

    /// Ticker symbol of the underlying
    #[clap(long = "symbol")]
    pub symbol: String,

    /// Type of options to hedge with
    #[clap(long = "option-type", value_enum)]
    pub option_type: OptionTypeArg,

    /// Spot overriding the snapshot, e.g. an index level
    #[clap(long = "spot")]
    pub spot: Option<f64>,

    /// Hedge config file in YAML
    #[clap(long = "config")]
    pub config: Option<PathBuf>,

    /// Valuation date as YYYY-MM-DD, defaults to the snapshot date
    #[clap(long = "valuation-date")]
    pub valuation_date: Option<NaiveDate>,

    /// Format of the report
    #[clap(long = "format", value_enum, default_value_t = Format::Text)]
    pub format: Format,
}

/// Chain and hedge parameters of one run.
pub struct HedgeInputs {
    pub chain: OptionChain,
    pub params: HedgeParameters,
}

impl MarketArgs {
    pub fn load(&self) -> anyhow::Result<HedgeInputs> {
        let snapshot = Snapshot::load(&self.snapshot)?;
        let config = match &self.config {
            Some(path) => HedgeConfig::load(path)?,
            None => HedgeConfig::default(),
        };
        let valuation = self.valuation_date.or(snapshot.as_of);
        self.resolve(&snapshot, &config, valuation)
    }

    fn resolve<S: SpotSrc + OptionChainSrc>(
        &self,
        src: &S,
        config: &HedgeConfig,
        valuation: Option<NaiveDate>,
    ) -> anyhow::Result<HedgeInputs> {
        let chain = src.get_option_chain(&self.symbol, self.option_type.into())?;
        let spot = match self.spot {
            Some(spot) => spot,
            None => src.get_spot(&self.symbol)?,
        };
        let params = config.to_params(spot, valuation, chain.expiry)?;
        log::info!("Hedge parameters: {:?}", params);
        Ok(HedgeInputs { chain, params })
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[derive(Debug, Parser)]
    struct TestCli {
        #[command(subcommand)]
        command: Commands,
    }

    struct FixedSrc;

    impl SpotSrc for FixedSrc {
        fn get_spot(&self, _: &str) -> anyhow::Result<f64> {
            Ok(100.0)
        }
    }

    impl OptionChainSrc for FixedSrc {
        fn get_option_chain(
            &self,
            _: &str,
            option_type: OptionType,
        ) -> anyhow::Result<OptionChain> {
            let expiry = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
            Ok(OptionChain::new(option_type, vec![]).with_expiry(expiry))
        }
    }

    fn market_args(args: &[&str]) -> MarketArgs {
        let base = ["qhedgescript", "search", "--snapshot", "s.json", "--symbol", "SPY"];
        let cli = TestCli::parse_from(base.iter().chain(args));
        match cli.command {
            Commands::Search(args) => args.market,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_parse() {
        let tested = market_args(&["--option-type", "put", "--spot", "18.5"]);

        assert_eq!(tested.symbol, "SPY");
        assert!(matches!(tested.option_type, OptionTypeArg::Put));
        assert_eq!(tested.spot, Some(18.5));
        assert_eq!(tested.format, Format::Text);
        assert_eq!(tested.valuation_date, None);
    }

    #[test]
    fn test_resolve_derives_time_to_expiry() {
        let args = market_args(&["--option-type", "call"]);
        let valuation = NaiveDate::from_ymd_opt(2024, 1, 1);

        let tested = args
            .resolve(&FixedSrc, &HedgeConfig::default(), valuation)
            .unwrap();

        assert_eq!(tested.chain.option_type, OptionType::Call);
        assert_eq!(tested.params.spot(), 100.0);
        approx::assert_abs_diff_eq!(tested.params.time_to_expiry(), 366.0 / 365.0);
    }

    #[test]
    fn test_resolve_spot_override() {
        let args = market_args(&["--option-type", "put", "--spot", "18.5"]);

        let tested = args.resolve(&FixedSrc, &HedgeConfig::default(), None).unwrap();

        assert_eq!(tested.params.spot(), 18.5);
        assert_eq!(tested.params.time_to_expiry(), 1.0);
    }
}
