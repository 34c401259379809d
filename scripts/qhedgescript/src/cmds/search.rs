use qhedge::optimize::compare;

use crate::util::report::SearchReport;

use super::{Cmd, MarketArgs};

// -----------------------------------------------------------------------------
// Args
// -----------------------------------------------------------------------------
#[derive(Debug, clap::Args)]
pub struct Args {
    #[command(flatten)]
    pub market: MarketArgs,

    /// Strike to spot ratio of the compared hedge, 1.1 for calls and 0.9 for puts by default
    #[clap(long = "ratio")]
    pub ratio: Option<f64>,
}

impl Args {
    fn report(&self) -> anyhow::Result<SearchReport> {
        let inputs = self.market.load()?;
        let ratio = self
            .ratio
            .unwrap_or_else(|| inputs.chain.option_type.default_fixed_ratio());

        let comparison = compare(&inputs.chain, &inputs.params, ratio)?;
        log::info!(
            "Minimum cost at strike {} out of {} contracts",
            comparison.min_cost.best.strike,
            comparison.min_cost.evaluated
        );
        for r in &comparison.min_cost.rejected {
            log::warn!("Strike {} is not priced: {}", r.contract.strike, r.error);
        }
        Ok(SearchReport {
            symbol: self.market.symbol.clone(),
            spot: inputs.params.spot(),
            comparison,
        })
    }
}

impl Cmd for Args {
    fn run(&self) -> anyhow::Result<()> {
        let report = self.report()?;
        println!("{}", self.market.format.render(&report)?);
        Ok(())
    }
}
