use clap::ValueEnum;
use qhedge::{
    select::{quote_selected, ClosestStrike, OutOfTheMoney, Selection},
    OptionType,
};

use crate::util::report::PickReport;

use super::{Cmd, MarketArgs};

// -----------------------------------------------------------------------------
// Policy
// -----------------------------------------------------------------------------
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
#[clap(rename_all = "snake_case")]
pub enum Policy {
    /// Highest strike at or below the target
    Otm,
    /// Strike nearest to the target
    Closest,
}

// -----------------------------------------------------------------------------
// Args
// -----------------------------------------------------------------------------
#[derive(Debug, clap::Args)]
pub struct Args {
    #[command(flatten)]
    pub market: MarketArgs,

    /// Strike selection policy, otm for calls and closest for puts by default
    #[clap(long = "policy", value_enum)]
    pub policy: Option<Policy>,

    /// Target strike as a fraction of spot, 0.9 for calls and 1.1 for puts by default
    #[clap(long = "percentage")]
    pub percentage: Option<f64>,
}

impl Args {
    fn selection(&self, option_type: OptionType) -> Selection {
        let default = Selection::default_for(option_type);
        let percentage = self.percentage.unwrap_or(default.percentage());
        let policy = self.policy.unwrap_or(match default {
            Selection::OutOfTheMoney(_) => Policy::Otm,
            Selection::ClosestStrike(_) => Policy::Closest,
        });
        match policy {
            Policy::Otm => Selection::OutOfTheMoney(OutOfTheMoney { percentage }),
            Policy::Closest => Selection::ClosestStrike(ClosestStrike { percentage }),
        }
    }

    fn report(&self) -> anyhow::Result<PickReport> {
        let inputs = self.market.load()?;
        let policy = self.selection(inputs.chain.option_type);
        log::info!("Selecting strike with {:?}", policy);

        let quote = quote_selected(&inputs.chain, &inputs.params, &policy)?;
        Ok(PickReport {
            symbol: self.market.symbol.clone(),
            spot: inputs.params.spot(),
            policy,
            quote,
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
