use std::fmt::{self, Display, Formatter};

use clap::ValueEnum;
use qhedge::{optimize::HedgeComparison, select::Selection, HedgeQuote, OptionType};

// -----------------------------------------------------------------------------
// Format
// -----------------------------------------------------------------------------
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
#[clap(rename_all = "snake_case")]
pub enum Format {
    Text,
    Json,
}

impl Format {
    pub fn render<R: Display + serde::Serialize>(&self, report: &R) -> anyhow::Result<String> {
        match self {
            Format::Text => Ok(report.to_string()),
            Format::Json => Ok(serde_json::to_string_pretty(report)?),
        }
    }
}

// -----------------------------------------------------------------------------
// PickReport
// -----------------------------------------------------------------------------
/// Hedge with a single contract chosen by a selection policy.
#[derive(Debug, Clone, PartialEq, serde::Serialize, schemars::JsonSchema)]
pub struct PickReport {
    pub symbol: String,
    pub spot: f64,
    pub policy: Selection,
    pub quote: HedgeQuote,
}

impl Display for PickReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} ({}: {:.2})", self.symbol, self.quote.option_type, self.spot)?;
        write_quote(f, &self.quote)
    }
}

// -----------------------------------------------------------------------------
// SearchReport
// -----------------------------------------------------------------------------
/// Cheapest hedge of the chain compared with the fixed-ratio one.
#[derive(Debug, Clone, PartialEq, serde::Serialize, schemars::JsonSchema)]
pub struct SearchReport {
    pub symbol: String,
    pub spot: f64,
    pub comparison: HedgeComparison,
}

impl Display for SearchReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let cmp = &self.comparison;
        let ratio = format!("{:.0}%", 100.0 * cmp.ratio);
        let option_type = cmp.fixed_ratio.option_type;
        writeln!(f, "{} ({}: {:.2})", self.symbol, option_type, self.spot)?;

        writeln!(f, "\nMinimum Cost Strategy:")?;
        write_quote(f, &cmp.min_cost.best)?;
        writeln!(f, "Contracts Evaluated: {}", cmp.min_cost.evaluated)?;
        for r in &cmp.min_cost.rejected {
            writeln!(f, "Rejected Strike {}: {}", r.contract.strike, r.error)?;
        }

        writeln!(f, "\n{ratio} Strike Price Strategy:")?;
        write_quote(f, &cmp.fixed_ratio)?;

        writeln!(f, "\nComparison:")?;
        writeln!(f, "Minimum Cost: ${:.2}", cmp.min_cost.best.total_cost)?;
        writeln!(f, "{ratio} Strategy Cost: ${:.2}", cmp.fixed_ratio.total_cost)?;
        writeln!(f, "Difference: ${:.2}", cmp.difference)
    }
}

fn write_quote(f: &mut Formatter<'_>, quote: &HedgeQuote) -> fmt::Result {
    let kind = match quote.option_type {
        OptionType::Call => "Call",
        OptionType::Put => "Put",
    };
    writeln!(f, "Strike Price: {}", quote.strike)?;
    writeln!(f, "{kind} Options to Hedge: {:.2}", quote.contracts_required)?;
    writeln!(f, "Option Delta: {:.4}", quote.delta)?;
    writeln!(f, "Option Price: ${:.2}", quote.option_price)?;
    writeln!(f, "Total Cost: ${:.2}", quote.total_cost)?;
    writeln!(f, "Moneyness: {:.2}%", 100.0 * quote.moneyness)
}
