use crate::{OptionChain, OptionType};

// -----------------------------------------------------------------------------
// SpotSrc
// -----------------------------------------------------------------------------
/// Source of the current price of an underlying.
pub trait SpotSrc {
    fn get_spot(&self, symbol: &str) -> anyhow::Result<f64>;
}

// -----------------------------------------------------------------------------
// OptionChainSrc
// -----------------------------------------------------------------------------
/// Source of listed options of an underlying.
///
/// Implementations return the chain of the nearest expiration
/// with contracts in the order of the feed.
pub trait OptionChainSrc {
    fn get_option_chain(&self, symbol: &str, option_type: OptionType)
        -> anyhow::Result<OptionChain>;
}
