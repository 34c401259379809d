pub mod datasrc;
pub mod daycount;
pub mod delta;
pub mod optimize;
pub mod select;
pub mod sizing;

mod error;
mod option;
mod params;
mod quote;

pub use error::HedgeError;
pub use option::{OptionChain, OptionContract, OptionType};
pub use params::{HedgeParameters, DEFAULT_CONTRACT_MULTIPLIER};
pub use quote::HedgeQuote;
