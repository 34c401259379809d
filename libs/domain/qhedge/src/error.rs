// -----------------------------------------------------------------------------
// HedgeError
// -----------------------------------------------------------------------------
/// Failures of the hedge engine.
///
/// All of them are local to a single evaluation; the caller decides whether
/// to abort or to retry against another data set.
#[derive(Debug, Clone, PartialEq, thiserror::Error, serde::Serialize, schemars::JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HedgeError {
    #[error("Invalid parameter '{name}': {value}")]
    InvalidParameter { name: &'static str, value: f64 },

    #[error("Invalid input '{name}': {value}")]
    InvalidInput { name: &'static str, value: f64 },

    #[error("Option chain is empty")]
    EmptyChain,

    #[error("No contract in the chain satisfies the selection policy")]
    NoCandidate,

    #[error("None of the {evaluated} contracts in the chain could be priced")]
    NoValidCandidate { evaluated: usize },

    #[error("Cannot size a hedge with delta {delta}")]
    DivisionByZero { delta: f64 },
}
