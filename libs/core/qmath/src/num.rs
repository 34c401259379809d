mod bounded;
mod elementary_fn;

pub use bounded::Positive;
pub use elementary_fn::Erfc;
