use num::Zero;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// -----------------------------------------------------------------------------
// Positive
// -----------------------------------------------------------------------------
/// A value which is strictly greater than zero.
///
/// Incomparable values such as `NaN` are rejected as well
/// because they are not greater than zero.
///
/// # Example
/// ```
/// use qmath::num::Positive;
///
/// assert_eq!(Positive::new(0.5).map(Positive::get), Some(0.5));
/// assert!(Positive::new(0.0).is_none());
/// assert!(Positive::new(f64::NAN).is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, JsonSchema)]
#[serde(transparent)]
pub struct Positive<V>(V);

impl<V: PartialOrd + Zero> Positive<V> {
    #[inline]
    pub fn new(value: V) -> Option<Self> {
        if value > V::zero() {
            Some(Positive(value))
        } else {
            None
        }
    }
}

impl<V> Positive<V> {
    #[inline]
    pub fn into_inner(self) -> V {
        self.0
    }
}

impl<V: Copy> Positive<V> {
    #[inline]
    pub fn get(self) -> V {
        self.0
    }
}

impl<'de, V> Deserialize<'de> for Positive<V>
where
    V: Deserialize<'de> + PartialOrd + Zero,
{
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Self::new(V::deserialize(deserializer)?)
            .ok_or_else(|| serde::de::Error::custom("Positive value must be greater than zero"))
    }
}
