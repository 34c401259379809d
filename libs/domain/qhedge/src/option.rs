use chrono::NaiveDate;

// -----------------------------------------------------------------------------
// OptionType
// -----------------------------------------------------------------------------
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    serde::Serialize,
    serde::Deserialize,
    schemars::JsonSchema,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum OptionType {
    Call,
    Put,
}

impl OptionType {
    /// Strike-to-spot ratio used by the fixed-ratio hedge
    /// which is reported alongside the minimum-cost one.
    #[inline]
    pub fn default_fixed_ratio(&self) -> f64 {
        match self {
            OptionType::Call => 1.1,
            OptionType::Put => 0.9,
        }
    }
}

// -----------------------------------------------------------------------------
// OptionContract
// -----------------------------------------------------------------------------
/// A single listed option quote.
///
/// Fields missing from the feed are held as `NaN`,
/// which every policy of this crate treats as invalid.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, schemars::JsonSchema)]
pub struct OptionContract {
    pub strike: f64,
    pub implied_volatility: f64,
    pub last_price: f64,
}

//
// ser/de
//
impl<'de> serde::Deserialize<'de> for OptionContract {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        struct Inner {
            #[serde(default)]
            strike: Option<f64>,
            #[serde(default, alias = "impliedVolatility")]
            implied_volatility: Option<f64>,
            #[serde(default, alias = "lastPrice")]
            last_price: Option<f64>,
        }
        let Inner {
            strike,
            implied_volatility,
            last_price,
        } = Inner::deserialize(deserializer)?;
        Ok(Self {
            strike: strike.unwrap_or(f64::NAN),
            implied_volatility: implied_volatility.unwrap_or(f64::NAN),
            last_price: last_price.unwrap_or(f64::NAN),
        })
    }
}

//
// methods
//
impl OptionContract {
    #[inline]
    pub fn new(strike: f64, implied_volatility: f64, last_price: f64) -> Self {
        Self {
            strike,
            implied_volatility,
            last_price,
        }
    }

    /// Whether the implied volatility is usable for a delta calculation.
    #[inline]
    pub fn has_positive_vol(&self) -> bool {
        self.implied_volatility > 0.0
    }

    /// Whether both the strike and the implied volatility are present and positive.
    #[inline]
    pub fn is_quotable(&self) -> bool {
        self.strike > 0.0 && self.strike.is_finite() && self.has_positive_vol()
    }
}

// -----------------------------------------------------------------------------
// OptionChain
// -----------------------------------------------------------------------------
/// Contracts of one option type for a single expiration, in feed order.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize, schemars::JsonSchema)]
pub struct OptionChain {
    pub option_type: OptionType,
    #[serde(default)]
    pub expiry: Option<NaiveDate>,
    pub contracts: Vec<OptionContract>,
}

impl OptionChain {
    #[inline]
    pub fn new(option_type: OptionType, contracts: Vec<OptionContract>) -> Self {
        Self {
            option_type,
            expiry: None,
            contracts,
        }
    }

    #[inline]
    pub fn with_expiry(mut self, expiry: NaiveDate) -> Self {
        self.expiry = Some(expiry);
        self
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.contracts.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.contracts.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, OptionContract> {
        self.contracts.iter()
    }
}
