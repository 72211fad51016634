/// Exact decimal for provider prices.
///
/// Wraps [`rust_decimal::Decimal`]. The provider sends most prices as JSON
/// strings (`"189.98000"`) but some endpoints use bare numbers; both decode.
/// Serializes as a string in JSON.
use std::fmt;
use std::str::FromStr;

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::TwelveDataError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MarketDecimal(Decimal);

impl MarketDecimal {
    pub const ZERO: Self = Self(Decimal::ZERO);

    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    /// Access the inner `Decimal`.
    pub fn inner(&self) -> &Decimal {
        &self.0
    }

    /// Consume and return the inner `Decimal`.
    pub fn into_inner(self) -> Decimal {
        self.0
    }
}

impl fmt::Display for MarketDecimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for MarketDecimal {
    type Err = TwelveDataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Decimal::from_str(trimmed)
            .or_else(|_| Decimal::from_scientific(trimmed))
            .map(Self)
            .map_err(|e| TwelveDataError::Other(format!("Invalid decimal '{s}': {e}")))
    }
}

impl From<Decimal> for MarketDecimal {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl From<MarketDecimal> for Decimal {
    fn from(value: MarketDecimal) -> Self {
        value.0
    }
}

impl Serialize for MarketDecimal {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_string())
    }
}

impl<'de> Deserialize<'de> for MarketDecimal {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        use serde::de;

        struct StringOrNumber;
        impl<'de> de::Visitor<'de> for StringOrNumber {
            type Value = MarketDecimal;
            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a decimal number or a string containing one")
            }
            fn visit_str<E: de::Error>(self, v: &str) -> Result<MarketDecimal, E> {
                v.parse().map_err(de::Error::custom)
            }
            fn visit_i64<E: de::Error>(self, v: i64) -> Result<MarketDecimal, E> {
                Ok(MarketDecimal(Decimal::from(v)))
            }
            fn visit_u64<E: de::Error>(self, v: u64) -> Result<MarketDecimal, E> {
                Ok(MarketDecimal(Decimal::from(v)))
            }
            fn visit_f64<E: de::Error>(self, v: f64) -> Result<MarketDecimal, E> {
                // Shortest round-trip text keeps the digits the provider sent.
                Decimal::from_str(&v.to_string())
                    .ok()
                    .or_else(|| Decimal::from_f64(v))
                    .map(MarketDecimal)
                    .ok_or_else(|| de::Error::custom(format!("{v} is not representable")))
            }
        }
        deserializer.deserialize_any(StringOrNumber)
    }
}
