//! Chain amount strings such as `"2000.000000 VESTS"`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::blockchain::types::ComputationError;

/// A parsed chain amount.
#[derive(Debug, Clone, PartialEq)]
pub struct Asset {
    /// Numeric value.
    pub amount: f64,
    /// Digits after the decimal point in the wire form.
    pub precision: usize,
    /// Unit symbol ("STEEM", "SBD", "VESTS"); empty for bare numbers.
    pub symbol: String,
}

impl Asset {
    /// Create an asset from parts.
    pub fn new(amount: f64, precision: usize, symbol: impl Into<String>) -> Self {
        Self {
            amount,
            precision,
            symbol: symbol.into(),
        }
    }

    /// Whether the amount is exactly zero.
    pub fn is_zero(&self) -> bool {
        self.amount == 0.0
    }
}

impl FromStr for Asset {
    type Err = ComputationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let number = parts
            .next()
            .ok_or_else(|| ComputationError::InvalidAsset(s.to_string()))?;
        let amount = number
            .parse::<f64>()
            .ok()
            .filter(|amount| amount.is_finite())
            .ok_or_else(|| ComputationError::InvalidAsset(s.to_string()))?;
        let precision = number.split_once('.').map(|(_, frac)| frac.len()).unwrap_or(0);
        let symbol = parts.next().unwrap_or_default().to_string();

        Ok(Self {
            amount,
            precision,
            symbol,
        })
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.symbol.is_empty() {
            write!(f, "{:.*}", self.precision, self.amount)
        } else {
            write!(f, "{:.*} {}", self.precision, self.amount, self.symbol)
        }
    }
}

impl Serialize for Asset {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Asset {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_symbol() {
        let a: Asset = "2000.000000 VESTS".parse().unwrap();
        assert_eq!(a.amount, 2000.0);
        assert_eq!(a.precision, 6);
        assert_eq!(a.symbol, "VESTS");
        assert_eq!(a.to_string(), "2000.000000 VESTS");
    }

    #[test]
    fn test_parse_bare_number() {
        let a: Asset = "0".parse().unwrap();
        assert!(a.is_zero());
        assert_eq!(a.symbol, "");
        assert_eq!(a.to_string(), "0");
    }

    #[test]
    fn test_rejects_garbage() {
        assert_eq!(
            "".parse::<Asset>(),
            Err(ComputationError::InvalidAsset(String::new()))
        );
        assert!("abc STEEM".parse::<Asset>().is_err());
    }

    #[test]
    fn test_rejects_non_finite_amounts() {
        for raw in ["NaN STEEM", "inf VESTS", "-infinity SBD"] {
            assert_eq!(
                raw.parse::<Asset>(),
                Err(ComputationError::InvalidAsset(raw.to_string()))
            );
        }
        assert!(serde_json::from_str::<Asset>("\"nan VESTS\"").is_err());
    }

    #[test]
    fn test_serde_uses_wire_form() {
        let a: Asset = serde_json::from_str("\"1.500 SBD\"").unwrap();
        assert_eq!(a.amount, 1.5);
        assert_eq!(serde_json::to_string(&a).unwrap(), "\"1.500 SBD\"");
    }
}
