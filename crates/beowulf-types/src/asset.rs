//! Monetary amounts.
//!
//! Wire amounts are strings like `"1.00000 W"`. [`Asset`] is the parsed
//! form: a scaled integer mantissa, the fractional-digit count, and the
//! symbol. Parsing delegates to the canonical encoder's amount grammar so
//! the typed view and the signing payload can never disagree.

use beowulf_encoding::{parse_amount, EncodeError};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A parsed monetary amount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    /// Scaled integer value (all digits, decimal point removed).
    pub amount: i64,
    /// Number of fractional digits.
    pub precision: u8,
    /// Asset symbol, at most 7 bytes.
    pub symbol: String,
}

impl Asset {
    pub fn new(amount: i64, precision: u8, symbol: &str) -> Self {
        Self {
            amount,
            precision,
            symbol: symbol.to_string(),
        }
    }
}

impl FromStr for Asset {
    type Err = EncodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (amount, precision, symbol) = parse_amount(s)?;
        Ok(Self {
            amount,
            precision,
            symbol,
        })
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.precision == 0 {
            return write!(f, "{} {}", self.amount, self.symbol);
        }
        let scale = 10i64.pow(self.precision as u32);
        let sign = if self.amount < 0 { "-" } else { "" };
        let magnitude = self.amount.unsigned_abs();
        let scale = scale as u64;
        write!(
            f,
            "{}{}.{:0width$} {}",
            sign,
            magnitude / scale,
            magnitude % scale,
            self.symbol,
            width = self.precision as usize
        )
    }
}

impl Serialize for Asset {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Asset {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(D::Error::custom)
    }
}

/// Asset symbol descriptor used by token-creation operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetSymbol {
    pub decimals: u8,
    pub asset_name: String,
}
