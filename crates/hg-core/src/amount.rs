//! # ETH Amounts
//!
//! Mint costs are configured as decimal ETH strings (`"0.0001"`) and held as
//! an integer count of wei. Amounts must be strings or integers on the wire;
//! floating-point values are never accepted, so a cost never drifts by a
//! rounding error between configuration and the ledger request.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ValidationError;

/// Decimal places between ETH and wei.
pub const WEI_DECIMALS: u32 = 18;

const WEI_PER_ETH: u128 = 1_000_000_000_000_000_000;

/// A non-negative ETH amount, stored as wei.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct EthAmount(u128);

impl EthAmount {
    /// Zero ETH.
    pub const ZERO: EthAmount = EthAmount(0);

    /// From a raw wei count.
    pub const fn from_wei(wei: u128) -> Self {
        Self(wei)
    }

    /// The amount in wei.
    pub fn wei(&self) -> u128 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Parse a decimal ETH string such as `"0.001"` or `"2"`.
    ///
    /// At most 18 fractional digits. Signs, exponents, and separators are
    /// rejected.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let invalid = |reason: &str| ValidationError::InvalidAmount {
            input: input.to_string(),
            reason: reason.to_string(),
        };
        let s = input.trim();
        if s.is_empty() {
            return Err(invalid("must not be empty"));
        }
        let (whole, frac) = match s.split_once('.') {
            Some((w, f)) => (w, f),
            None => (s, ""),
        };
        if whole.is_empty() && frac.is_empty() {
            return Err(invalid("must contain at least one digit"));
        }
        if !whole.chars().all(|c| c.is_ascii_digit()) || !frac.chars().all(|c| c.is_ascii_digit())
        {
            return Err(invalid("must be a plain decimal number"));
        }
        if frac.len() > WEI_DECIMALS as usize {
            return Err(invalid("more than 18 fractional digits"));
        }

        let whole_wei = if whole.is_empty() {
            0u128
        } else {
            whole
                .parse::<u128>()
                .ok()
                .and_then(|w| w.checked_mul(WEI_PER_ETH))
                .ok_or_else(|| invalid("amount too large"))?
        };
        let frac_wei = if frac.is_empty() {
            0u128
        } else {
            let digits = frac.parse::<u128>().map_err(|_| invalid("amount too large"))?;
            digits * 10u128.pow(WEI_DECIMALS - frac.len() as u32)
        };
        whole_wei
            .checked_add(frac_wei)
            .map(Self)
            .ok_or_else(|| invalid("amount too large"))
    }
}

impl std::fmt::Display for EthAmount {
    /// Minimal decimal form: `"0.0001"`, `"1"`, `"1.5"`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let whole = self.0 / WEI_PER_ETH;
        let frac = self.0 % WEI_PER_ETH;
        if frac == 0 {
            return write!(f, "{whole}");
        }
        let padded = format!("{frac:018}");
        write!(f, "{whole}.{}", padded.trim_end_matches('0'))
    }
}

impl std::str::FromStr for EthAmount {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for EthAmount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for EthAmount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}
