//! # Domain Identity Newtypes
//!
//! Newtype wrappers for pet and owner identifiers. You cannot pass an
//! `OwnerId` where a `PetId` is expected.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

/// Maximum accepted length of an owner identifier.
const OWNER_ID_MAX_LEN: usize = 128;

/// Unique identifier for a pet. Assigned by the ledger at mint time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PetId(pub Uuid);

impl PetId {
    /// Generate a new random pet identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for PetId {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for PetId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.strip_prefix("pet:").unwrap_or(s);
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|e| ValidationError::InvalidIdentifier {
                kind: "pet id",
                value: s.to_string(),
                reason: e.to_string(),
            })
    }
}

impl std::fmt::Display for PetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "pet:{}", self.0)
    }
}

/// Identifier of the player owning an inventory, typically a wallet address.
///
/// Hex wallet addresses (`0x…`) are lowercased on construction so that
/// checksummed and plain spellings resolve to the same inventory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OwnerId(String);

impl OwnerId {
    /// Create a validated owner identifier.
    pub fn new(raw: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = raw.into();
        let trimmed = raw.trim();
        let invalid = |reason: &str| ValidationError::InvalidIdentifier {
            kind: "owner id",
            value: raw.clone(),
            reason: reason.to_string(),
        };
        if trimmed.is_empty() {
            return Err(invalid("must not be empty"));
        }
        if trimmed.len() > OWNER_ID_MAX_LEN {
            return Err(invalid("must not exceed 128 characters"));
        }
        if !trimmed
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, ':' | '-' | '_' | '.'))
        {
            return Err(invalid("may only contain ASCII letters, digits, ':', '-', '_' or '.'"));
        }
        let normalized = if trimmed.starts_with("0x") || trimmed.starts_with("0X") {
            trimmed.to_ascii_lowercase()
        } else {
            trimmed.to_string()
        };
        Ok(Self(normalized))
    }

    /// Return the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for OwnerId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<OwnerId> for String {
    fn from(value: OwnerId) -> Self {
        value.0
    }
}

impl FromStr for OwnerId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl std::fmt::Display for OwnerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pet_id_display_has_prefix() {
        let id = PetId::new();
        assert!(id.to_string().starts_with("pet:"));
    }

    #[test]
    fn pet_id_parses_with_and_without_prefix() {
        let id = PetId::new();
        assert_eq!(id.to_string().parse::<PetId>().unwrap(), id);
        assert_eq!(id.as_uuid().to_string().parse::<PetId>().unwrap(), id);
    }

    #[test]
    fn pet_id_rejects_garbage() {
        assert!("pet-1700000000".parse::<PetId>().is_err());
    }

    #[test]
    fn owner_id_lowercases_hex_addresses() {
        let a = OwnerId::new("0xAbCDef0000000000000000000000000000000001").unwrap();
        let b = OwnerId::new("0xabcdef0000000000000000000000000000000001").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn owner_id_keeps_case_for_other_schemes() {
        let id = OwnerId::new("player:Alice").unwrap();
        assert_eq!(id.as_str(), "player:Alice");
    }

    #[test]
    fn owner_id_rejects_empty_and_whitespace() {
        assert!(OwnerId::new("").is_err());
        assert!(OwnerId::new("   ").is_err());
        assert!(OwnerId::new("two words").is_err());
    }

    #[test]
    fn owner_id_rejects_overlong() {
        assert!(OwnerId::new("a".repeat(129)).is_err());
        assert!(OwnerId::new("a".repeat(128)).is_ok());
    }

    #[test]
    fn owner_id_serde_validates() {
        let ok: OwnerId = serde_json::from_str("\"0xABC\"").unwrap();
        assert_eq!(ok.as_str(), "0xabc");
        assert!(serde_json::from_str::<OwnerId>("\"\"").is_err());
    }

    proptest::proptest! {
        #[test]
        fn hex_owner_spellings_collapse(addr in "0x[0-9a-fA-F]{40}") {
            let upper = OwnerId::new(addr.to_ascii_uppercase().replacen("0X", "0x", 1)).unwrap();
            let lower = OwnerId::new(addr.to_ascii_lowercase()).unwrap();
            proptest::prop_assert_eq!(upper, lower);
        }
    }
}
