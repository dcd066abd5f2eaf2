//! # Error Types
//!
//! Shared error hierarchy for HerGenesis. Crate-specific errors live next
//! to the code that raises them and convert into [`HgError`] where a single
//! top-level type is needed.

use thiserror::Error;

/// Top-level error type for HerGenesis.
#[derive(Error, Debug)]
pub enum HgError {
    /// A value violated a domain invariant (out-of-range stat, unknown
    /// species or stage, malformed identifier).
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// Input validation failed.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// Errors raised by validated constructors in this crate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The species name is not one of the four catalog species.
    #[error("unknown species: {0:?}")]
    UnknownSpecies(String),

    /// An identifier failed validation.
    #[error("invalid {kind} {value:?}: {reason}")]
    InvalidIdentifier {
        /// Identifier kind ("pet id", "owner id").
        kind: &'static str,
        /// The rejected input.
        value: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A decimal ETH amount could not be parsed.
    #[error("invalid amount {input:?}: {reason}")]
    InvalidAmount {
        /// The rejected input.
        input: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A timestamp could not be parsed or was not UTC.
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),
}
