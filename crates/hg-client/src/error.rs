//! Collaborator error types.

use serde::{Deserialize, Serialize};

/// Why the ledger refused or failed to confirm a mint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MintRejection {
    /// The player declined the signature request.
    UserDenied,
    /// The wallet cannot cover the mint cost.
    InsufficientFunds,
    /// The transaction was sent but not confirmed on-chain.
    Unconfirmed,
    /// Transport failure, timeout, or an unclassified gateway error.
    Network,
}

impl MintRejection {
    /// Player-facing message.
    pub fn message(&self) -> &'static str {
        match self {
            Self::UserDenied => "Transaction rejected by user.",
            Self::InsufficientFunds => "Insufficient funds for mint.",
            Self::Unconfirmed => "Transaction failed on-chain.",
            Self::Network => "Failed to mint on blockchain.",
        }
    }
}

impl std::fmt::Display for MintRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// Errors from the ledger collaborator.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// HTTP transport error.
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        endpoint: String,
        source: reqwest::Error,
    },
    /// The ledger returned a non-2xx status.
    #[error("ledger {endpoint} returned {status}: {body}")]
    ApiError {
        endpoint: String,
        status: u16,
        body: String,
    },
    /// The ledger refused the mint.
    #[error("mint rejected: {reason}")]
    Rejected { reason: MintRejection },
    /// Response deserialization failed.
    #[error("failed to deserialize response from {endpoint}: {source}")]
    Deserialization {
        endpoint: String,
        source: reqwest::Error,
    },
}

impl LedgerError {
    /// Classify the failure for the player.
    pub fn rejection(&self) -> MintRejection {
        match self {
            Self::Rejected { reason } => *reason,
            _ => MintRejection::Network,
        }
    }
}

/// Errors from the narrative collaborator.
#[derive(Debug, thiserror::Error)]
pub enum NarrativeError {
    /// No credential configured.
    #[error("narrative service is not configured")]
    NotConfigured,
    /// HTTP transport error.
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        endpoint: String,
        source: reqwest::Error,
    },
    /// The service returned a non-2xx status.
    #[error("narrative {endpoint} returned {status}: {body}")]
    ApiError {
        endpoint: String,
        status: u16,
        body: String,
    },
    /// Response deserialization failed.
    #[error("failed to deserialize response from {endpoint}: {source}")]
    Deserialization {
        endpoint: String,
        source: reqwest::Error,
    },
    /// The service answered without any text.
    #[error("narrative service returned no text")]
    EmptyResponse,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejection_messages() {
        assert_eq!(MintRejection::UserDenied.to_string(), "Transaction rejected by user.");
        assert_eq!(MintRejection::Network.to_string(), "Failed to mint on blockchain.");
    }

    #[test]
    fn rejection_codes_deserialize() {
        let r: MintRejection = serde_json::from_str("\"INSUFFICIENT_FUNDS\"").unwrap();
        assert_eq!(r, MintRejection::InsufficientFunds);
    }

    #[test]
    fn non_rejection_errors_classify_as_network() {
        let err = LedgerError::ApiError {
            endpoint: "POST /v1/mints".into(),
            status: 500,
            body: String::new(),
        };
        assert_eq!(err.rejection(), MintRejection::Network);
    }
}
