//! Error types for the Flytrap domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error variant.

use thiserror::Error;

use crate::persona::Persona;

/// The top-level error type for all Flytrap operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Provider errors ---
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// The completion service call itself failed mid-turn. Carries the
    /// persona and turn count so the caller can log meaningfully.
    #[error("Completion service unavailable (persona: {persona}, turns: {turns}): {source}")]
    Upstream {
        persona: Persona,
        turns: usize,
        #[source]
        source: ProviderError,
    },

    // --- Configuration errors ---
    #[error("Configuration error: {message}")]
    Config { message: String },

    // --- Serialization ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // --- Generic ---
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors from the external completion service.
///
/// Transport-level failures (network, auth, quota) are never converted
/// into a fake decision — they surface to the caller via [`Error::Upstream`].
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("API request failed: {message} (status: {status_code})")]
    ApiError { status_code: u16, message: String },

    #[error("Rate limited by provider, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Model not found: {0}")]
    ModelNotFound(String),

    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Empty completion: {0}")]
    EmptyCompletion(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_error_displays_correctly() {
        let err = Error::Provider(ProviderError::ApiError {
            status_code: 429,
            message: "Too many requests".into(),
        });
        assert!(err.to_string().contains("429"));
        assert!(err.to_string().contains("Too many requests"));
    }

    #[test]
    fn upstream_error_carries_turn_context() {
        let err = Error::Upstream {
            persona: Persona::BusyProfessional,
            turns: 7,
            source: ProviderError::Network("connection refused".into()),
        };
        let text = err.to_string();
        assert!(text.contains("busy-professional"));
        assert!(text.contains("7"));
    }
}
