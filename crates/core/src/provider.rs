//! Provider trait — the abstraction over the external completion service.
//!
//! The decision engine sends one prompt per turn and gets raw text back.
//! No structural guarantee is made about the content; the engine parses
//! it defensively. Implementations: Gemini (Google AI Studio), mocks.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ProviderError;

/// A single non-streaming completion request.
///
/// The entire conversation transcript is inlined into `prompt` each
/// call — the service itself is stateless between calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRequest {
    /// The model to use (e.g., "gemini-2.0-flash")
    pub model: String,

    /// The full prompt payload, system directive included
    pub prompt: String,

    /// Temperature (0.0 = deterministic, 1.0 = creative)
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Maximum tokens to generate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

fn default_temperature() -> f32 {
    0.7
}

/// The completion service trait.
///
/// One outbound call per decision-engine invocation, treated as a
/// network operation: the caller supplies timeouts and owns any retry
/// policy. No retries happen behind this trait.
#[async_trait]
pub trait Provider: Send + Sync {
    /// A human-readable name for this provider (e.g., "gemini").
    fn name(&self) -> &str;

    /// Send a prompt and get the raw completion text back.
    async fn generate(
        &self,
        request: GenerateRequest,
    ) -> std::result::Result<String, ProviderError>;

    /// Health check — can we reach the provider?
    async fn health_check(&self) -> std::result::Result<bool, ProviderError> {
        Ok(true)
    }
}
