//! Completion service implementations for Flytrap.
//!
//! The decision engine talks to an opaque text-completion service
//! through the [`flytrap_core::Provider`] trait. The only production
//! implementation is Gemini (Google AI Studio); tests use mocks.

pub mod gemini;

pub use gemini::GeminiProvider;

use std::sync::Arc;

use flytrap_config::AppConfig;
use flytrap_core::Provider;
use flytrap_core::error::ProviderError;

/// Build the completion provider from config.
///
/// Fails fast when no Gemini key is configured — there is no useful
/// degraded mode for a honeypot that cannot generate replies.
pub fn build_from_config(config: &AppConfig) -> Result<Arc<dyn Provider>, ProviderError> {
    let key = config
        .gemini_api_key
        .as_deref()
        .filter(|k| !k.is_empty())
        .ok_or_else(|| {
            ProviderError::NotConfigured(
                "No Gemini API key — set GEMINI_API_KEY or gemini_api_key in config.toml".into(),
            )
        })?;

    Ok(Arc::new(GeminiProvider::new(key)))
}
