//! The decision engine — the single entry point composing persona
//! selection, prompt construction, the completion call, defensive
//! output parsing, intelligence extraction, and metrics.

use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, info, warn};

use flytrap_core::error::{Error, Result};
use flytrap_core::provider::{GenerateRequest, Provider};
use flytrap_core::{HoneypotTurnResult, Message, ScamDecision};

use crate::extractor::extract;
use crate::metrics::compute_metrics;
use crate::persona::select_persona;
use crate::prompt::build_prompt;

/// Orchestrates one honeypot turn per call. Stateless across calls:
/// history comes in from the caller and goes back out extended inside
/// the metrics, never retained here.
pub struct DecisionEngine {
    provider: Arc<dyn Provider>,
    model: String,
    temperature: f32,
    max_tokens: Option<u32>,
}

impl DecisionEngine {
    /// Create a new decision engine.
    pub fn new(provider: Arc<dyn Provider>, model: impl Into<String>, temperature: f32) -> Self {
        Self {
            provider,
            model: model.into(),
            temperature,
            max_tokens: None,
        }
    }

    /// Set the max tokens per completion.
    pub fn with_max_tokens(mut self, max: u32) -> Self {
        self.max_tokens = Some(max);
        self
    }

    /// Process one incoming scammer message against the supplied
    /// history snapshot and produce the full turn result.
    ///
    /// Transport failures from the completion service propagate as
    /// [`Error::Upstream`]; malformed completion *content* never fails —
    /// it is absorbed by the fallback decision.
    pub async fn decide(
        &self,
        history: &[Message],
        latest_message: &str,
    ) -> Result<HoneypotTurnResult> {
        let persona = select_persona(history, latest_message);
        info!(
            persona = %persona,
            history_len = history.len(),
            "Processing honeypot turn"
        );

        let prompt = build_prompt(persona, history, latest_message);
        let raw = self
            .provider
            .generate(GenerateRequest {
                model: self.model.clone(),
                prompt,
                temperature: self.temperature,
                max_tokens: self.max_tokens,
            })
            .await
            .map_err(|source| Error::Upstream {
                persona,
                turns: history.len(),
                source,
            })?;

        let decision = parse_decision(&raw);

        // Full-conversation re-scan, not incremental.
        let full_text: String = history
            .iter()
            .map(|m| m.content.as_str())
            .chain(std::iter::once(latest_message))
            .collect::<Vec<_>>()
            .join("\n");
        let intelligence = extract(&full_text);

        let mut updated = history.to_vec();
        updated.push(Message::scammer(latest_message));
        let metrics = compute_metrics(&updated, persona);

        debug!(
            scam_detected = decision.scam_detected,
            confidence = decision.confidence_score,
            identifiers = intelligence.count(),
            "Turn decided"
        );

        Ok(HoneypotTurnResult::success(decision, metrics, intelligence))
    }
}

/// The camelCase contract the model is instructed to emit.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDecision {
    scam_detected: bool,
    confidence_score: f64,
    agent_response: String,
    #[serde(default)]
    reasoning: Option<String>,
}

/// Parse the model's raw text into a decision. Never fails.
///
/// The model may prepend or append commentary around the JSON object,
/// so this scans for the *outermost* object — first `{` to last `}`
/// inclusive. Any decode failure yields the fixed fallback.
fn parse_decision(raw: &str) -> ScamDecision {
    let Some(object) = outermost_object(raw) else {
        warn!("No JSON object in completion output, using fallback decision");
        return ScamDecision::fallback();
    };

    match serde_json::from_str::<RawDecision>(object) {
        Ok(parsed) => ScamDecision {
            scam_detected: parsed.scam_detected,
            confidence_score: parsed.confidence_score.clamp(0.0, 1.0),
            agent_response: parsed.agent_response,
            reasoning: parsed.reasoning,
        },
        Err(e) => {
            warn!(error = %e, "Completion output failed to decode, using fallback decision");
            ScamDecision::fallback()
        }
    }
}

fn outermost_object(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&raw[start..=end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use flytrap_core::Persona;
    use flytrap_core::error::ProviderError;

    /// A mock completion service that returns a fixed response or error.
    struct MockProvider {
        response: std::result::Result<String, ProviderError>,
    }

    impl MockProvider {
        fn text(response: &str) -> Arc<Self> {
            Arc::new(Self {
                response: Ok(response.into()),
            })
        }

        fn failing(err: ProviderError) -> Arc<Self> {
            Arc::new(Self {
                response: Err(err),
            })
        }
    }

    #[async_trait]
    impl Provider for MockProvider {
        fn name(&self) -> &str {
            "mock"
        }

        async fn generate(
            &self,
            _request: GenerateRequest,
        ) -> std::result::Result<String, ProviderError> {
            self.response.clone()
        }
    }

    fn engine(provider: Arc<dyn Provider>) -> DecisionEngine {
        DecisionEngine::new(provider, "mock-model", 0.7).with_max_tokens(1024)
    }

    const GOOD_JSON: &str = r#"{"scamDetected": true, "confidenceScore": 0.85,
        "agentResponse": "Oh dear, which bank was that again?",
        "reasoning": "prize pressure"}"#;

    #[tokio::test]
    async fn clean_json_is_parsed() {
        let result = engine(MockProvider::text(GOOD_JSON))
            .decide(&[], "You won 1 crore! Share your bank account number.")
            .await
            .unwrap();

        assert_eq!(result.status, "success");
        assert!(result.scam_detected);
        assert!((result.confidence_score - 0.85).abs() < f64::EPSILON);
        assert_eq!(result.agent_response, "Oh dear, which bank was that again?");
        assert_eq!(result.reasoning.as_deref(), Some("prize pressure"));
    }

    #[tokio::test]
    async fn commentary_around_json_is_tolerated() {
        let wrapped = format!("Sure! Here is the analysis:\n```json\n{GOOD_JSON}\n```\nDone.");
        let result = engine(MockProvider::text(&wrapped))
            .decide(&[], "hello")
            .await
            .unwrap();
        assert!(result.scam_detected);
        assert_eq!(result.agent_response, "Oh dear, which bank was that again?");
    }

    #[tokio::test]
    async fn garbage_output_falls_back_without_raising() {
        let result = engine(MockProvider::text("I cannot comply with that request."))
            .decide(&[], "send otp")
            .await
            .unwrap();

        assert_eq!(result.status, "success");
        assert!(result.scam_detected);
        assert!((result.confidence_score - 0.7).abs() < f64::EPSILON);
        assert_eq!(result.reasoning.as_deref(), Some("fallback: parse failure"));
    }

    #[tokio::test]
    async fn wrong_field_types_fall_back() {
        let result = engine(MockProvider::text(r#"{"scamDetected": "yes", "confidenceScore": 1}"#))
            .decide(&[], "hello")
            .await
            .unwrap();
        assert_eq!(result.reasoning.as_deref(), Some("fallback: parse failure"));
    }

    #[tokio::test]
    async fn out_of_range_confidence_is_clamped() {
        let json = r#"{"scamDetected": true, "confidenceScore": 3.5,
            "agentResponse": "ok", "reasoning": "r"}"#;
        let result = engine(MockProvider::text(json)).decide(&[], "hi").await.unwrap();
        assert!((result.confidence_score - 1.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn provider_failure_propagates_with_context() {
        let err = engine(MockProvider::failing(ProviderError::Network("boom".into())))
            .decide(&[Message::scammer("a"), Message::agent("b")], "hurry now")
            .await
            .err()
            .unwrap();

        match err {
            Error::Upstream { persona, turns, .. } => {
                assert_eq!(persona, Persona::BusyProfessional);
                assert_eq!(turns, 2);
            }
            other => panic!("expected Upstream, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn metrics_cover_the_extended_history() {
        let history = vec![
            Message::scammer("You won a prize"),
            Message::agent("Really? How do I claim?"),
        ];
        let result = engine(MockProvider::text(GOOD_JSON))
            .decide(&history, "Give me your details")
            .await
            .unwrap();

        // 2 prior + the appended latest (role scammer)
        assert_eq!(result.engagement_metrics.total_turns, 3);
        assert_eq!(result.engagement_metrics.scammer_messages, 2);
        assert_eq!(result.engagement_metrics.agent_messages, 1);
        assert_eq!(result.engagement_metrics.engagement_duration_seconds, 90.0);
    }

    #[tokio::test]
    async fn intelligence_spans_the_whole_conversation() {
        let history = vec![
            Message::scammer("Pay to fraudster@ybl today"),
            Message::agent("Which app do I use?"),
        ];
        let result = engine(MockProvider::text(GOOD_JSON))
            .decide(&history, "Or call 9876543210 and use http://fakebank.in")
            .await
            .unwrap();

        let intel = &result.extracted_intelligence;
        assert_eq!(intel.upi_ids, vec!["fraudster@ybl"]);
        assert_eq!(intel.phone_numbers, vec!["9876543210"]);
        assert_eq!(intel.phishing_links, vec!["http://fakebank.in"]);
        assert!(intel.bank_accounts.is_empty());
    }

    #[tokio::test]
    async fn first_contact_scenario() {
        // Empty history: bootstrap persona wins despite the urgency word.
        let result = engine(MockProvider::text(GOOD_JSON))
            .decide(
                &[],
                "Pay to fraudster@ybl now. Use link http://fakebank.in and call 9876543210",
            )
            .await
            .unwrap();

        assert_eq!(
            result.engagement_metrics.current_persona,
            Persona::ElderlyTrusting
        );
        assert_eq!(result.engagement_metrics.total_turns, 1);
        assert_eq!(result.extracted_intelligence.upi_ids, vec!["fraudster@ybl"]);
    }

    #[test]
    fn outermost_object_spans_first_to_last_brace() {
        let raw = r#"note {"a": {"b": 1}} trailing"#;
        assert_eq!(outermost_object(raw), Some(r#"{"a": {"b": 1}}"#));
        assert_eq!(outermost_object("no braces"), None);
        assert_eq!(outermost_object("} reversed {"), None);
    }
}
