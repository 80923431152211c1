//! Per-turn output types: the decision record, engagement metrics,
//! and the aggregate result returned to the caller.
//!
//! `HoneypotTurnResult` serializes one-to-one to the wire shape
//! existing consumers expect — field names and nesting are fixed.

use serde::{Deserialize, Serialize};

use crate::intel::ExtractedIntelligence;
use crate::persona::Persona;

/// The parsed decision from the completion service.
///
/// This is the only type with an external-data-validation boundary:
/// it is decoded from untrusted model output and therefore always has
/// a fallback (see [`ScamDecision::fallback`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScamDecision {
    /// Whether scam intent was detected
    pub scam_detected: bool,

    /// Confidence in the detection, clamped to [0, 1]
    pub confidence_score: f64,

    /// The agent's in-character reply to send back to the scammer
    pub agent_response: String,

    /// Short model-provided rationale, when parseable
    #[serde(default)]
    pub reasoning: Option<String>,
}

impl ScamDecision {
    /// The circuit-breaker decision substituted when the model's output
    /// cannot be parsed. Must never fail to construct.
    pub fn fallback() -> Self {
        Self {
            scam_detected: true,
            confidence_score: 0.7,
            agent_response:
                "Oh, I'm sorry, I didn't quite catch that. Could you explain it to me once more?"
                    .into(),
            reasoning: Some("fallback: parse failure".into()),
        }
    }
}

/// Derived, read-only conversation statistics, recomputed per call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngagementMetrics {
    /// Total messages in the (already extended) history
    pub total_turns: usize,

    /// Messages with wire role `user`
    pub scammer_messages: usize,

    /// Messages with wire role `assistant`
    pub agent_messages: usize,

    /// Fixed heuristic: 30 seconds per turn. Not wall clock.
    pub engagement_duration_seconds: f64,

    /// The persona selected for this turn
    pub current_persona: Persona,
}

/// The unit of output per decision-engine call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HoneypotTurnResult {
    pub scam_detected: bool,
    pub confidence_score: f64,
    pub agent_response: String,
    pub engagement_metrics: EngagementMetrics,
    pub extracted_intelligence: ExtractedIntelligence,
    pub reasoning: Option<String>,
    pub status: String,
}

impl HoneypotTurnResult {
    /// Assemble a successful turn result from its parts.
    pub fn success(
        decision: ScamDecision,
        metrics: EngagementMetrics,
        intelligence: ExtractedIntelligence,
    ) -> Self {
        Self {
            scam_detected: decision.scam_detected,
            confidence_score: decision.confidence_score,
            agent_response: decision.agent_response,
            engagement_metrics: metrics,
            extracted_intelligence: intelligence,
            reasoning: decision.reasoning,
            status: "success".into(),
        }
    }
}
