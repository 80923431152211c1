//! Engagement metrics over a conversation history.
//!
//! Pure aggregation, recomputed per call. The duration figure is the
//! fixed 30-seconds-per-turn heuristic, not a wall-clock measurement.

use flytrap_core::{EngagementMetrics, Message, Persona, Role};

const SECONDS_PER_TURN: f64 = 30.0;

/// Compute metrics over the already-extended history for this turn.
///
/// Roles other than `user`/`assistant` contribute nothing to the
/// per-role counts but still count as turns.
pub fn compute_metrics(updated_history: &[Message], current_persona: Persona) -> EngagementMetrics {
    let scammer_messages = updated_history.iter().filter(|m| m.role == Role::User).count();
    let agent_messages = updated_history
        .iter()
        .filter(|m| m.role == Role::Assistant)
        .count();

    EngagementMetrics {
        total_turns: updated_history.len(),
        scammer_messages,
        agent_messages,
        engagement_duration_seconds: updated_history.len() as f64 * SECONDS_PER_TURN,
        current_persona,
    }
}
