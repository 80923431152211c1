//! # Flytrap Engine
//!
//! The per-turn decision engine: given a conversation history and the
//! latest scammer message, pick a persona, build the model prompt, call
//! the completion service, defensively parse its output, and return the
//! assembled turn result together with extracted intelligence and
//! engagement metrics.
//!
//! Everything here is stateless across invocations — state lives with
//! the caller, and concurrent calls never interfere.

pub mod extractor;
pub mod metrics;
pub mod orchestrator;
pub mod persona;
pub mod prompt;

pub use extractor::extract;
pub use metrics::compute_metrics;
pub use orchestrator::DecisionEngine;
pub use persona::{directive_for, select_persona};
pub use prompt::build_prompt;
