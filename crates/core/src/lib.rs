//! # Flytrap Core
//!
//! Domain types, traits, and error definitions for the Flytrap scam
//! honeypot engine. This crate has **zero framework dependencies** — it
//! defines the domain model that all other crates implement against.
//!
//! ## Design Philosophy
//!
//! The completion service is defined as a trait here; implementations
//! live in `flytrap-providers`. Everything else is plain data that flows
//! by value through one pass of the decision pipeline per incoming
//! message — no entity in this crate carries mutable shared state.

pub mod error;
pub mod intel;
pub mod message;
pub mod persona;
pub mod provider;
pub mod turn;

// Re-export key types at crate root for ergonomics
pub use error::{Error, ProviderError, Result};
pub use intel::ExtractedIntelligence;
pub use message::{Message, Role};
pub use persona::Persona;
pub use provider::{GenerateRequest, Provider};
pub use turn::{EngagementMetrics, HoneypotTurnResult, ScamDecision};
