//! Extracted scam intelligence.
//!
//! Every field is a deduplicated list of strings matching its declared
//! pattern, recomputed fresh each turn from the entire conversation
//! text. There is no incremental merge state anywhere.

use serde::{Deserialize, Serialize};

/// Actionable identifiers pulled from conversation text.
///
/// Extraction is best-effort pattern matching, not verification — a
/// value appearing here says nothing about whether it is real.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedIntelligence {
    /// Word-bounded runs of 8–18 digits
    #[serde(default)]
    pub bank_accounts: Vec<String>,

    /// Provider-qualified payment handles (UPI-style addresses)
    #[serde(default)]
    pub upi_ids: Vec<String>,

    /// http(s) URLs mentioned by the scammer
    #[serde(default)]
    pub phishing_links: Vec<String>,

    /// 10-digit Indian mobile numbers (first digit 6–9)
    #[serde(default)]
    pub phone_numbers: Vec<String>,

    /// Anything else worth keeping, keyed by kind
    #[serde(default)]
    pub other_intelligence: serde_json::Map<String, serde_json::Value>,
}

impl ExtractedIntelligence {
    /// True when no identifier of any kind was found.
    pub fn is_empty(&self) -> bool {
        self.bank_accounts.is_empty()
            && self.upi_ids.is_empty()
            && self.phishing_links.is_empty()
            && self.phone_numbers.is_empty()
            && self.other_intelligence.is_empty()
    }

    /// Total number of extracted identifiers across all fields.
    pub fn count(&self) -> usize {
        self.bank_accounts.len()
            + self.upi_ids.len()
            + self.phishing_links.len()
            + self.phone_numbers.len()
            + self.other_intelligence.len()
    }
}
