//! Pattern-based intelligence extraction.
//!
//! A stateless text → structured-fields transform over the full
//! conversation text. Total: absence of matches yields empty lists,
//! and nothing here can fail at runtime.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex_lite::Regex;

use flytrap_core::ExtractedIntelligence;

/// Word-bounded runs of 8–18 consecutive digits.
static BANK_ACCOUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d{8,18}\b").unwrap());

/// Email-shaped tokens; filtered to payment providers afterwards.
static PAYMENT_HANDLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[\w.-]+@[\w.-]+\b").unwrap());

/// 10-digit Indian mobile numbers: first digit 6–9.
static PHONE_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[6-9]\d{9}\b").unwrap());

/// http(s) URLs up to the first whitespace or URL-hostile character.
static LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"https?://[^\s<>"{}|\\^`\[\]]+"#).unwrap());

/// Domain substrings that qualify an email-shaped token as a payment
/// handle. Matching is case-insensitive. Everything else — including
/// perfectly valid email addresses — is discarded: "looks like an
/// email" and "looks like a payment handle" are deliberately separate.
const PAYMENT_PROVIDERS: &[&str] = &[
    "paytm",
    "phonepe",
    "googlepay",
    "ybl",
    "oksbi",
    "okhdfcbank",
    "okicici",
    "okaxis",
];

/// Extract actionable identifiers from the full conversation text.
///
/// The digit-run and phone extractors overlap in principle; a
/// mobile-shaped run (exactly 10 digits, first digit 6–9) is reported
/// as a phone number and not repeated as a bank account.
pub fn extract(full_conversation_text: &str) -> ExtractedIntelligence {
    ExtractedIntelligence {
        bank_accounts: bank_accounts(full_conversation_text),
        upi_ids: upi_ids(full_conversation_text),
        phishing_links: dedup(LINK.find_iter(full_conversation_text).map(|m| m.as_str())),
        phone_numbers: dedup(PHONE_NUMBER.find_iter(full_conversation_text).map(|m| m.as_str())),
        other_intelligence: serde_json::Map::new(),
    }
}

fn bank_accounts(text: &str) -> Vec<String> {
    dedup(
        BANK_ACCOUNT
            .find_iter(text)
            .map(|m| m.as_str())
            .filter(|run| !is_mobile_shaped(run)),
    )
}

fn is_mobile_shaped(run: &str) -> bool {
    run.len() == 10 && run.starts_with(['6', '7', '8', '9'])
}

fn upi_ids(text: &str) -> Vec<String> {
    dedup(PAYMENT_HANDLE.find_iter(text).map(|m| m.as_str()).filter(|token| {
        let Some((_, domain)) = token.rsplit_once('@') else {
            return false;
        };
        let domain = domain.to_lowercase();
        PAYMENT_PROVIDERS.iter().any(|p| domain.contains(p))
    }))
}

/// Deduplicate while keeping first-seen order.
fn dedup<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for value in values {
        if seen.insert(value) {
            out.push(value.to_string());
        }
    }
    out
}
