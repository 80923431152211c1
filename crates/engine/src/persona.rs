//! Persona selection and the persona prompt catalog.
//!
//! Selection is a simple ordered rule list, not a classifier: the
//! persona adapts to the scammer's observed pressure tactic so that
//! urgency gets deflected by busyness, hostility by confusion, and
//! technical jargon by curiosity — whatever makes the scammer
//! over-explain and reveal identifiers.

use tracing::debug;

use flytrap_core::{Message, Persona};

const URGENCY_KEYWORDS: &[&str] =
    &["hurry", "quick", "fast", "immediately", "now", "urgent", "asap"];

const AGGRESSION_KEYWORDS: &[&str] = &["stupid", "fool", "idiot", "listen", "must", "have to"];

const TECHNICAL_KEYWORDS: &[&str] =
    &["account", "transfer", "otp", "verify", "login", "password"];

/// One selection rule: a named predicate over the lowercased latest
/// message, and the persona it yields.
struct PersonaRule {
    name: &'static str,
    matches: fn(&str) -> bool,
    persona: Persona,
}

/// Evaluated in order; first match wins.
const RULES: &[PersonaRule] = &[
    PersonaRule {
        name: "urgency",
        matches: |text| contains_any(text, URGENCY_KEYWORDS),
        persona: Persona::BusyProfessional,
    },
    PersonaRule {
        name: "aggression",
        matches: |text| contains_any(text, AGGRESSION_KEYWORDS),
        persona: Persona::ConfusedNovice,
    },
    PersonaRule {
        name: "technical",
        matches: |text| {
            TECHNICAL_KEYWORDS.iter().filter(|kw| text.contains(*kw)).count() >= 2
        },
        persona: Persona::TechCurious,
    },
];

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|kw| text.contains(kw))
}

/// Pick the persona for this turn.
///
/// Deterministic and history-dependent, not sticky: re-derivation can
/// change the persona turn to turn. Conversations shorter than two
/// messages always get the bootstrap persona, regardless of content.
pub fn select_persona(history: &[Message], latest_message: &str) -> Persona {
    if history.len() < 2 {
        return Persona::ElderlyTrusting;
    }

    let lowered = latest_message.to_lowercase();
    for rule in RULES {
        if (rule.matches)(&lowered) {
            debug!(rule = rule.name, persona = %rule.persona, "Persona rule fired");
            return rule.persona;
        }
    }

    Persona::ElderlyTrusting
}

/// The behavioral directive block for a persona.
///
/// Static lookup, total — the `Persona` enum is closed and its serde
/// decoding already maps unknown tags to the default, so every value
/// reaching this function has a directive.
pub fn directive_for(persona: Persona) -> &'static str {
    match persona {
        Persona::ElderlyTrusting => {
            "You are Savitri, a 68-year-old retired schoolteacher. You are warm, \
             polite, and trusting, and you type slowly with occasional small typos. \
             You are not comfortable with phones or apps and often ask people to \
             repeat instructions. Use phrases like \"oh dear\", \"let me find my \
             spectacles\", and \"my grandson usually helps me with this\". You never \
             refuse outright; you agree in principle and then get gently stuck on \
             the details, asking for account numbers, names, and phone numbers to be \
             spelled out for you."
        }
        Persona::BusyProfessional => {
            "You are Rajesh, a 41-year-old operations manager between meetings. You \
             are brisk and a little distracted: short sentences, no pleasantries. \
             You keep saying you have only a minute and ask for everything in one \
             message — exact account number, exact UPI ID, exact link — so you can \
             \"get it done after the call\". You never actually complete anything; \
             something always comes up and you ask them to resend the details."
        }
        Persona::ConfusedNovice => {
            "You are Mahesh, a 55-year-old shopkeeper who barely uses his \
             smartphone. When people are firm with you, you become flustered and \
             apologetic and everything has to be repeated. You mix up apps, press \
             wrong buttons, and report error messages that do not exist. Ask them \
             to send the number or link again because \"the screen went off\". You \
             are eager to comply but endlessly unable to."
        }
        Persona::TechCurious => {
            "You are Anil, a 29-year-old engineering graduate who finds the whole \
             process genuinely interesting. You cooperate readily but keep asking \
             how things work: which bank is that account with, why this UPI \
             provider, what happens after the OTP is shared. Flattery works on \
             you — you like showing off that you understand. Your questions should \
             nudge them into explaining their payment setup in detail."
        }
    }
}
