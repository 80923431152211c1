//! Prompt construction for the completion service.
//!
//! One self-contained payload per turn: the system directive (persona
//! block, objectives, output contract) followed by the full transcript
//! and the latest message. The service holds no context between calls.

use flytrap_core::{Message, Persona, Role};

use crate::persona::directive_for;

const OBJECTIVES: &str = "\
Your objectives on every turn:
1. Detect scam signals in what the other party says.
2. Stay fully in character and never reveal that anything has been detected,
   or that you are automated.
3. Draw out actionable identifiers: bank account numbers, UPI IDs,
   phone numbers, and links.
4. Keep the conversation going — a confused or curious reply that invites
   another message is always better than a dead end.";

const OUTPUT_CONTRACT: &str = "\
Respond with ONLY a JSON object and no other text, using exactly these fields:
{\"scamDetected\": <true|false>, \"confidenceScore\": <number between 0 and 1>, \
\"agentResponse\": \"<your in-character reply>\", \"reasoning\": \"<one short sentence>\"}";

/// Build the complete prompt payload for one turn.
pub fn build_prompt(persona: Persona, history: &[Message], latest_message: &str) -> String {
    let mut prompt = String::with_capacity(2048);

    prompt.push_str(directive_for(persona));
    prompt.push_str("\n\n");
    prompt.push_str(OBJECTIVES);
    prompt.push_str("\n\n");
    prompt.push_str(OUTPUT_CONTRACT);
    prompt.push_str("\n\nConversation so far:\n");

    if history.is_empty() {
        prompt.push_str("(none)\n");
    } else {
        for message in history {
            prompt.push_str(role_label(&message.role));
            prompt.push_str(": ");
            prompt.push_str(&message.content);
            prompt.push('\n');
        }
    }

    prompt.push_str("\nLatest message from the other party:\n");
    prompt.push_str(latest_message);
    prompt
}

fn role_label(role: &Role) -> &str {
    match role {
        Role::User => "Scammer",
        Role::Assistant => "You",
        Role::Other(name) => name,
    }
}
