//! The closed set of personas the honeypot agent can role-play.
//!
//! A persona is not persisted anywhere — it is recomputed every turn
//! from the conversation history and the latest message, so it can
//! change turn to turn as the scammer's tactics shift.

use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};

/// A fixed behavioral profile the agent role-plays to sustain
/// believable engagement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Persona {
    /// Warm, slow, easily led — the default and the fallback
    #[default]
    ElderlyTrusting,
    /// Short on time, deflects urgency with busyness
    BusyProfessional,
    /// Flustered by hostility, needs everything repeated
    ConfusedNovice,
    /// Fascinated by technical detail, asks how things work
    TechCurious,
}

impl Persona {
    /// The wire tag for this persona.
    pub fn as_tag(&self) -> &'static str {
        match self {
            Persona::ElderlyTrusting => "elderly-trusting",
            Persona::BusyProfessional => "busy-professional",
            Persona::ConfusedNovice => "confused-novice",
            Persona::TechCurious => "tech-curious",
        }
    }

    /// Parse a wire tag. Unknown tags fall back to the default persona
    /// rather than failing — the catalog must always resolve.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "busy-professional" => Persona::BusyProfessional,
            "confused-novice" => Persona::ConfusedNovice,
            "tech-curious" => Persona::TechCurious,
            _ => Persona::ElderlyTrusting,
        }
    }

    /// All personas, in catalog order.
    pub fn all() -> [Persona; 4] {
        [
            Persona::ElderlyTrusting,
            Persona::BusyProfessional,
            Persona::ConfusedNovice,
            Persona::TechCurious,
        ]
    }
}

impl std::fmt::Display for Persona {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_tag())
    }
}

impl Serialize for Persona {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_tag())
    }
}

impl<'de> Deserialize<'de> for Persona {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Ok(Persona::from_tag(&tag))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_roundtrip() {
        for persona in Persona::all() {
            assert_eq!(Persona::from_tag(persona.as_tag()), persona);
        }
    }

    #[test]
    fn unknown_tag_falls_back_to_default() {
        assert_eq!(Persona::from_tag("polite_elderly"), Persona::ElderlyTrusting);
        assert_eq!(Persona::from_tag(""), Persona::ElderlyTrusting);
    }

    #[test]
    fn serde_uses_kebab_tags() {
        let json = serde_json::to_string(&Persona::TechCurious).unwrap();
        assert_eq!(json, r#""tech-curious""#);

        let back: Persona = serde_json::from_str(r#""busy-professional""#).unwrap();
        assert_eq!(back, Persona::BusyProfessional);
    }
}
