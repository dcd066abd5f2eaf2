//! Player interactions and the reaction events they produce.

use serde::{Deserialize, Serialize};

/// A player action. Each kind raises exactly one stat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionKind {
    /// Raises `hunger`.
    Feed,
    /// Raises `intimacy`.
    Pet,
    /// Raises `health`.
    Clean,
}

impl InteractionKind {
    pub const ALL: [InteractionKind; 3] = [Self::Feed, Self::Pet, Self::Clean];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Feed => "feed",
            Self::Pet => "pet",
            Self::Clean => "clean",
        }
    }
}

impl std::fmt::Display for InteractionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for InteractionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| s.trim().eq_ignore_ascii_case(k.as_str()))
            .ok_or_else(|| format!("unknown interaction kind: {s:?}"))
    }
}

/// What a pet reacts to: the interaction itself, or an evolution it
/// triggered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReactionEvent {
    Feed,
    Pet,
    Clean,
    Evolve,
}

impl ReactionEvent {
    /// The event for an interaction, promoted to `Evolve` when it caused a
    /// stage transition.
    pub fn for_interaction(kind: InteractionKind, transitioned: bool) -> Self {
        if transitioned {
            return Self::Evolve;
        }
        match kind {
            InteractionKind::Feed => Self::Feed,
            InteractionKind::Pet => Self::Pet,
            InteractionKind::Clean => Self::Clean,
        }
    }
}

impl From<InteractionKind> for ReactionEvent {
    fn from(kind: InteractionKind) -> Self {
        Self::for_interaction(kind, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_parse_case_insensitively() {
        assert_eq!("FEED".parse::<InteractionKind>().unwrap(), InteractionKind::Feed);
        assert_eq!(" clean ".parse::<InteractionKind>().unwrap(), InteractionKind::Clean);
        assert!("groom".parse::<InteractionKind>().is_err());
    }

    #[test]
    fn serde_rejects_unknown_kind() {
        assert_eq!(serde_json::to_string(&InteractionKind::Pet).unwrap(), "\"pet\"");
        assert!(serde_json::from_str::<InteractionKind>("\"groom\"").is_err());
    }

    #[test]
    fn evolution_overrides_reaction() {
        assert_eq!(
            ReactionEvent::for_interaction(InteractionKind::Feed, true),
            ReactionEvent::Evolve
        );
        assert_eq!(ReactionEvent::from(InteractionKind::Clean), ReactionEvent::Clean);
    }
}
