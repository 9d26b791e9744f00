use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A post to be scored, as read from the input feed.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct Post {
    /// Opaque identifier, passed through to the score record unchanged
    #[serde(default)]
    pub post_id: Value,

    #[serde(default)]
    pub sources: Vec<Source>,
}

/// An evidence item cited by a post.
///
/// Fields are kept exactly as given so citations can echo them back;
/// [`Source::tier`] and [`Source::stance`] interpret them.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct Source {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub organization: Option<String>,
    #[serde(default)]
    pub tier: Option<String>,
    #[serde(default)]
    pub stance: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    A,
    B,
    C,
    P,
}

impl Tier {
    /// Case-insensitive; unknown values are `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "A" => Some(Tier::A),
            "B" => Some(Tier::B),
            "C" => Some(Tier::C),
            "P" => Some(Tier::P),
            _ => None,
        }
    }

    /// Tier A and P are the top tier.
    pub fn is_primary(self) -> bool {
        matches!(self, Tier::A | Tier::P)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stance {
    Support,
    Contradict,
}

impl Stance {
    /// Case-insensitive; "contradicts" is accepted for `Contradict`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "support" => Some(Stance::Support),
            "contradict" | "contradicts" => Some(Stance::Contradict),
            _ => None,
        }
    }
}

impl Source {
    /// Independence key: trimmed title, else trimmed organization, else "".
    pub fn identity(&self) -> &str {
        let title = self.title.as_deref().unwrap_or("");
        if !title.is_empty() {
            return title.trim();
        }
        self.organization.as_deref().unwrap_or("").trim()
    }

    pub fn tier(&self) -> Option<Tier> {
        self.tier.as_deref().and_then(Tier::parse)
    }

    pub fn stance(&self) -> Option<Stance> {
        self.stance.as_deref().and_then(Stance::parse)
    }
}
