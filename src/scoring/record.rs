use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::types::Source;

pub const RECORD_VERSION: &str = "1.0";

/// Number of contributions surfaced as summary bullets.
pub const BULLET_COUNT: usize = 3;

/// Score card for one post.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoreRecord {
    pub version: String,
    pub score: u8,
    pub label: String,
    pub contributions: Vec<String>,
    pub bullets: Vec<String>,
    /// Reserved; always empty
    pub badges: Vec<String>,
    pub citations: Vec<Citation>,
    pub meta: Meta,
}

/// An independent source echoed back as given.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Citation {
    pub title: Option<String>,
    pub tier: Option<String>,
    pub stance: Option<String>,
}

impl From<&Source> for Citation {
    fn from(source: &Source) -> Self {
        Self {
            title: source.title.clone(),
            tier: source.tier.clone(),
            stance: source.stance.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Meta {
    pub post_id: Value,
    pub run_id: String,
    pub latency_ms: u64,
}
