use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE: f64 = 50.0;
pub const DEFAULT_CONTRADICTION_PENALTY: f64 = -30.0;
pub const DEFAULT_CORROBORATION_BONUS: f64 = 25.0;
pub const DEFAULT_TIER_B_SUPPORT: f64 = 15.0;
pub const DEFAULT_TIER_C_SUPPORT: f64 = 5.0;
pub const DEFAULT_MIN_SOURCES: f64 = 2.0;

/// Label used when the ladder is empty or the evidence floor is not met.
pub const UNCERTAIN_LABEL: &str = "Uncertain";

/// Scoring policy.
///
/// Loaded once per run and shared read-only by every scoring call. Every
/// field is optional in the document; accessors fall back to the defaults.
///
/// Example JSON:
/// ```json
/// {
///   "base": 50,
///   "weights": {
///     "contradicts_from_tierA_or_P>=1": -30,
///     "supports_from_tierA_or_P>=2": 25,
///     "tierB_support": 15,
///     "tierC_support": 5,
///     "supports_cap": 25
///   },
///   "evidence_floor": { "min_sources": 2 },
///   "ladder": [
///     { "min": 70, "label": "Likely True" },
///     { "min": 0, "label": "Likely False" }
///   ]
/// }
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Policy {
    /// Starting score before any rule fires (default: 50)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<f64>,

    #[serde(default)]
    pub weights: Weights,

    #[serde(default)]
    pub evidence_floor: EvidenceFloor,

    /// Score-to-label thresholds. Order in the document does not matter.
    #[serde(default)]
    pub ladder: Vec<LadderRule>,
}

impl Policy {
    pub fn base(&self) -> f64 {
        self.base.unwrap_or(DEFAULT_BASE)
    }
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            base: Some(DEFAULT_BASE),
            weights: Weights {
                contradiction_penalty: Some(DEFAULT_CONTRADICTION_PENALTY),
                corroboration_bonus: Some(DEFAULT_CORROBORATION_BONUS),
                tier_b_support: Some(DEFAULT_TIER_B_SUPPORT),
                tier_c_support: Some(DEFAULT_TIER_C_SUPPORT),
                supports_cap: Some(DEFAULT_CORROBORATION_BONUS),
            },
            evidence_floor: EvidenceFloor {
                min_sources: Some(DEFAULT_MIN_SOURCES),
            },
            ladder: vec![
                LadderRule::new(85.0, "True"),
                LadderRule::new(70.0, "Likely True"),
                LadderRule::new(40.0, UNCERTAIN_LABEL),
                LadderRule::new(20.0, "Likely False"),
                LadderRule::new(0.0, "False"),
            ],
        }
    }
}

/// Rule weights.
///
/// The policy document keys for the Tier A/P rules spell out their trigger
/// condition; they map onto symbolic fields here. The symbolic names are
/// accepted as aliases.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct Weights {
    /// Added once when any independent Tier A/P source contradicts (default: -30)
    #[serde(
        default,
        rename = "contradicts_from_tierA_or_P>=1",
        alias = "contradiction_penalty",
        skip_serializing_if = "Option::is_none"
    )]
    pub contradiction_penalty: Option<f64>,

    /// Added once for 2+ independent Tier A/P supports with no contradiction (default: +25)
    #[serde(
        default,
        rename = "supports_from_tierA_or_P>=2",
        alias = "corroboration_bonus",
        skip_serializing_if = "Option::is_none"
    )]
    pub corroboration_bonus: Option<f64>,

    /// Per supporting Tier B source (default: +15)
    #[serde(
        default,
        rename = "tierB_support",
        alias = "tier_b_support",
        skip_serializing_if = "Option::is_none"
    )]
    pub tier_b_support: Option<f64>,

    /// Per supporting Tier C source (default: +5)
    #[serde(
        default,
        rename = "tierC_support",
        alias = "tier_c_support",
        skip_serializing_if = "Option::is_none"
    )]
    pub tier_c_support: Option<f64>,

    /// Upper bound on the combined Tier B/C bonus (default: the corroboration bonus)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supports_cap: Option<f64>,
}

impl Weights {
    pub fn contradiction_penalty(&self) -> f64 {
        self.contradiction_penalty
            .unwrap_or(DEFAULT_CONTRADICTION_PENALTY)
    }

    pub fn corroboration_bonus(&self) -> f64 {
        self.corroboration_bonus.unwrap_or(DEFAULT_CORROBORATION_BONUS)
    }

    pub fn tier_b_support(&self) -> f64 {
        self.tier_b_support.unwrap_or(DEFAULT_TIER_B_SUPPORT)
    }

    pub fn tier_c_support(&self) -> f64 {
        self.tier_c_support.unwrap_or(DEFAULT_TIER_C_SUPPORT)
    }

    pub fn supports_cap(&self) -> f64 {
        self.supports_cap
            .unwrap_or_else(|| self.corroboration_bonus())
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct EvidenceFloor {
    /// Independent sources required to avoid a forced "Uncertain" (default: 2)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_sources: Option<f64>,
}

impl EvidenceFloor {
    pub fn min_sources(&self) -> f64 {
        self.min_sources.unwrap_or(DEFAULT_MIN_SOURCES)
    }
}

/// One ladder step: scores at or above `min` get `label`.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct LadderRule {
    #[serde(default)]
    pub min: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl LadderRule {
    pub fn new(min: f64, label: &str) -> Self {
        Self {
            min,
            label: Some(label.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy() {
        let policy = Policy::default();

        assert_eq!(policy.base(), 50.0);
        assert_eq!(policy.weights.contradiction_penalty(), -30.0);
        assert_eq!(policy.weights.corroboration_bonus(), 25.0);
        assert_eq!(policy.weights.supports_cap(), 25.0);
        assert_eq!(policy.evidence_floor.min_sources(), 2.0);
        assert_eq!(policy.ladder.len(), 5);
    }

    #[test]
    fn test_empty_policy_parse_uses_defaults() {
        let policy: Policy = serde_json::from_str("{}").unwrap();

        assert!(policy.base.is_none());
        assert_eq!(policy.base(), 50.0);
        assert_eq!(policy.weights.contradiction_penalty(), -30.0);
        assert_eq!(policy.weights.corroboration_bonus(), 25.0);
        assert_eq!(policy.weights.tier_b_support(), 15.0);
        assert_eq!(policy.weights.tier_c_support(), 5.0);
        assert_eq!(policy.evidence_floor.min_sources(), 2.0);
        assert!(policy.ladder.is_empty());
    }

    #[test]
    fn test_document_weight_keys() {
        let json = r#"{
            "weights": {
                "contradicts_from_tierA_or_P>=1": -40,
                "supports_from_tierA_or_P>=2": 30,
                "tierB_support": 10,
                "tierC_support": 2
            }
        }"#;
        let policy: Policy = serde_json::from_str(json).unwrap();

        assert_eq!(policy.weights.contradiction_penalty(), -40.0);
        assert_eq!(policy.weights.corroboration_bonus(), 30.0);
        assert_eq!(policy.weights.tier_b_support(), 10.0);
        assert_eq!(policy.weights.tier_c_support(), 2.0);
    }

    #[test]
    fn test_supports_cap_follows_corroboration_bonus() {
        let json = r#"{ "weights": { "supports_from_tierA_or_P>=2": 40 } }"#;
        let policy: Policy = serde_json::from_str(json).unwrap();
        assert_eq!(policy.weights.supports_cap(), 40.0);

        let json = r#"{ "weights": { "supports_from_tierA_or_P>=2": 40, "supports_cap": 10 } }"#;
        let policy: Policy = serde_json::from_str(json).unwrap();
        assert_eq!(policy.weights.supports_cap(), 10.0);
    }

    #[test]
    fn test_symbolic_aliases() {
        let json = r#"{ "weights": { "contradiction_penalty": -12, "tier_b_support": 7 } }"#;
        let policy: Policy = serde_json::from_str(json).unwrap();
        assert_eq!(policy.weights.contradiction_penalty(), -12.0);
        assert_eq!(policy.weights.tier_b_support(), 7.0);
    }

    #[test]
    fn test_extra_document_keys_ignored() {
        let json = r#"{ "version": "2024-05", "description": "house policy", "base": 60 }"#;
        let policy: Policy = serde_json::from_str(json).unwrap();
        assert_eq!(policy.base(), 60.0);
    }

    #[test]
    fn test_fractional_min_sources_parse() {
        use crate::scoring::{evaluate, Post, Source};

        let json = r#"{ "evidence_floor": { "min_sources": 2.0 } }"#;
        let policy: Policy = serde_json::from_str(json).unwrap();
        assert_eq!(policy.evidence_floor.min_sources(), 2.0);

        let one_source = Post {
            sources: vec![Source {
                title: Some("X".to_string()),
                tier: Some("A".to_string()),
                stance: Some("support".to_string()),
                ..Source::default()
            }],
            ..Post::default()
        };
        let eval = evaluate(&one_source, &policy);
        assert!(eval.floor_applied);
        assert_eq!(eval.label, UNCERTAIN_LABEL);

        // A fractional floor compares directly against the count
        let policy: Policy =
            serde_json::from_str(r#"{ "evidence_floor": { "min_sources": 1.5 } }"#).unwrap();
        assert!(evaluate(&one_source, &policy).floor_applied);
    }

    #[test]
    fn test_ladder_rule_defaults() {
        let json = r#"{ "ladder": [{ "label": "Anything" }, { "min": 50 }] }"#;
        let policy: Policy = serde_json::from_str(json).unwrap();
        assert_eq!(policy.ladder[0].min, 0.0);
        assert!(policy.ladder[1].label.is_none());
    }

    #[test]
    fn test_policy_json_roundtrip_keeps_document_keys() {
        let policy = Policy::default();
        let json = serde_json::to_string(&policy).unwrap();
        assert!(json.contains("contradicts_from_tierA_or_P>=1"));
        let parsed: Policy = serde_json::from_str(&json).unwrap();
        assert_eq!(policy, parsed);
    }

    #[test]
    fn test_policy_yaml_parse() {
        let yaml = r#"
base: 55
weights:
  "supports_from_tierA_or_P>=2": 20
evidence_floor:
  min_sources: 3
ladder:
  - { min: 60, label: "Likely True" }
  - { min: 0, label: "Unverified" }
"#;
        let policy: Policy = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(policy.base(), 55.0);
        assert_eq!(policy.weights.corroboration_bonus(), 20.0);
        assert_eq!(policy.evidence_floor.min_sources(), 3.0);
        assert_eq!(policy.ladder.len(), 2);
    }
}
