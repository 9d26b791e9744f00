use std::cmp::Ordering;
use std::time::Instant;

use uuid::Uuid;

use super::evidence::EvidenceCounts;
use super::independence::independent_sources;
use super::record::{Citation, Meta, ScoreRecord, BULLET_COUNT, RECORD_VERSION};
use super::types::Post;
use crate::policy::{LadderRule, Policy, UNCERTAIN_LABEL};

/// Highest score a post may keep when it fails the evidence floor.
pub const FLOOR_SCORE_CAP: u8 = 69;

/// Everything about a score that does not depend on time or randomness.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub score: u8,
    pub label: String,
    pub contributions: Vec<String>,
    pub citations: Vec<Citation>,
    pub counts: EvidenceCounts,
    /// True when the evidence floor forced the label
    pub floor_applied: bool,
}

/// Score a post against a policy, without metadata.
pub fn evaluate(post: &Post, policy: &Policy) -> Evaluation {
    let independent = independent_sources(&post.sources);
    let counts = EvidenceCounts::tally(independent.iter().copied());

    let (raw, contributions) = compose(&counts, policy);
    let mut score = clamp_score(raw);

    let floor_applied = below_evidence_floor(independent.len(), &counts, policy);
    let label = if floor_applied {
        score = score.min(FLOOR_SCORE_CAP);
        UNCERTAIN_LABEL.to_string()
    } else {
        resolve_label(&policy.ladder, score)
    };

    Evaluation {
        score,
        label,
        contributions,
        citations: independent.into_iter().map(Citation::from).collect(),
        counts,
        floor_applied,
    }
}

/// Apply the weight rules in order, starting from the policy base.
/// Returns the unclamped score and one contribution line per rule that fired.
pub fn compose(counts: &EvidenceCounts, policy: &Policy) -> (f64, Vec<String>) {
    let weights = &policy.weights;
    let mut score = policy.base();
    let mut contributions = Vec::new();

    // Contradiction dominates: applies regardless of support
    if counts.contradict_ap >= 1 {
        let penalty = weights.contradiction_penalty();
        score += penalty;
        contributions.push(format!("{:+}: Tier A/P contradiction", penalty));
    }

    if counts.support_ap >= 2 && counts.contradict_ap == 0 {
        let bonus = weights.corroboration_bonus();
        score += bonus;
        contributions.push(format!("{:+}: 2+ independent Tier A/P support", bonus));
    }

    let lower_tier = counts.support_b as f64 * weights.tier_b_support()
        + counts.support_c as f64 * weights.tier_c_support();
    let lower_tier = lower_tier.min(weights.supports_cap());
    if lower_tier != 0.0 {
        score += lower_tier;
        contributions.push(format!("{:+}: Tier B/C supports (capped)", lower_tier));
    }

    (score, contributions)
}

/// Truncate toward zero and clamp into 0..=100.
pub fn clamp_score(raw: f64) -> u8 {
    // NaN casts to 0
    raw.trunc().clamp(0.0, 100.0) as u8
}

pub fn below_evidence_floor(independent: usize, counts: &EvidenceCounts, policy: &Policy) -> bool {
    (independent as f64) < policy.evidence_floor.min_sources() && !counts.has_tier_p
}

/// Pick the label of the highest rule whose `min` the score reaches.
/// Falls back to the lowest rule, or "Uncertain" for an empty ladder.
pub fn resolve_label(ladder: &[LadderRule], score: u8) -> String {
    let mut rules: Vec<&LadderRule> = ladder.iter().collect();
    rules.sort_by(|a, b| b.min.partial_cmp(&a.min).unwrap_or(Ordering::Equal));

    let score = f64::from(score);
    rules
        .iter()
        .find(|r| r.min <= score)
        .or(rules.last())
        .and_then(|r| r.label.as_deref())
        .filter(|l| !l.trim().is_empty())
        .unwrap_or(UNCERTAIN_LABEL)
        .to_string()
}

/// Time source for latency measurement.
pub trait Clock {
    fn now(&self) -> Instant;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Source of per-call run identifiers.
pub trait RunIdGenerator {
    fn run_id(&self) -> String;
}

/// Random v4 UUIDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl RunIdGenerator for UuidGenerator {
    fn run_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Scores posts against a borrowed policy.
pub struct Scorer<'p, C = SystemClock, G = UuidGenerator> {
    policy: &'p Policy,
    clock: C,
    ids: G,
}

impl<'p> Scorer<'p> {
    pub fn new(policy: &'p Policy) -> Self {
        Self {
            policy,
            clock: SystemClock,
            ids: UuidGenerator,
        }
    }
}

impl<'p, C: Clock, G: RunIdGenerator> Scorer<'p, C, G> {
    pub fn with_clock_and_ids(policy: &'p Policy, clock: C, ids: G) -> Self {
        Self { policy, clock, ids }
    }

    pub fn score(&self, post: &Post) -> ScoreRecord {
        let started = self.clock.now();
        let eval = evaluate(post, self.policy);
        let latency = self.clock.now().saturating_duration_since(started);

        let bullets = eval
            .contributions
            .iter()
            .take(BULLET_COUNT)
            .cloned()
            .collect();

        ScoreRecord {
            version: RECORD_VERSION.to_string(),
            score: eval.score,
            label: eval.label,
            contributions: eval.contributions,
            bullets,
            badges: Vec::new(),
            citations: eval.citations,
            meta: Meta {
                post_id: post.post_id.clone(),
                run_id: self.ids.run_id(),
                latency_ms: latency.as_millis() as u64,
            },
        }
    }
}

/// Score one post with the system clock and random run ids.
pub fn compute_score(post: &Post, policy: &Policy) -> ScoreRecord {
    Scorer::new(policy).score(post)
}
