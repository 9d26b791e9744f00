use std::collections::HashSet;

use super::schema::Policy;

/// Validate a policy at startup.
/// Returns all validation errors at once (not just the first).
///
/// Only values the scorer cannot work with are errors. Out-of-range values
/// are still scoreable and are reported by [`policy_warnings`].
pub fn validate_policy(policy: &Policy) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    // Validate base
    if let Some(base) = policy.base {
        if !base.is_finite() {
            errors.push("base: must be a finite number".to_string());
        }
    }

    // Validate weights
    for (key, value) in weight_entries(policy) {
        if value.is_some_and(|v| !v.is_finite()) {
            errors.push(format!("weights.{}: must be a finite number", key));
        }
    }

    // Validate evidence floor
    if let Some(min) = policy.evidence_floor.min_sources {
        if !min.is_finite() {
            errors.push("evidence_floor.min_sources: must be a finite number".to_string());
        }
    }

    // Validate ladder thresholds
    for (i, rule) in policy.ladder.iter().enumerate() {
        if !rule.min.is_finite() {
            errors.push(format!("ladder[{}].min: must be a finite number", i));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Legal but suspicious policy values. Scoring proceeds regardless: the
/// total is clamped, duplicate thresholds resolve by document order and
/// blank labels fall back to "Uncertain".
pub fn policy_warnings(policy: &Policy) -> Vec<String> {
    let mut warnings = Vec::new();

    if let Some(base) = policy.base.filter(|b| b.is_finite()) {
        if !(0.0..=100.0).contains(&base) {
            warnings.push(format!("base: {} is outside 0-100 and will be clamped", base));
        }
    }

    // The penalty should pull down, everything else should push up
    for (key, value) in weight_entries(policy) {
        let Some(value) = value.filter(|v| v.is_finite()) else {
            continue;
        };
        let is_penalty = key == PENALTY_KEY;
        if is_penalty && value > 0.0 {
            warnings.push(format!("weights.{}: {} raises the score", key, value));
        } else if !is_penalty && value < 0.0 {
            warnings.push(format!("weights.{}: {} lowers the score", key, value));
        }
    }

    let mut seen = HashSet::new();
    for (i, rule) in policy.ladder.iter().enumerate() {
        if rule.min.is_finite() && !seen.insert(rule.min.to_bits()) {
            warnings.push(format!(
                "ladder[{}].min: duplicate threshold {}, the earlier rule wins",
                i, rule.min
            ));
        }
        if rule.label.as_deref().map_or(true, |l| l.trim().is_empty()) {
            warnings.push(format!("ladder[{}].label: blank, resolves to \"Uncertain\"", i));
        }
    }

    warnings
}

const PENALTY_KEY: &str = "contradicts_from_tierA_or_P>=1";

fn weight_entries(policy: &Policy) -> [(&'static str, Option<f64>); 5] {
    let w = &policy.weights;
    [
        (PENALTY_KEY, w.contradiction_penalty),
        ("supports_from_tierA_or_P>=2", w.corroboration_bonus),
        ("tierB_support", w.tier_b_support),
        ("tierC_support", w.tier_c_support),
        ("supports_cap", w.supports_cap),
    ]
}
