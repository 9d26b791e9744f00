use owo_colors::OwoColorize;
use serde_json::Value;
use std::cmp::Ordering;
use std::io::IsTerminal;

use crate::policy::{LadderRule, UNCERTAIN_LABEL};
use crate::scoring::ScoreRecord;

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Render a post id for display: strings as-is, anything else as JSON.
pub fn display_post_id(post_id: &Value) -> String {
    match post_id {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// How a label reads relative to the rest of the ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelTone {
    Credible,
    Neutral,
    Doubtful,
}

/// Tone of `label` by its rank in the ladder: upper half credible, lower
/// half doubtful, the middle rung and unknown labels neutral. "Uncertain"
/// is always neutral since the evidence floor forces it at any score.
pub fn label_tone(label: &str, ladder: &[LadderRule]) -> LabelTone {
    if label == UNCERTAIN_LABEL {
        return LabelTone::Neutral;
    }

    let mut rules: Vec<&LadderRule> = ladder.iter().collect();
    rules.sort_by(|a, b| b.min.partial_cmp(&a.min).unwrap_or(Ordering::Equal));

    let Some(rank) = rules.iter().position(|r| r.label.as_deref() == Some(label)) else {
        return LabelTone::Neutral;
    };

    let middle = rules.len() - 1;
    match (rank * 2).cmp(&middle) {
        Ordering::Less => LabelTone::Credible,
        Ordering::Greater => LabelTone::Doubtful,
        Ordering::Equal => LabelTone::Neutral,
    }
}

/// One-line summary: "{post_id} {label} {score}"
/// The label is colored by its tone in `ladder`.
pub fn format_summary(record: &ScoreRecord, ladder: &[LadderRule], use_colors: bool) -> String {
    let post_id = display_post_id(&record.meta.post_id);

    if use_colors {
        let label = match label_tone(&record.label, ladder) {
            LabelTone::Credible => record.label.green().to_string(),
            LabelTone::Neutral => record.label.yellow().to_string(),
            LabelTone::Doubtful => record.label.red().to_string(),
        };
        format!("{} {} {}", post_id.bold(), label, record.score)
    } else {
        format!("{} {} {}", post_id, record.label, record.score)
    }
}

/// Format records as tab-separated values for scripting
/// Columns: post_id, label, score (no headers, no colors)
pub fn format_tsv(records: &[ScoreRecord]) -> String {
    records
        .iter()
        .map(|r| format!("{}\t{}\t{}", display_post_id(&r.meta.post_id), r.label, r.score))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Multi-line breakdown of a record (for verbose mode)
pub fn format_breakdown(record: &ScoreRecord) -> String {
    let mut lines = vec![format!(
        "{}: {} ({})",
        display_post_id(&record.meta.post_id),
        record.score,
        record.label
    )];

    if record.contributions.is_empty() {
        lines.push("  No rules applied".to_string());
    }
    for contribution in &record.contributions {
        lines.push(format!("  {}", contribution));
    }

    for citation in &record.citations {
        lines.push(format!(
            "  cite: {} [{}] {}",
            citation.title.as_deref().unwrap_or("(untitled)"),
            citation.tier.as_deref().unwrap_or("?"),
            citation.stance.as_deref().unwrap_or("?")
        ));
    }

    lines.push(format!(
        "  run {} in {}ms",
        record.meta.run_id, record.meta.latency_ms
    ));
    lines.join("\n")
}
