use std::collections::HashSet;

use super::types::Source;

/// Keep the first source seen for each identity, preserving order.
/// Later sources with the same identity are dropped, not merged.
pub fn independent_sources(sources: &[Source]) -> Vec<&Source> {
    let mut seen = HashSet::new();
    sources
        .iter()
        .filter(|s| seen.insert(s.identity()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titled(title: &str, tier: &str) -> Source {
        Source {
            title: Some(title.to_string()),
            tier: Some(tier.to_string()),
            ..Source::default()
        }
    }

    #[test]
    fn test_first_occurrence_wins() {
        let sources = vec![titled("X", "A"), titled("Y", "B"), titled("X", "C")];
        let kept = independent_sources(&sources);

        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].tier.as_deref(), Some("A"));
        assert_eq!(kept[1].title.as_deref(), Some("Y"));
    }

    #[test]
    fn test_identity_is_trimmed() {
        let sources = vec![titled("X", "A"), titled("  X ", "B")];
        assert_eq!(independent_sources(&sources).len(), 1);
    }

    #[test]
    fn test_organization_and_title_share_namespace() {
        let by_org = Source {
            organization: Some("X".to_string()),
            ..Source::default()
        };
        let sources = vec![titled("X", "A"), by_org];
        assert_eq!(independent_sources(&sources).len(), 1);
    }

    #[test]
    fn test_anonymous_sources_collapse() {
        let sources = vec![Source::default(), Source::default()];
        assert_eq!(independent_sources(&sources).len(), 1);
    }

    #[test]
    fn test_empty() {
        assert!(independent_sources(&[]).is_empty());
    }
}
