use super::types::{Source, Stance, Tier};

/// Tier/stance tally over the independent sources of a post.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EvidenceCounts {
    pub support_ap: u32,
    pub contradict_ap: u32,
    pub support_b: u32,
    pub support_c: u32,
    pub has_tier_p: bool,
}

impl EvidenceCounts {
    pub fn tally<'a>(sources: impl IntoIterator<Item = &'a Source>) -> Self {
        let mut counts = Self::default();

        for source in sources {
            let Some(tier) = source.tier() else { continue };
            if tier == Tier::P {
                counts.has_tier_p = true;
            }
            match (tier, source.stance()) {
                (t, Some(Stance::Support)) if t.is_primary() => counts.support_ap += 1,
                (t, Some(Stance::Contradict)) if t.is_primary() => counts.contradict_ap += 1,
                (Tier::B, Some(Stance::Support)) => counts.support_b += 1,
                (Tier::C, Some(Stance::Support)) => counts.support_c += 1,
                _ => {}
            }
        }

        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn src(title: &str, tier: &str, stance: &str) -> Source {
        Source {
            title: Some(title.to_string()),
            organization: None,
            tier: Some(tier.to_string()),
            stance: Some(stance.to_string()),
        }
    }

    #[test]
    fn test_tally_buckets() {
        let sources = vec![
            src("a1", "A", "support"),
            src("p1", "P", "support"),
            src("a2", "a", "Contradicts"),
            src("b1", "B", "support"),
            src("c1", "c", "SUPPORT"),
            src("c2", "C", "contradict"),
        ];
        let counts = EvidenceCounts::tally(&sources);

        assert_eq!(counts.support_ap, 2);
        assert_eq!(counts.contradict_ap, 1);
        assert_eq!(counts.support_b, 1);
        assert_eq!(counts.support_c, 1);
        assert!(counts.has_tier_p);
    }

    #[test]
    fn test_tier_p_detected_regardless_of_stance() {
        let counts = EvidenceCounts::tally(&[src("p", "p", "unclear")]);
        assert!(counts.has_tier_p);
        assert_eq!(counts.support_ap, 0);
        assert_eq!(counts.contradict_ap, 0);
    }

    #[test]
    fn test_unknown_tier_and_stance_ignored() {
        let sources = vec![
            src("x", "Z", "support"),
            src("y", "B", "neutral"),
            Source::default(),
        ];
        assert_eq!(EvidenceCounts::tally(&sources), EvidenceCounts::default());
    }
}
