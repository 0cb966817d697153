//! Relevance scoring and ranking of regulations against an entity set.
//!
//! # Algorithm
//!
//! 1. Lowercase `name subject keywords` of the regulation into one haystack.
//! 2. For every entity that occurs in the haystack as a substring, add the
//!    weight of its category (see [`ScoringWeights::weight_for`]).
//! 3. Add the high-tier bonus when the tier is `Alta`.
//! 4. Clamp to at most 1.0. Every contribution is non-negative, so no lower
//!    clamp is needed and the score is monotonic in the entity set.
//!
//! A regulation matches when its score is strictly above the threshold.

use tracing::debug;

use crate::config::ScoringWeights;
use crate::entities::{EntityCategory, EntitySet};
use crate::regulation::Regulation;

/// Upper bound of every relevance score.
pub const MAX_SCORE: f64 = 1.0;

/// A regulation paired with its relevance score for one query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredRegulation<'a> {
    pub regulation: &'a Regulation,
    pub score: f64,
}

/// Score one regulation. Result is always within `[0, 1]`.
pub fn score_regulation(
    regulation: &Regulation,
    entities: &EntitySet,
    weights: &ScoringWeights,
) -> f64 {
    let haystack = regulation.search_text();

    let mut score: f64 = entities
        .iter()
        .filter(|entity| !entity.is_empty() && haystack.contains(entity.as_str()))
        .map(|entity| weights.weight_for(EntityCategory::classify(entity)))
        .sum();

    if regulation.tier.is_high() {
        score += weights.high_tier_bonus;
    }

    score.clamp(0.0, MAX_SCORE)
}

/// Whether a score passes the match threshold.
pub fn is_match(score: f64, weights: &ScoringWeights) -> bool {
    score > weights.match_threshold
}

/// Score every regulation, keep the matches, and sort them by descending
/// score. Ties keep table order.
pub fn rank<'a>(
    regulations: &'a [Regulation],
    entities: &EntitySet,
    weights: &ScoringWeights,
) -> Vec<ScoredRegulation<'a>> {
    let mut matches: Vec<ScoredRegulation<'a>> = regulations
        .iter()
        .map(|regulation| {
            let score = score_regulation(regulation, entities, weights);
            debug!(name = %regulation.name, score, "scored regulation");
            ScoredRegulation { regulation, score }
        })
        .filter(|scored| is_match(scored.score, weights))
        .collect();

    // `sort_by` is stable.
    matches.sort_by(|a, b| b.score.total_cmp(&a.score));
    matches
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::extract_entities;
    use crate::regulation::RelevanceTier;
    use proptest::prelude::*;

    fn regulation(name: &str, subject: &str, keywords: &str, tier: RelevanceTier) -> Regulation {
        Regulation {
            name: name.into(),
            number: "0".into(),
            subject: subject.into(),
            url: format!("https://leis.example/{}", name.replace(' ', "-")),
            keywords: keywords.into(),
            tier,
        }
    }

    fn set(items: &[&str]) -> EntitySet {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn reference_query_against_ooh_zoning_regulation() {
        let reg = regulation(
            "Lei de Publicidade",
            "Zoneamento ZR-3 e publicidade exterior",
            "painel, led, ooh, outdoor",
            RelevanceTier::Alta,
        );
        let entities = extract_entities("painel LED OOH 25m² Av Batel ZR-3");
        let score = score_regulation(&reg, &entities, &ScoringWeights::default());
        assert!(score >= 0.8, "score {score}");
        assert!(score <= 1.0);
    }

    #[test]
    fn single_advertising_zoning_and_bonus_sum() {
        let reg = regulation(
            "Decreto",
            "Zoneamento ZR-3 e publicidade exterior",
            "ooh",
            RelevanceTier::Alta,
        );
        let score = score_regulation(&reg, &set(&["ooh", "zr-3"]), &ScoringWeights::default());
        assert!(approx(score, 0.8), "score {score}");
    }

    #[test]
    fn score_is_clamped_to_one() {
        let reg = regulation(
            "Painel LED OOH outdoor",
            "publicidade em ZR-3 com recuo",
            "letreiro totem",
            RelevanceTier::Alta,
        );
        let entities = set(&["painel", "led", "ooh", "outdoor", "letreiro", "totem", "zr-3", "recuo"]);
        assert_eq!(score_regulation(&reg, &entities, &ScoringWeights::default()), 1.0);
    }

    #[test]
    fn category_weights_apply() {
        let w = ScoringWeights::default();
        let reg = regulation("Norma", "recuo frontal e reforma", "12m", RelevanceTier::Baixa);
        assert!(approx(score_regulation(&reg, &set(&["recuo"]), &w), 0.25));
        assert!(approx(score_regulation(&reg, &set(&["reforma"]), &w), 0.15));
        assert!(approx(score_regulation(&reg, &set(&["12m"]), &w), 0.15));
    }

    #[test]
    fn entity_matches_as_substring() {
        // "led" is found inside "ledes" and "painel" inside "painelização".
        let reg = regulation("Norma", "ledes e painelização", "", RelevanceTier::Media);
        let score = score_regulation(&reg, &set(&["led", "painel"]), &ScoringWeights::default());
        assert!(approx(score, 0.8));
    }

    #[test]
    fn empty_query_scores_tier_bonus_only_and_never_matches() {
        let w = ScoringWeights::default();
        let entities = extract_entities("");
        for tier in [RelevanceTier::Alta, RelevanceTier::Media, RelevanceTier::Baixa] {
            let reg = regulation("Lei", "publicidade", "ooh led", tier);
            let score = score_regulation(&reg, &entities, &w);
            let expected = if tier == RelevanceTier::Alta { 0.1 } else { 0.0 };
            assert!(approx(score, expected), "{tier}: {score}");
            assert!(!is_match(score, &w));
        }
    }

    #[test]
    fn threshold_is_strict() {
        let w = ScoringWeights::default();
        assert!(!is_match(0.15, &w));
        assert!(is_match(0.150_001, &w));
    }

    #[test]
    fn rank_filters_and_sorts_descending() {
        let regs = vec![
            regulation("A", "zoneamento zr-3", "", RelevanceTier::Baixa), // 0.3
            regulation("B", "nada relacionado", "", RelevanceTier::Alta), // 0.1, dropped
            regulation("C", "outdoor em zr-3", "", RelevanceTier::Alta),  // 0.8
            regulation("D", "reforma", "", RelevanceTier::Baixa),         // 0.15, dropped
        ];
        let entities = set(&["zr-3", "outdoor", "reforma"]);
        let ranked = rank(&regs, &entities, &ScoringWeights::default());
        let names: Vec<&str> = ranked.iter().map(|s| s.regulation.name.as_str()).collect();
        assert_eq!(names, vec!["C", "A"]);
    }

    #[test]
    fn rank_is_stable_for_ties() {
        let regs = vec![
            regulation("first", "recuo", "", RelevanceTier::Baixa),
            regulation("second", "zoneamento", "", RelevanceTier::Media),
            regulation("third", "recuo", "", RelevanceTier::Media),
            regulation("fourth", "zoneamento recuo", "", RelevanceTier::Baixa),
        ];
        let entities = set(&["recuo", "zoneamento"]);
        let ranked = rank(&regs, &entities, &ScoringWeights::default());
        let names: Vec<&str> = ranked.iter().map(|s| s.regulation.name.as_str()).collect();
        // fourth = 0.55, second = 0.3, first/third = 0.25 in table order
        assert_eq!(names, vec!["fourth", "second", "first", "third"]);
    }

    #[test]
    fn rank_of_empty_query_is_empty() {
        let regs = vec![
            regulation("A", "publicidade", "ooh", RelevanceTier::Alta),
            regulation("B", "zoneamento", "zr-3", RelevanceTier::Baixa),
        ];
        let ranked = rank(&regs, &extract_entities(""), &ScoringWeights::default());
        assert!(ranked.is_empty());
    }

    fn tier_strategy() -> impl Strategy<Value = RelevanceTier> {
        prop_oneof![
            Just(RelevanceTier::Alta),
            Just(RelevanceTier::Media),
            Just(RelevanceTier::Baixa),
        ]
    }

    const VOCAB: &[&str] = &[
        "ooh", "led", "painel", "outdoor", "zr-3", "zr4", "zoneamento", "recuo", "pavimentos",
        "reforma", "obra", "25m²", "3 metros", "batel", "xyz",
    ];

    proptest! {
        #[test]
        fn score_always_within_unit_interval(
            subject in "[a-z0-9 ²-]{0,60}",
            keywords in proptest::sample::subsequence(VOCAB, 0..VOCAB.len()),
            entities in proptest::sample::subsequence(VOCAB, 0..VOCAB.len()),
            tier in tier_strategy(),
        ) {
            let reg = regulation("Norma", &subject, &keywords.join(", "), tier);
            let entities: EntitySet = entities.iter().map(|s| s.to_string()).collect();
            let score = score_regulation(&reg, &entities, &ScoringWeights::default());
            prop_assert!((0.0..=1.0).contains(&score));
        }

        #[test]
        fn adding_an_entity_never_decreases_score(
            keywords in proptest::sample::subsequence(VOCAB, 0..VOCAB.len()),
            entities in proptest::sample::subsequence(VOCAB, 0..VOCAB.len()),
            extra in proptest::sample::select(VOCAB),
            tier in tier_strategy(),
        ) {
            let w = ScoringWeights::default();
            let reg = regulation("Norma", "texto", &keywords.join(", "), tier);
            let mut entities: EntitySet = entities.iter().map(|s| s.to_string()).collect();
            let before = score_regulation(&reg, &entities, &w);
            entities.insert(extra.to_string());
            let after = score_regulation(&reg, &entities, &w);
            prop_assert!(after >= before, "{} < {}", after, before);
        }
    }
}
