//! Compliance scoring over a report's item results.

use siga_core::{Catalog, EvaluationBand, ItemResult, Scorecard};
use std::collections::{BTreeMap, HashSet};

/// Compute the derived scorecard for a set of item results.
///
/// Per category: items not marked Not-Applicable are the applicable set;
/// unanswered items stay in it and count as non-compliant, so an untouched
/// report scores low rather than looking clean. A category whose items are
/// all Not-Applicable scores 100. The overall score is the equal-weighted
/// mean of category scores, so small categories carry the same weight as
/// large ones.
pub fn compute_scores(catalog: &Catalog, results: &[ItemResult]) -> Scorecard {
    let mut category_scores = BTreeMap::new();
    let mut total: u32 = 0;
    let mut scored_categories: u32 = 0;

    for category in catalog.categories() {
        let item_ids: HashSet<&str> = category.item_ids().collect();
        let category_results = results.iter().filter(|r| item_ids.contains(r.item_id.as_str()));

        let mut applicable: u32 = 0;
        let mut compliant: u32 = 0;
        for result in category_results {
            if result.is_applicable() {
                applicable += 1;
                if result.is_compliant() {
                    compliant += 1;
                }
            }
        }

        let score = if applicable == 0 {
            100
        } else {
            round_half_up(100.0 * f64::from(compliant) / f64::from(applicable))
        };
        category_scores.insert(category.id.clone(), score);
        total += score;
        scored_categories += 1;
    }

    let overall_score = if scored_categories == 0 {
        100
    } else {
        round_half_up(f64::from(total) / f64::from(scored_categories))
    };

    Scorecard {
        overall_score,
        evaluation: EvaluationBand::from_score(overall_score),
        category_scores,
    }
}

fn round_half_up(value: f64) -> u32 {
    // f64::round ties away from zero, which is half-up for non-negative input
    value.round() as u32
}
