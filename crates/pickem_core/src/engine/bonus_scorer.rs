//! Bonus-category scoring.
//!
//! Driven purely by declared-answer matching: no participant name is ever
//! special-cased, and the per-category award comes from configuration.

use std::collections::HashMap;

use tracing::debug;

use crate::models::BonusCategory;

/// Score every decided bonus category.
///
/// Credit is all-or-nothing per category: a case-sensitive exact match
/// against the declared answer. Undecided categories contribute nothing.
pub fn score(categories: &[BonusCategory], points_per_category: i64) -> HashMap<String, i64> {
    let mut totals: HashMap<String, i64> = HashMap::new();
    for category in categories {
        let Some(correct) = category.correct_answer.as_deref() else {
            debug!(category = %category.name, "bonus category undecided; skipping");
            continue;
        };
        for (participant, answer) in &category.answers {
            if answer == correct {
                *totals.entry(participant.clone()).or_default() += points_per_category;
            }
        }
    }
    totals
}
