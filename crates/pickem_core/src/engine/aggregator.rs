//! Leaderboard aggregation: one stateless pass from raw inputs to a
//! complete, ranked snapshot.
//!
//! Every recompute rebuilds the whole board. Nothing is patched in place,
//! so retrying a run with identical inputs is always safe and always yields
//! the same snapshot.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::engine::chip_registry::ChipRegistry;
use crate::engine::{bonus_scorer, penalty, stage_scorer};
use crate::error::{Result, ScoreError};
use crate::models::{
    BonusCategory, ChipActivation, ContestConfig, LeaderboardSnapshot, MatchRecord,
    ParticipantScoreRecord, Prediction, RankDelta,
};

/// Everything one recompute needs, fully materialized up front.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContestInputs {
    pub config: ContestConfig,
    pub matches: Vec<MatchRecord>,
    #[serde(default)]
    pub predictions: Vec<Prediction>,
    #[serde(default)]
    pub chips: Vec<ChipActivation>,
    #[serde(default)]
    pub bonuses: Vec<BonusCategory>,
    /// participant -> group-stage submission instant
    #[serde(default)]
    pub submissions: BTreeMap<String, DateTime<Utc>>,
}

/// Run one full scoring pass with the current wall clock as `computed_at`.
pub fn aggregate_now(
    inputs: &ContestInputs,
    previous: Option<&LeaderboardSnapshot>,
) -> Result<LeaderboardSnapshot> {
    aggregate(inputs, previous, Utc::now())
}

/// Run one full scoring pass.
///
/// `computed_at` is taken from the caller so that audit-by-recomputation
/// can reproduce a snapshot bit for bit.
pub fn aggregate(
    inputs: &ContestInputs,
    previous: Option<&LeaderboardSnapshot>,
    computed_at: DateTime<Utc>,
) -> Result<LeaderboardSnapshot> {
    let config = &inputs.config;
    if config.stages.is_empty() {
        return Err(ScoreError::MalformedInput("no stages configured".to_string()));
    }
    if inputs.matches.is_empty() {
        // Not fatal: the board can still be built from bonus answers,
        // timestamps, and the previous snapshot.
        warn!("match list is empty; stages will contribute nothing");
    }

    // Chips may only target the chip-eligible stage's matches.
    let chip_stage_matches: HashSet<u32> = match config.chip_stage() {
        Some(stage) => inputs
            .matches
            .iter()
            .filter(|m| m.stage_id == stage.stage_id)
            .map(|m| m.match_number)
            .collect(),
        None => HashSet::new(),
    };
    let chips = ChipRegistry::from_activations(chip_stage_matches.iter().copied(), &inputs.chips)
        .view();

    let predictions = apply_wildcards(&inputs.predictions, &inputs.matches, &chips);

    // Only late submitters carry a schedule; on-time entries would be noise.
    let mut penalties: HashMap<String, penalty::PenaltySchedule> = HashMap::new();
    for (name, &submitted_at) in &inputs.submissions {
        let schedule = penalty::compute_schedule(config.deadline, submitted_at);
        if schedule.is_late() {
            debug!(
                participant = %name,
                late_matches = schedule.late_match_count,
                "late submission"
            );
            penalties.insert(name.clone(), schedule);
        }
    }

    let mut stage_tallies: Vec<(&str, HashMap<String, stage_scorer::StageTally>)> = Vec::new();
    for stage in &config.stages {
        let tallies = stage_scorer::score(
            stage,
            &inputs.matches,
            &predictions,
            &chips,
            stage.chips_allowed.then_some(&penalties),
            config.late_penalty_per_match,
        );
        stage_tallies.push((stage.stage_id.as_str(), tallies));
    }

    let bonus_totals = bonus_scorer::score(&inputs.bonuses, config.bonus_points_per_category);

    // Everyone who shows up anywhere belongs on the board, including a
    // participant with zero picks so far.
    let mut universe: BTreeSet<String> = BTreeSet::new();
    universe.extend(inputs.predictions.iter().map(|p| p.participant.clone()));
    for category in &inputs.bonuses {
        universe.extend(category.answers.keys().cloned());
    }
    universe.extend(inputs.submissions.keys().cloned());
    if let Some(prev) = previous {
        universe.extend(prev.participants().map(str::to_string));
    }

    let decided_matches: HashSet<u32> = inputs
        .matches
        .iter()
        .filter(|m| m.is_decided())
        .map(|m| m.match_number)
        .collect();

    let mut records: Vec<ParticipantScoreRecord> = Vec::with_capacity(universe.len());
    for name in &universe {
        let mut stage_points: BTreeMap<String, i64> = config
            .stages
            .iter()
            .map(|s| (s.stage_id.clone(), 0))
            .collect();
        let mut penalty_total = 0i64;
        for (stage_id, tallies) in &stage_tallies {
            if let Some(tally) = tallies.get(name) {
                *stage_points.entry((*stage_id).to_string()).or_default() += tally.points;
                penalty_total += tally.penalty;
            }
        }

        let mut bonus_points = bonus_totals.get(name).copied().unwrap_or(0);
        if penalties.contains_key(name) {
            if let Some(cap) = config.late_bonus_cap {
                bonus_points = bonus_points.min(cap);
            }
        }

        let total = stage_points.values().sum::<i64>() + bonus_points + penalty_total;
        records.push(ParticipantScoreRecord {
            name: name.clone(),
            stage_points,
            bonus_points,
            penalty: penalty_total,
            total,
            submitted_at: inputs.submissions.get(name).copied(),
            rank: 0,
            previous_rank: None,
            delta: RankDelta::Same,
            chips_used: chips.used_summary(name, &decided_matches),
        });
    }

    // Total descending, earlier submission wins ties, no timestamp sorts
    // last, name as the final deterministic tie-breaker.
    records.sort_by(|a, b| {
        b.total
            .cmp(&a.total)
            .then_with(|| match (a.submitted_at, b.submitted_at) {
                (Some(x), Some(y)) => x.cmp(&y),
                (Some(_), None) => std::cmp::Ordering::Less,
                (None, Some(_)) => std::cmp::Ordering::Greater,
                (None, None) => std::cmp::Ordering::Equal,
            })
            .then_with(|| a.name.cmp(&b.name))
    });

    for (idx, record) in records.iter_mut().enumerate() {
        record.rank = (idx + 1) as u32;
        record.previous_rank = previous.and_then(|prev| prev.rank_of(&record.name));
        record.delta = RankDelta::from_ranks(record.rank, record.previous_rank);
    }

    Ok(LeaderboardSnapshot { computed_at, records })
}

/// Flip each wildcard holder's pick on the target match to the opposing
/// team. The scoring formula itself is untouched; only the pick changes.
fn apply_wildcards(
    predictions: &[Prediction],
    matches: &[MatchRecord],
    chips: &crate::engine::chip_registry::ChipView,
) -> Vec<Prediction> {
    let mut adjusted = predictions.to_vec();
    for (participant, target) in chips.wildcards() {
        let Some(record) = matches.iter().find(|m| m.match_number == target) else {
            warn!(
                participant = %participant,
                match_number = target,
                "wildcard targets an unknown match"
            );
            continue;
        };
        let Some(prediction) = adjusted
            .iter_mut()
            .find(|p| p.participant == participant && p.match_number == target)
        else {
            // Nothing to flip; the participant never picked this match.
            continue;
        };
        match record.opponent_of(&prediction.pick) {
            Some(opponent) => prediction.pick = opponent.to_string(),
            None => warn!(
                participant = %participant,
                match_number = target,
                pick = %prediction.pick,
                "wildcard pick names neither team; leaving it unchanged"
            ),
        }
    }
    adjusted
}
