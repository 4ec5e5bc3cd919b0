//! Generic per-stage scoring.
//!
//! One scorer covers every stage; differences between stages (flat award vs
//! pool split, draw value, chip eligibility) live entirely in the
//! [`StageConfig`] handed in by the caller.

use std::collections::{HashMap, HashSet};

use tracing::{debug, warn};

use crate::engine::chip_registry::ChipView;
use crate::engine::penalty::PenaltySchedule;
use crate::models::{MatchOutcome, MatchRecord, Prediction, ScoringMode, StageConfig};

/// Per-participant result of scoring one stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StageTally {
    pub points: i64,
    /// Late-submission deduction accrued in this stage; zero or negative.
    pub penalty: i64,
}

/// Score one stage.
///
/// `predictions` must already have wildcard flips applied. `penalties` is
/// passed only for the stage the late-submission schedule covers; pass
/// `None` elsewhere. Matches without a decided outcome contribute nothing.
pub fn score(
    config: &StageConfig,
    matches: &[MatchRecord],
    predictions: &[Prediction],
    chips: &ChipView,
    penalties: Option<&HashMap<String, PenaltySchedule>>,
    late_penalty_per_match: i64,
) -> HashMap<String, StageTally> {
    let mut tallies: HashMap<String, StageTally> = HashMap::new();

    let mut stage_matches: Vec<&MatchRecord> = matches
        .iter()
        .filter(|m| m.stage_id == config.stage_id)
        .collect();
    if stage_matches.is_empty() {
        warn!(stage = %config.stage_id, "no matches supplied for stage; skipping");
        return tallies;
    }
    // Ordinal position for the penalty range follows match-number order,
    // not the order records arrived in.
    stage_matches.sort_by_key(|m| m.match_number);

    let stage_match_numbers: HashSet<u32> =
        stage_matches.iter().map(|m| m.match_number).collect();

    let mut picks_by_match: HashMap<u32, Vec<(&str, &str)>> = HashMap::new();
    let mut stage_participants: HashSet<&str> = HashSet::new();
    for p in predictions {
        if stage_match_numbers.contains(&p.match_number) {
            picks_by_match
                .entry(p.match_number)
                .or_default()
                .push((p.participant.as_str(), p.pick.as_str()));
            stage_participants.insert(p.participant.as_str());
        }
    }

    for (idx, m) in stage_matches.iter().enumerate() {
        let position = (idx + 1) as u32;
        let Some(outcome) = m.outcome() else {
            continue;
        };

        // A penalized match forfeits the normal award outright, correct
        // pick or not, and charges the flat deduction instead.
        if let Some(penalties) = penalties {
            for (name, schedule) in penalties {
                if schedule.late_match_count >= position {
                    tallies.entry(name.clone()).or_default().penalty -= late_penalty_per_match;
                }
            }
        }
        let is_penalized = |name: &str| {
            penalties
                .and_then(|p| p.get(name))
                .is_some_and(|s| s.late_match_count >= position)
        };

        let doubled = |name: &str| {
            config.chips_allowed && chips.double_up_target(name) == Some(m.match_number)
        };

        match outcome {
            MatchOutcome::Draw => {
                // Everyone with a prediction anywhere in the stage gets the
                // draw award, doubled only by a DoubleUp on this very match.
                for &name in &stage_participants {
                    if is_penalized(name) {
                        continue;
                    }
                    let points = if doubled(name) {
                        config.draw_points * 2
                    } else {
                        config.draw_points
                    };
                    tallies.entry(name.to_string()).or_default().points += points;
                }
            }
            MatchOutcome::Winner(winner) => {
                if winner != m.team1 && winner != m.team2 {
                    warn!(
                        stage = %config.stage_id,
                        match_number = m.match_number,
                        winner = %winner,
                        "winner names neither team of the match"
                    );
                }
                let picks = picks_by_match
                    .get(&m.match_number)
                    .map(Vec::as_slice)
                    .unwrap_or(&[]);
                match config.mode {
                    ScoringMode::FixedPerPick { base_points } => {
                        for &(name, pick) in picks {
                            if is_penalized(name) || pick != winner {
                                continue;
                            }
                            let points = if doubled(name) {
                                base_points * 2
                            } else {
                                base_points
                            };
                            tallies.entry(name.to_string()).or_default().points += points;
                        }
                    }
                    ScoringMode::PoolSplit { pool } => {
                        let correct: Vec<&str> = picks
                            .iter()
                            .filter(|&&(name, pick)| !is_penalized(name) && pick == winner)
                            .map(|&(name, _)| name)
                            .collect();
                        let k = correct.len() as i64;
                        if k == 0 {
                            // Documented no-award case: nobody called it,
                            // the pool is simply not distributed.
                            debug!(
                                stage = %config.stage_id,
                                match_number = m.match_number,
                                "pool-split match with zero correct picks"
                            );
                            continue;
                        }
                        // floor division; the remainder is forfeited.
                        let share = pool / k;
                        for name in correct {
                            tallies.entry(name.to_string()).or_default().points += share;
                        }
                    }
                }
            }
        }
    }

    tallies
}
