use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How a stage pays out points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScoringMode {
    /// Flat award per correct pick (group stage, super-8 style stages).
    FixedPerPick { base_points: i64 },
    /// A fixed pool split evenly (floor division) among every participant
    /// who picked the winner. The remainder is forfeited, not rolled over.
    PoolSplit { pool: i64 },
}

/// Scoring rules for one stage.
///
/// Rule changes between tournament editions are data changes here — the
/// engine itself never hard-codes a stage or a point value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageConfig {
    pub stage_id: String,
    pub mode: ScoringMode,
    /// Paid to every participant with a prediction in the stage when a
    /// match ends in a draw (rained out / abandoned included).
    pub draw_points: i64,
    /// Chips may only target matches of a stage with this flag set, and the
    /// late-submission schedule applies only to such a stage.
    #[serde(default)]
    pub chips_allowed: bool,
}

fn default_late_penalty() -> i64 {
    10
}

fn default_bonus_points() -> i64 {
    10
}

fn default_late_bonus_cap() -> Option<i64> {
    Some(30)
}

/// Whole-contest configuration supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContestConfig {
    /// Stages in scoring order.
    pub stages: Vec<StageConfig>,
    /// Deadline for the chip-eligible (group) stage submission.
    pub deadline: DateTime<Utc>,
    /// Points deducted per forfeited match for a late submitter.
    #[serde(default = "default_late_penalty")]
    pub late_penalty_per_match: i64,
    /// Points per correct bonus answer.
    #[serde(default = "default_bonus_points")]
    pub bonus_points_per_category: i64,
    /// Cap on total bonus points for late submitters; `None` disables it.
    #[serde(default = "default_late_bonus_cap")]
    pub late_bonus_cap: Option<i64>,
}

impl ContestConfig {
    /// The stage chips (and the late-submission schedule) apply to.
    pub fn chip_stage(&self) -> Option<&StageConfig> {
        self.stages.iter().find(|s| s.chips_allowed)
    }
}
