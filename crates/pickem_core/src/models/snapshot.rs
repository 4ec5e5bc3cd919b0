use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Direction a participant moved relative to the previous snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankDelta {
    Up,
    Down,
    Same,
}

impl RankDelta {
    pub fn from_ranks(new_rank: u32, previous_rank: Option<u32>) -> Self {
        match previous_rank {
            Some(old) if new_rank < old => RankDelta::Up,
            Some(old) if new_rank > old => RankDelta::Down,
            _ => RankDelta::Same,
        }
    }
}

/// One leaderboard row, rebuilt from scratch on every recompute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantScoreRecord {
    pub name: String,
    /// stage id -> points earned in that stage (zero entries included so
    /// every configured stage shows up in the breakdown).
    pub stage_points: BTreeMap<String, i64>,
    pub bonus_points: i64,
    /// Accumulated late-submission deduction; zero or negative.
    pub penalty: i64,
    pub total: i64,
    #[serde(default)]
    pub submitted_at: Option<DateTime<Utc>>,
    /// Dense 1-based rank.
    pub rank: u32,
    #[serde(default)]
    pub previous_rank: Option<u32>,
    pub delta: RankDelta,
    /// Display summary of chips whose target match has been decided,
    /// e.g. `"Double Up, Wildcard"`.
    #[serde(default)]
    pub chips_used: String,
}

/// Complete output of one scoring run. Replaces any prior snapshot
/// wholesale; never patched in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardSnapshot {
    pub computed_at: DateTime<Utc>,
    pub records: Vec<ParticipantScoreRecord>,
}

impl LeaderboardSnapshot {
    pub fn rank_of(&self, name: &str) -> Option<u32> {
        self.records.iter().find(|r| r.name == name).map(|r| r.rank)
    }

    pub fn participants(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delta_direction() {
        assert_eq!(RankDelta::from_ranks(1, Some(3)), RankDelta::Up);
        assert_eq!(RankDelta::from_ranks(3, Some(1)), RankDelta::Down);
        assert_eq!(RankDelta::from_ranks(2, Some(2)), RankDelta::Same);
        assert_eq!(RankDelta::from_ranks(2, None), RankDelta::Same);
    }
}
