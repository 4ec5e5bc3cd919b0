use serde::{Deserialize, Serialize};

/// Literal winner value that marks a drawn / abandoned match.
pub const DRAW_LITERAL: &str = "DRAW";

/// Resolved result of a match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchOutcome {
    Winner(String),
    Draw,
}

/// One match as supplied by the caller.
///
/// `match_number` is the stable identifier used by predictions and chips.
/// It is independent of where the record sits in the caller's store — the
/// engine never derives it from list position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub stage_id: String,
    pub match_number: u32,
    pub team1: String,
    pub team2: String,
    /// Winning team name, `"DRAW"`, or absent while the match is unplayed.
    #[serde(default)]
    pub winner: Option<String>,
}

impl MatchRecord {
    /// Parse the raw winner cell into an outcome.
    ///
    /// Blank or whitespace-only values count as "not yet played".
    pub fn outcome(&self) -> Option<MatchOutcome> {
        let raw = self.winner.as_deref()?.trim();
        if raw.is_empty() {
            return None;
        }
        if raw == DRAW_LITERAL {
            Some(MatchOutcome::Draw)
        } else {
            Some(MatchOutcome::Winner(raw.to_string()))
        }
    }

    pub fn is_decided(&self) -> bool {
        self.outcome().is_some()
    }

    /// The team opposing `team`, if `team` plays in this match.
    pub fn opponent_of(&self, team: &str) -> Option<&str> {
        if team == self.team1 {
            Some(&self.team2)
        } else if team == self.team2 {
            Some(&self.team1)
        } else {
            None
        }
    }
}
