use std::fmt;

use serde::{Deserialize, Serialize};

/// One-time-per-contest modifier a participant can attach to a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChipKind {
    /// Doubles whatever points the targeted match would have paid.
    DoubleUp,
    /// Flips the participant's pick for the targeted match to the
    /// opposing team before scoring.
    Wildcard,
}

impl ChipKind {
    /// Label used in the leaderboard chip summary.
    pub fn label(&self) -> &'static str {
        match self {
            ChipKind::DoubleUp => "Double Up",
            ChipKind::Wildcard => "Wildcard",
        }
    }
}

impl fmt::Display for ChipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A recorded chip activation, already resolved to a target match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChipActivation {
    pub participant: String,
    pub kind: ChipKind,
    pub match_number: u32,
}
