//! Input and output data structures for the scoring engine.
//!
//! Everything here is plain serde data: the caller materializes these from
//! whatever store it uses (spreadsheet, database, request body) before a
//! recompute, and persists the resulting [`LeaderboardSnapshot`] however it
//! likes. The engine never talks to storage itself.

mod bonus;
mod chip;
mod config;
mod fixture;
mod prediction;
mod snapshot;

pub use bonus::BonusCategory;
pub use chip::{ChipActivation, ChipKind};
pub use config::{ContestConfig, ScoringMode, StageConfig};
pub use fixture::{MatchOutcome, MatchRecord, DRAW_LITERAL};
pub use prediction::Prediction;
pub use snapshot::{LeaderboardSnapshot, ParticipantScoreRecord, RankDelta};
