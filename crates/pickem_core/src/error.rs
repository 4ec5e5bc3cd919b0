use thiserror::Error;

use crate::models::ChipKind;

#[derive(Error, Debug)]
pub enum ScoreError {
    #[error("{participant} already activated a {kind} chip")]
    DuplicateChip { participant: String, kind: ChipKind },

    #[error("chip target match {match_number} is not in the chip-eligible stage")]
    InvalidChipTarget { match_number: u32 },

    #[error("malformed input: {0}")]
    MalformedInput(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ScoreError>;
