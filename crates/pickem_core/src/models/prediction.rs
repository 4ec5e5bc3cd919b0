use serde::{Deserialize, Serialize};

/// A participant's pick for one match.
///
/// At most one prediction per (participant, match) pair is meaningful; a
/// missing prediction simply scores zero for that match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prediction {
    pub participant: String,
    pub match_number: u32,
    pub pick: String,
}
