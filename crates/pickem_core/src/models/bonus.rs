use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A bonus question scored independently of any stage.
///
/// `correct_answer` stays unset until the category is decided; undecided
/// categories pay nothing. Credit requires a case-sensitive exact match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BonusCategory {
    pub name: String,
    #[serde(default)]
    pub correct_answer: Option<String>,
    /// participant -> submitted answer
    #[serde(default)]
    pub answers: BTreeMap<String, String>,
}
