//! Batch recompute: contest-input JSON in, leaderboard snapshot JSON out.
//!
//! The logic lives here rather than in `main.rs` so the file round-trip is
//! testable without spawning the binary.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use pickem_core::{aggregate_now, ContestInputs, LeaderboardSnapshot};

/// What a recompute run produced, for CLI reporting.
#[derive(Debug)]
pub struct RecomputeSummary {
    pub participants: usize,
    /// Name and total of the current leader, if anyone is on the board.
    pub leader: Option<(String, i64)>,
}

pub fn run_recompute(
    input: &Path,
    output: &Path,
    previous: Option<&Path>,
    pretty: bool,
) -> Result<RecomputeSummary> {
    let raw = fs::read_to_string(input)
        .with_context(|| format!("reading contest input {}", input.display()))?;
    let inputs: ContestInputs =
        serde_json::from_str(&raw).context("parsing contest input JSON")?;

    let previous_snapshot: Option<LeaderboardSnapshot> = match previous {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("reading previous snapshot {}", path.display()))?;
            Some(serde_json::from_str(&raw).context("parsing previous snapshot JSON")?)
        }
        None => None,
    };

    let snapshot = aggregate_now(&inputs, previous_snapshot.as_ref())?;

    let serialized = if pretty {
        serde_json::to_string_pretty(&snapshot)?
    } else {
        serde_json::to_string(&snapshot)?
    };
    fs::write(output, serialized)
        .with_context(|| format!("writing snapshot {}", output.display()))?;

    Ok(RecomputeSummary {
        participants: snapshot.records.len(),
        leader: snapshot
            .records
            .first()
            .map(|r| (r.name.clone(), r.total)),
    })
}
