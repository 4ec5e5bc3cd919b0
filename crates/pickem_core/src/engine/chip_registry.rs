//! Chip activation bookkeeping.
//!
//! Activation happens out-of-band (when a participant spends the chip, not
//! during a scoring run), so [`ChipRegistry::activate`] holds the one lock
//! the engine needs: the duplicate check and the insert form a single
//! critical section. Scoring itself reads an immutable [`ChipView`] taken
//! before the run starts.
//!
//! The backing store is a trait so a caller can substitute a persistent
//! store with its own uniqueness constraint; [`InMemoryChipStore`] is the
//! default used for batch recomputes.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use tracing::warn;

use crate::error::{Result, ScoreError};
use crate::models::{ChipActivation, ChipKind};

/// Storage behind the registry. Calls arrive under the registry's lock, so
/// an implementation does not need its own synchronization unless it is
/// shared elsewhere.
pub trait ChipStore: Send {
    fn get(&self, participant: &str, kind: ChipKind) -> Option<u32>;
    fn insert(&mut self, participant: &str, kind: ChipKind, match_number: u32);
    fn entries(&self) -> Vec<(String, ChipKind, u32)>;
}

#[derive(Debug, Default)]
pub struct InMemoryChipStore {
    activations: HashMap<(String, ChipKind), u32>,
}

impl ChipStore for InMemoryChipStore {
    fn get(&self, participant: &str, kind: ChipKind) -> Option<u32> {
        self.activations
            .get(&(participant.to_string(), kind))
            .copied()
    }

    fn insert(&mut self, participant: &str, kind: ChipKind, match_number: u32) {
        self.activations
            .insert((participant.to_string(), kind), match_number);
    }

    fn entries(&self) -> Vec<(String, ChipKind, u32)> {
        self.activations
            .iter()
            .map(|((participant, kind), &m)| (participant.clone(), *kind, m))
            .collect()
    }
}

pub struct ChipRegistry<S: ChipStore = InMemoryChipStore> {
    /// Match numbers chips may legally target (the chip-eligible stage).
    eligible_matches: HashSet<u32>,
    store: Mutex<S>,
}

impl ChipRegistry<InMemoryChipStore> {
    pub fn new(eligible_matches: impl IntoIterator<Item = u32>) -> Self {
        Self::with_store(eligible_matches, InMemoryChipStore::default())
    }

    /// Load already-validated activation records for a recompute.
    ///
    /// Entries that would fail [`activate`](Self::activate) are logged and
    /// dropped rather than aborting the run: by the time a recompute sees
    /// them they are historical data, and a bad row must not take the whole
    /// leaderboard down with it.
    pub fn from_activations(
        eligible_matches: impl IntoIterator<Item = u32>,
        activations: &[ChipActivation],
    ) -> Self {
        let registry = Self::new(eligible_matches);
        for chip in activations {
            if let Err(err) = registry.activate(&chip.participant, chip.kind, chip.match_number) {
                warn!(
                    participant = %chip.participant,
                    chip = %chip.kind,
                    "ignoring chip activation: {err}"
                );
            }
        }
        registry
    }
}

impl<S: ChipStore> ChipRegistry<S> {
    pub fn with_store(eligible_matches: impl IntoIterator<Item = u32>, store: S) -> Self {
        ChipRegistry {
            eligible_matches: eligible_matches.into_iter().collect(),
            store: Mutex::new(store),
        }
    }

    /// Record a chip activation.
    ///
    /// Fails with [`ScoreError::DuplicateChip`] if the participant already
    /// activated this kind, and with [`ScoreError::InvalidChipTarget`] if
    /// the target match is outside the chip-eligible stage. Never silently
    /// overwrites an earlier activation.
    pub fn activate(&self, participant: &str, kind: ChipKind, match_number: u32) -> Result<()> {
        if !self.eligible_matches.contains(&match_number) {
            return Err(ScoreError::InvalidChipTarget { match_number });
        }
        let mut store = self.lock_store();
        if store.get(participant, kind).is_some() {
            return Err(ScoreError::DuplicateChip {
                participant: participant.to_string(),
                kind,
            });
        }
        store.insert(participant, kind, match_number);
        Ok(())
    }

    pub fn lookup(&self, participant: &str, kind: ChipKind) -> Option<u32> {
        self.lock_store().get(participant, kind)
    }

    /// Immutable per-run view consumed by the scorer and aggregator.
    pub fn view(&self) -> ChipView {
        let mut double_up = HashMap::new();
        let mut wildcard = HashMap::new();
        for (participant, kind, match_number) in self.lock_store().entries() {
            match kind {
                ChipKind::DoubleUp => double_up.insert(participant, match_number),
                ChipKind::Wildcard => wildcard.insert(participant, match_number),
            };
        }
        ChipView { double_up, wildcard }
    }

    fn lock_store(&self) -> std::sync::MutexGuard<'_, S> {
        self.store
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Read-only snapshot of chip state for one scoring run.
#[derive(Debug, Clone, Default)]
pub struct ChipView {
    double_up: HashMap<String, u32>,
    wildcard: HashMap<String, u32>,
}

impl ChipView {
    pub fn double_up_target(&self, participant: &str) -> Option<u32> {
        self.double_up.get(participant).copied()
    }

    pub fn wildcard_target(&self, participant: &str) -> Option<u32> {
        self.wildcard.get(participant).copied()
    }

    pub fn wildcards(&self) -> impl Iterator<Item = (&str, u32)> {
        self.wildcard.iter().map(|(name, &m)| (name.as_str(), m))
    }

    /// Display summary of chips already "used": a chip only counts once its
    /// target match has been decided. A chip parked on a future match stays
    /// hidden even though its activation is locked in.
    pub fn used_summary(&self, participant: &str, decided_matches: &HashSet<u32>) -> String {
        let mut used = Vec::new();
        if let Some(m) = self.double_up_target(participant) {
            if decided_matches.contains(&m) {
                used.push(ChipKind::DoubleUp.label());
            }
        }
        if let Some(m) = self.wildcard_target(participant) {
            if decided_matches.contains(&m) {
                used.push(ChipKind::Wildcard.label());
            }
        }
        used.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> ChipRegistry {
        ChipRegistry::new(1..=12)
    }

    #[test]
    fn activate_and_lookup() {
        let reg = registry();
        reg.activate("Asha", ChipKind::DoubleUp, 4).unwrap();
        assert_eq!(reg.lookup("Asha", ChipKind::DoubleUp), Some(4));
        assert_eq!(reg.lookup("Asha", ChipKind::Wildcard), None);
    }

    #[test]
    fn second_activation_of_same_kind_is_rejected() {
        let reg = registry();
        reg.activate("Asha", ChipKind::DoubleUp, 4).unwrap();
        let err = reg.activate("Asha", ChipKind::DoubleUp, 7).unwrap_err();
        assert!(matches!(err, ScoreError::DuplicateChip { .. }));
        // Original target survives.
        assert_eq!(reg.lookup("Asha", ChipKind::DoubleUp), Some(4));
    }

    #[test]
    fn different_kinds_are_independent() {
        let reg = registry();
        reg.activate("Asha", ChipKind::DoubleUp, 4).unwrap();
        reg.activate("Asha", ChipKind::Wildcard, 9).unwrap();
        assert_eq!(reg.lookup("Asha", ChipKind::Wildcard), Some(9));
    }

    #[test]
    fn target_outside_eligible_stage_is_rejected() {
        let reg = registry();
        let err = reg.activate("Asha", ChipKind::DoubleUp, 13).unwrap_err();
        assert!(matches!(
            err,
            ScoreError::InvalidChipTarget { match_number: 13 }
        ));
    }

    #[test]
    fn concurrent_activations_yield_exactly_one_winner() {
        use std::sync::Arc;

        let reg = Arc::new(registry());
        let handles: Vec<_> = (1..=8)
            .map(|m| {
                let reg = Arc::clone(&reg);
                std::thread::spawn(move || reg.activate("Asha", ChipKind::DoubleUp, m).is_ok())
            })
            .collect();
        let successes = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|&ok| ok)
            .count();
        assert_eq!(successes, 1);
    }

    #[test]
    fn used_summary_hides_undecided_targets() {
        let reg = registry();
        reg.activate("Asha", ChipKind::DoubleUp, 2).unwrap();
        reg.activate("Asha", ChipKind::Wildcard, 11).unwrap();
        let view = reg.view();
        let decided: HashSet<u32> = (1..=5).collect();
        assert_eq!(view.used_summary("Asha", &decided), "Double Up");
        let decided: HashSet<u32> = (1..=12).collect();
        assert_eq!(view.used_summary("Asha", &decided), "Double Up, Wildcard");
        assert_eq!(view.used_summary("Noor", &decided), "");
    }
}
