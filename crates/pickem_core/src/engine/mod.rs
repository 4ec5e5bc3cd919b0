//! The scoring engine proper.
//!
//! Dependency order: [`chip_registry`] and [`penalty`] feed
//! [`stage_scorer`]; [`bonus_scorer`] is independent; [`aggregator`] merges
//! everything into the ranked snapshot.

pub mod aggregator;
pub mod bonus_scorer;
pub mod chip_registry;
pub mod penalty;
pub mod stage_scorer;


pub use aggregator::{aggregate, aggregate_now, ContestInputs};
pub use chip_registry::{ChipRegistry, ChipStore, ChipView, InMemoryChipStore};
pub use penalty::{compute_schedule, PenaltySchedule};
pub use stage_scorer::StageTally;
