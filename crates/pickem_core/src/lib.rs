//! # pickem_core - Prediction-Contest Scoring Engine
//!
//! This library computes a ranked, auditable leaderboard for a
//! prediction contest: stage point rules, one-time chip modifiers,
//! pool-split award distribution, late-submission penalties, bonus
//! scoring, and deterministic rank / rank-delta computation.
//!
//! ## Features
//! - Stateless, single-pass recompute: identical inputs always produce an
//!   identical snapshot (ranks included), so retries and
//!   audit-by-recomputation are safe
//! - Stage rules are data ([`models::StageConfig`]), not code — rule
//!   changes between tournament editions never touch the engine
//! - JSON API for callers across a process or FFI boundary

pub mod api;
pub mod engine;
pub mod error;
pub mod models;

pub use api::recompute_leaderboard_json;
pub use engine::{aggregate, aggregate_now, ChipRegistry, ContestInputs};
pub use error::{Result, ScoreError};
pub use models::{LeaderboardSnapshot, ParticipantScoreRecord};
