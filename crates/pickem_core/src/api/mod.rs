pub mod json_api;

pub use json_api::{recompute_leaderboard_json, RecomputeRequest};
