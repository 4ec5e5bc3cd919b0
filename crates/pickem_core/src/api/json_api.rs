//! JSON boundary for callers that do not want to link the typed API.
//!
//! One request in, one snapshot out. Fatal failures are limited to shape
//! validation (serde) and a contest with no stages configured; every
//! in-run degradation (skipped stage, empty match list, ignored chip row,
//! undecided bonus) is logged and absorbed by the engine instead.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::json;
use tracing::error;

use crate::engine::aggregator::{aggregate, aggregate_now, ContestInputs};
use crate::models::LeaderboardSnapshot;

#[derive(Debug, Clone, Deserialize)]
pub struct RecomputeRequest {
    #[serde(flatten)]
    pub inputs: ContestInputs,
    /// Prior snapshot for rank-delta computation.
    #[serde(default)]
    pub previous: Option<LeaderboardSnapshot>,
    /// Pin the snapshot timestamp; defaults to the current instant.
    #[serde(default)]
    pub computed_at: Option<DateTime<Utc>>,
}

/// Run one recompute over a JSON request, returning the snapshot as JSON.
///
/// Errors come back as `{"error": "..."}` rather than panicking, so a
/// caller on the other side of an FFI or process boundary always receives
/// well-formed JSON.
pub fn recompute_leaderboard_json(request_json: &str) -> String {
    let request: RecomputeRequest = match serde_json::from_str(request_json) {
        Ok(request) => request,
        Err(err) => {
            error!("invalid recompute request: {err}");
            return json!({ "error": format!("invalid request: {err}") }).to_string();
        }
    };

    let result = match request.computed_at {
        Some(computed_at) => aggregate(&request.inputs, request.previous.as_ref(), computed_at),
        None => aggregate_now(&request.inputs, request.previous.as_ref()),
    };

    match result {
        Ok(snapshot) => serde_json::to_string(&snapshot)
            .unwrap_or_else(|err| json!({ "error": format!("serialization: {err}") }).to_string()),
        Err(err) => {
            error!("recompute failed: {err}");
            json!({ "error": err.to_string() }).to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn request_json() -> String {
        json!({
            "config": {
                "stages": [
                    {
                        "stage_id": "group",
                        "mode": { "kind": "fixed_per_pick", "base_points": 10 },
                        "draw_points": 5,
                        "chips_allowed": true
                    }
                ],
                "deadline": "2025-02-19T08:59:00Z"
            },
            "matches": [
                {
                    "stage_id": "group",
                    "match_number": 1,
                    "team1": "TeamA",
                    "team2": "TeamB",
                    "winner": "TeamA"
                }
            ],
            "predictions": [
                { "participant": "P1", "match_number": 1, "pick": "TeamA" }
            ],
            "submissions": { "P1": "2025-02-19T07:00:00Z" },
            "computed_at": "2025-03-01T12:00:00Z"
        })
        .to_string()
    }

    #[test]
    fn well_formed_request_produces_a_snapshot() {
        let response = recompute_leaderboard_json(&request_json());
        let value: Value = serde_json::from_str(&response).unwrap();
        assert!(value.get("error").is_none());
        assert_eq!(value["records"][0]["name"], "P1");
        assert_eq!(value["records"][0]["total"], 10);
        assert_eq!(value["records"][0]["rank"], 1);
    }

    #[test]
    fn config_defaults_are_filled_in() {
        // late_penalty_per_match / bonus points / late cap omitted above.
        let response = recompute_leaderboard_json(&request_json());
        let value: Value = serde_json::from_str(&response).unwrap();
        assert_eq!(value["records"][0]["penalty"], 0);
    }

    #[test]
    fn malformed_request_returns_error_json() {
        let response = recompute_leaderboard_json("{\"config\": 42}");
        let value: Value = serde_json::from_str(&response).unwrap();
        assert!(value["error"].as_str().unwrap().contains("invalid request"));
    }

    #[test]
    fn empty_match_list_still_produces_a_snapshot() {
        let mut request: Value = serde_json::from_str(&request_json()).unwrap();
        request["matches"] = json!([]);
        let response = recompute_leaderboard_json(&request.to_string());
        let value: Value = serde_json::from_str(&response).unwrap();
        assert!(value.get("error").is_none());
        assert_eq!(value["records"][0]["name"], "P1");
        assert_eq!(value["records"][0]["total"], 0);
    }

    #[test]
    fn empty_stage_list_returns_error_json() {
        let mut request: Value = serde_json::from_str(&request_json()).unwrap();
        request["config"]["stages"] = json!([]);
        let response = recompute_leaderboard_json(&request.to_string());
        let value: Value = serde_json::from_str(&response).unwrap();
        assert!(value["error"].as_str().unwrap().contains("no stages"));
    }

    #[test]
    fn pinned_computed_at_makes_responses_identical() {
        let a = recompute_leaderboard_json(&request_json());
        let b = recompute_leaderboard_json(&request_json());
        assert_eq!(a, b);
    }
}
