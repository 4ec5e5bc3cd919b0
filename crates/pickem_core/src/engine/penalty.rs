//! Late-submission penalty schedule.

use chrono::{DateTime, Utc};

const MILLIS_PER_DAY: i64 = 86_400_000;

/// How many leading stage matches a participant forfeits.
///
/// The count is interpreted ordinally by the stage scorer: the first
/// `late_match_count` matches of the stage (in match-number order) pay no
/// award and each contribute a flat deduction instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PenaltySchedule {
    pub late_match_count: u32,
}

impl PenaltySchedule {
    pub fn is_late(&self) -> bool {
        self.late_match_count > 0
    }
}

/// Derive the schedule from the submission instant.
///
/// On-time submissions (including exactly at the deadline) carry no
/// penalty; otherwise every started day late forfeits one more match.
/// A participant with no recorded submission gets no schedule here — their
/// missing picks already score zero on their own.
pub fn compute_schedule(
    deadline: DateTime<Utc>,
    submitted_at: DateTime<Utc>,
) -> PenaltySchedule {
    let late = submitted_at - deadline;
    let millis = late.num_milliseconds();
    if millis <= 0 {
        return PenaltySchedule::default();
    }
    let days = (millis + MILLIS_PER_DAY - 1) / MILLIS_PER_DAY;
    PenaltySchedule {
        late_match_count: days as u32,
    }
}
