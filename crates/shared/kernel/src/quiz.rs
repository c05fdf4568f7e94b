//! Per-response timing and sizing policy built on [`QuizConstants`].

use chrono::{DateTime, Duration, Utc};
use contest_domain::constants::QuizConstants;
use serde::Serialize;

/// Deadline window for one quiz response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseDeadline {
    started_at: DateTime<Utc>,
    deadline: DateTime<Utc>,
}

impl ResponseDeadline {
    /// Opens a window starting at `started_at`.
    #[must_use]
    pub fn starting_at(started_at: DateTime<Utc>) -> Self {
        Self { started_at, deadline: started_at + Self::duration() }
    }

    /// The fixed response time limit.
    #[must_use]
    pub fn duration() -> Duration {
        Duration::from_std(QuizConstants::DEADLINE_DURATION).unwrap_or(Duration::MAX)
    }

    #[must_use]
    pub const fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub const fn deadline(&self) -> DateTime<Utc> {
        self.deadline
    }

    /// True once `now` reaches the deadline.
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.deadline
    }

    /// Time left at `now`, never negative.
    #[must_use]
    pub fn remaining(&self, now: DateTime<Utc>) -> Duration {
        (self.deadline - now).max(Duration::zero())
    }

    #[must_use]
    pub const fn question_quota() -> usize {
        QuizConstants::N_QUESTIONS_PER_RESPONSE
    }

    /// Whether a response with `count` questions fits the quota.
    #[must_use]
    pub const fn accepts_questions(count: usize) -> bool {
        count <= Self::question_quota()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 8, 0, 0).single().expect("valid timestamp")
    }

    #[test]
    fn deadline_is_fifteen_minutes_after_start() {
        let window = ResponseDeadline::starting_at(start());
        assert_eq!(window.deadline() - window.started_at(), Duration::minutes(15));
    }

    #[test]
    fn expires_exactly_at_deadline() {
        let window = ResponseDeadline::starting_at(start());
        assert!(!window.is_expired(start() + Duration::minutes(14) + Duration::seconds(59)));
        assert!(window.is_expired(start() + Duration::minutes(15)));
        assert!(window.is_expired(start() + Duration::hours(1)));
    }

    #[test]
    fn remaining_time_is_clamped() {
        let window = ResponseDeadline::starting_at(start());
        assert_eq!(window.remaining(start()), Duration::minutes(15));
        assert_eq!(window.remaining(start() + Duration::minutes(10)), Duration::minutes(5));
        assert_eq!(window.remaining(start() + Duration::minutes(20)), Duration::zero());
    }

    #[test]
    fn question_quota_is_three() {
        assert_eq!(ResponseDeadline::question_quota(), 3);
        assert!(ResponseDeadline::accepts_questions(3));
        assert!(!ResponseDeadline::accepts_questions(4));
    }

    #[test]
    fn serializes_in_camel_case() {
        let value = serde_json::to_value(ResponseDeadline::starting_at(start())).expect("json");
        assert_eq!(value["deadline"], "2026-10-19T08:15:00Z");
        assert!(value.get("startedAt").is_some());
    }
}
