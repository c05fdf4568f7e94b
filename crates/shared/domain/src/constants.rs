//! Quiz timing and sizing constants.
//!
//! The values are fixed at compile time. [`QuizConstants`] has no fields and no setters, so the
//! only way to read them is through the associated constants or the accessor methods.
//!
//! ```compile_fail
//! use contest_domain::constants::QuizConstants;
//! QuizConstants::N_QUESTIONS_PER_RESPONSE = 5;
//! ```
//!
//! ```compile_fail
//! use contest_domain::constants::CONSTANTS;
//! CONSTANTS.deadline_duration = std::time::Duration::ZERO;
//! ```

use std::time::Duration;

/// Frozen holder for the quiz policy constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[non_exhaustive]
pub struct QuizConstants;

impl QuizConstants {
    /// Time limit for answering one response.
    pub const DEADLINE_DURATION: Duration = Duration::from_secs(15 * 60);

    /// Number of questions in one response.
    pub const N_QUESTIONS_PER_RESPONSE: usize = 3;

    #[must_use]
    pub const fn deadline_duration(self) -> Duration {
        Self::DEADLINE_DURATION
    }

    #[must_use]
    pub const fn n_questions_per_response(self) -> usize {
        Self::N_QUESTIONS_PER_RESPONSE
    }
}

/// Process-wide instance, for callers that prefer a value over a type path.
pub const CONSTANTS: QuizConstants = QuizConstants;
