//! Error types for tutorcal.

use thiserror::Error;

/// Errors that can occur in tutorcal operations.
#[derive(Error, Debug)]
pub enum TutorCalError {
    #[error("Invalid frequency: {0}")]
    InvalidFrequency(String),

    #[error("Invalid weekday '{0}'. Expected Monday through Friday")]
    InvalidWeekday(String),

    #[error("{frequency} sessions need {expected} weekday(s), got {actual}")]
    InvalidWeekdayCount {
        frequency: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid month '{0}'. Expected YYYY-MM with a month between 1 and 12")]
    InvalidMonth(String),

    #[error("Invalid date '{0}'. Expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Session store error: {0}")]
    Store(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for tutorcal operations.
pub type TutorCalResult<T> = Result<T, TutorCalError>;
