use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    /// The only kind raised by generation-facing operations.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Malformed configuration file.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Unreadable configuration file.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Rejected input. Raised before any generation begins.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Account list is empty")]
    EmptyAccountList,

    #[error("Row {row}: required field '{field}' is missing or blank")]
    MissingField { row: usize, field: &'static str },

    #[error("End date {end} must be after start date {start}")]
    InvalidWindow { start: NaiveDate, end: NaiveDate },

    #[error("A {days}-day window from {start} runs past the last representable date")]
    WindowOutOfRange { start: NaiveDate, days: u32 },

    #[error("Monthly maximum {max} is below monthly minimum {min}")]
    InvalidMonthlyRange { min: u32, max: u32 },

    #[error("Pattern weights must not all be zero")]
    InvalidPatternWeights,
}

pub type SimResult<T> = Result<T, SimError>;
