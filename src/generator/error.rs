use chrono::NaiveDate;
use std::fmt;
use thiserror::Error;

use super::Stage;
use crate::db::StoreError;

/// Why a pipeline stage could not produce its rows.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),

    #[error(
        "insufficient candidates for project {project_id}: department {department_id} has {available} employees, at least {required} required"
    )]
    InsufficientCandidates {
        project_id: i32,
        department_id: i32,
        available: usize,
        required: usize,
    },

    #[error("invalid date range: {start} is after {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    #[error("{field} is {requested}, at most {max} allowed")]
    CountTooLarge {
        field: &'static str,
        requested: usize,
        max: usize,
    },

    #[error("failed to generate a unique email after {max_attempts} attempts")]
    EmailsExhausted { max_attempts: usize },

    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for GenerationError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Constraint(message) => GenerationError::ConstraintViolation(message),
            other => GenerationError::Store(other),
        }
    }
}

/// Where in a generation request a failure happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Request,
    Begin,
    Stage(Stage),
    Commit,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Request => f.write_str("request check"),
            Phase::Begin => f.write_str("transaction start"),
            Phase::Stage(stage) => write!(f, "{stage} stage"),
            Phase::Commit => f.write_str("commit"),
        }
    }
}

/// A generation request that was rolled back as a whole.
#[derive(Debug, Error)]
#[error("data generation failed during {phase}: {source}")]
pub struct GenerationFailure {
    pub phase: Phase,
    pub source: GenerationError,
}

impl GenerationFailure {
    pub fn new(phase: Phase, source: impl Into<GenerationError>) -> Self {
        GenerationFailure {
            phase,
            source: source.into(),
        }
    }
}
