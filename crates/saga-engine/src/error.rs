use std::fmt::Debug;

use thiserror::Error;

/// Error from a failed compensation operation.
#[derive(Debug, thiserror::Error)]
#[error("compensation failed for transaction '{step}': {description}")]
pub struct CompensationError<E> {
    /// Label of the transaction whose compensation failed.
    pub step: String,
    /// Position of the transaction in the saga.
    pub index: usize,
    /// Description of what the compensation was trying to do.
    pub description: String,
    /// The underlying error.
    #[source]
    pub error: E,
}

/// Error from saga execution.
///
/// The commit error that triggered the rollback is carried by every variant.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SagaError<E: Debug> {
    /// A transaction failed to commit and every compensation succeeded.
    #[error("transaction '{step}' failed")]
    StepFailed {
        /// Label of the transaction that failed.
        step: String,
        /// Position of the failed transaction.
        index: usize,
        /// The error that caused the commit to fail.
        #[source]
        source: E,
    },

    /// A transaction failed to commit and some compensations also failed.
    #[error(
        "transaction '{failed_step}' failed, and {} compensation(s) also failed",
        compensation_errors.len()
    )]
    CompensationFailed {
        /// Label of the transaction that originally failed.
        failed_step: String,
        /// Position of the failed transaction.
        index: usize,
        /// The error from the failed commit.
        step_error: E,
        /// Errors from failed compensations, in the order they occurred.
        compensation_errors: Vec<CompensationError<E>>,
        /// Labels whose compensation was never attempted because the sweep
        /// was aborted, in the order they would have run.
        abandoned: Vec<String>,
    },
}

impl<E: Debug> SagaError<E> {
    /// Label of the transaction whose commit failed.
    #[must_use]
    pub fn failed_step(&self) -> &str {
        match self {
            Self::StepFailed { step, .. } => step,
            Self::CompensationFailed { failed_step, .. } => failed_step,
        }
    }

    /// Position of the transaction whose commit failed.
    #[must_use]
    pub fn failed_index(&self) -> usize {
        match self {
            Self::StepFailed { index, .. } | Self::CompensationFailed { index, .. } => *index,
        }
    }

    /// The commit error that triggered the rollback.
    #[must_use]
    pub fn step_error(&self) -> &E {
        match self {
            Self::StepFailed { source, .. } => source,
            Self::CompensationFailed { step_error, .. } => step_error,
        }
    }

    /// Unwraps the commit error that triggered the rollback, discarding any
    /// compensation failures.
    #[must_use]
    pub fn into_step_error(self) -> E {
        match self {
            Self::StepFailed { source, .. } => source,
            Self::CompensationFailed { step_error, .. } => step_error,
        }
    }

    #[must_use]
    pub fn compensation_errors(&self) -> &[CompensationError<E>] {
        match self {
            Self::StepFailed { .. } => &[],
            Self::CompensationFailed {
                compensation_errors,
                ..
            } => compensation_errors,
        }
    }
}

/// Error from defining or configuring a saga.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SagaConfigError {
    #[error("transaction at position {index} has an empty label")]
    EmptyLabel { index: usize },

    #[error("transaction at position {index} uses the reserved label '{label}'")]
    ReservedLabel { index: usize, label: &'static str },

    #[error("label '{label}' is used by transactions at positions {first} and {second}")]
    DuplicateLabel {
        label: &'static str,
        first: usize,
        second: usize,
    },

    #[error("failed to parse saga configuration")]
    Parse(#[from] toml::de::Error),
}
