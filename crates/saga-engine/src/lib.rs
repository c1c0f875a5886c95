//! Saga pattern for ordered, compensable transactions.
//!
//! A saga commits its transactions in declared order. Each result is merged
//! into a growing [`SagaData`] mapping under the transaction's label, and a
//! snapshot of that mapping is recorded after every commit. If a commit
//! fails, the failing transaction is offered a compensation call with the
//! snapshot it was committed against, then every transaction that already
//! committed is compensated in reverse order with its own post-commit
//! snapshot, and the original error is returned. See
//! [`SagaConfig::compensate_failed_step`] to limit the sweep to committed
//! transactions.

mod audit;
mod builder;
mod cloneable;
mod config;
mod data;
mod erased;
mod error;
mod history;
mod saga;
mod transaction;

pub use audit::{SagaAuditLog, StepRecord, StepStatus};
pub use builder::SagaBuilder;
pub use config::{CompensationPolicy, SagaConfig};
pub use data::{INITIAL_DATA, SagaData};
pub use error::{CompensationError, SagaConfigError, SagaError};
pub use history::SagaHistory;
pub use saga::{Saga, SagaOutcome};
pub use transaction::Transaction;
