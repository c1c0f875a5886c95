use std::fmt::Debug;
use std::marker::PhantomData;

use tracing::{debug, warn};

use crate::audit::SagaAuditLog;
use crate::config::{CompensationPolicy, SagaConfig};
use crate::data::SagaData;
use crate::erased::ErasedTransaction;
use crate::error::{CompensationError, SagaError};
use crate::history::SagaHistory;

/// A compiled saga ready for execution.
///
/// Sagas commit a sequence of transactions in declared order, merging each
/// result into the accumulated data under the transaction's label. If a
/// commit fails, the transactions already committed are compensated in
/// reverse order (LIFO) and the original error is returned.
///
/// The definition is immutable; every call to [`execute`](Saga::execute)
/// starts from a fresh history.
pub struct Saga<Seed, Ctx, Err> {
    transactions: Vec<Box<dyn ErasedTransaction<Ctx, Err>>>,
    config: SagaConfig,
    _phantom: PhantomData<fn(Seed)>,
}

/// Everything a single saga run produced.
#[derive(Debug)]
pub struct SagaOutcome<Err: Debug> {
    /// Final accumulated data, or the error that triggered the rollback.
    pub result: Result<SagaData, SagaError<Err>>,
    /// Post-commit snapshots, one per committed transaction.
    pub history: SagaHistory,
    /// Commit and compensation status of every transaction that ran.
    pub audit_log: SagaAuditLog,
}

impl<Err: Debug> SagaOutcome<Err> {
    /// Discards the history and audit log.
    ///
    /// # Errors
    ///
    /// Returns the saga error if the run failed.
    pub fn into_result(self) -> Result<SagaData, SagaError<Err>> {
        self.result
    }
}

impl<Seed, Ctx, Err> Saga<Seed, Ctx, Err>
where
    Seed: Clone + Send + 'static,
    Err: Debug,
{
    pub(crate) fn from_parts(
        transactions: Vec<Box<dyn ErasedTransaction<Ctx, Err>>>,
        config: SagaConfig,
    ) -> Self {
        Self {
            transactions,
            config,
            _phantom: PhantomData,
        }
    }

    /// Execute the saga, returning the final accumulated data on success.
    ///
    /// The result holds `seed` under [`INITIAL_DATA`](crate::INITIAL_DATA)
    /// and every transaction's result under its label. An empty saga returns
    /// the seed alone.
    ///
    /// # Errors
    ///
    /// Returns `SagaError::StepFailed` if a commit fails and all compensations succeed.
    /// Returns `SagaError::CompensationFailed` if a commit fails and some compensations also fail.
    pub fn execute(&self, ctx: &Ctx, seed: Seed) -> Result<SagaData, SagaError<Err>> {
        let (result, history, _audit_log) = self.execute_internal(ctx, seed);
        result.map(|()| history.into_final())
    }

    /// Execute the saga and return the result together with the history of
    /// snapshots and an audit log.
    pub fn execute_with_audit(&self, ctx: &Ctx, seed: Seed) -> SagaOutcome<Err> {
        let (result, history, audit_log) = self.execute_internal(ctx, seed);
        SagaOutcome {
            result: result.map(|()| history.current().clone()),
            history,
            audit_log,
        }
    }

    /// Number of transactions in the saga.
    #[must_use]
    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Transaction labels in commit order.
    pub fn labels(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.transactions.iter().map(|t| t.label())
    }

    #[must_use]
    pub fn config(&self) -> &SagaConfig {
        &self.config
    }

    fn execute_internal(
        &self,
        ctx: &Ctx,
        seed: Seed,
    ) -> (Result<(), SagaError<Err>>, SagaHistory, SagaAuditLog) {
        let mut audit_log = SagaAuditLog::new();
        let mut history = SagaHistory::new(SagaData::seeded(seed));

        for (index, transaction) in self.transactions.iter().enumerate() {
            let label = transaction.label();
            audit_log.commit_started(index, label);
            debug!(saga.step = label, index, "committing transaction");

            match transaction.commit_erased(ctx, history.current()) {
                Ok(output) => {
                    audit_log.commit_succeeded(transaction.compensation_description());
                    let snapshot = history.current().merged(label, output);
                    history.record(snapshot);
                }
                Err(error) => {
                    audit_log.commit_failed();
                    warn!(saga.step = label, index, ?error, "transaction failed, rolling back");
                    let saga_error =
                        self.compensate(ctx, &history, &mut audit_log, index, error);
                    return (Err(saga_error), history, audit_log);
                }
            }
        }

        debug!(committed = history.committed(), "saga completed");
        (Ok(()), history, audit_log)
    }

    fn compensate(
        &self,
        ctx: &Ctx,
        history: &SagaHistory,
        audit_log: &mut SagaAuditLog,
        failed_index: usize,
        step_error: Err,
    ) -> SagaError<Err> {
        let failed_step = self.transactions[failed_index].label().to_string();
        let end = if self.config.compensate_failed_step() {
            failed_index + 1
        } else {
            failed_index
        };

        let mut pending = (0..end).rev();
        let mut compensation_errors = Vec::new();

        for index in pending.by_ref() {
            let transaction = &self.transactions[index];
            let label = transaction.label();
            let description = transaction.compensation_description();
            debug!(saga.step = label, index, %description, "compensating transaction");

            match transaction.compensate(ctx, history.compensation_snapshot(index)) {
                Ok(()) => {
                    audit_log.compensated(index);
                }
                Err(error) => {
                    warn!(saga.step = label, index, ?error, "compensation failed");
                    audit_log.compensation_failed(index);
                    compensation_errors.push(CompensationError {
                        step: label.to_string(),
                        index,
                        description,
                        error,
                    });
                    if self.config.compensation_policy() == CompensationPolicy::Abort {
                        break;
                    }
                }
            }
        }

        let abandoned: Vec<String> = pending
            .map(|index| {
                audit_log.abandoned(index);
                self.transactions[index].label().to_string()
            })
            .collect();
        if !abandoned.is_empty() {
            warn!(count = abandoned.len(), "rollback aborted, compensations skipped");
        }

        if compensation_errors.is_empty() {
            SagaError::StepFailed {
                step: failed_step,
                index: failed_index,
                source: step_error,
            }
        } else {
            SagaError::CompensationFailed {
                failed_step,
                index: failed_index,
                step_error,
                compensation_errors,
                abandoned,
            }
        }
    }
}
