use std::collections::HashMap;
use std::fmt::Debug;
use std::marker::PhantomData;

use crate::config::SagaConfig;
use crate::data::INITIAL_DATA;
use crate::erased::{ErasedTransaction, TransactionWrapper};
use crate::error::SagaConfigError;
use crate::saga::Saga;
use crate::transaction::Transaction;

/// Builder declaring the ordered transactions of a saga.
///
/// Every transaction must share the saga's context and error types, which is
/// checked at compile time:
///
/// ```compile_fail
/// use saga_engine::{SagaBuilder, SagaData, Transaction};
///
/// struct StepA;
/// impl Transaction for StepA {
///     type Output = ();
///     type Context = ();
///     type Error = String;
///     fn label(&self) -> &'static str { "a" }
///     fn commit(&self, _: &(), _: &SagaData) -> Result<(), String> { Ok(()) }
/// }
///
/// struct StepB;
/// impl Transaction for StepB {
///     type Output = ();
///     type Context = ();
///     type Error = std::io::Error;  // Different error type!
///     fn label(&self) -> &'static str { "b" }
///     fn commit(&self, _: &(), _: &SagaData) -> Result<(), std::io::Error> { Ok(()) }
/// }
///
/// let saga = SagaBuilder::<i32, (), String>::new()
///     .transaction(StepA)
///     .transaction(StepB)  // Compile error here!
///     .build();
/// ```
///
/// Labels are validated by [`build`](SagaBuilder::build): they must be
/// non-empty, unique, and must not collide with
/// [`INITIAL_DATA`](crate::INITIAL_DATA).
pub struct SagaBuilder<Seed, Ctx, Err> {
    transactions: Vec<Box<dyn ErasedTransaction<Ctx, Err>>>,
    config: SagaConfig,
    _phantom: PhantomData<fn(Seed)>,
}

impl<Seed, Ctx, Err> SagaBuilder<Seed, Ctx, Err> {
    /// Create a new saga builder with no transactions.
    #[must_use]
    pub fn new() -> Self {
        Self {
            transactions: Vec::new(),
            config: SagaConfig::default(),
            _phantom: PhantomData,
        }
    }

    /// Append a transaction to the saga.
    #[must_use]
    pub fn transaction<T>(mut self, transaction: T) -> Self
    where
        T: Transaction<Context = Ctx, Error = Err> + 'static,
    {
        self.transactions
            .push(Box::new(TransactionWrapper::new(transaction)));
        self
    }

    /// Replace the execution settings.
    #[must_use]
    pub fn config(mut self, config: SagaConfig) -> Self {
        self.config = config;
        self
    }

    /// Validate the labels and build the saga.
    ///
    /// # Errors
    ///
    /// Returns [`SagaConfigError`] if a label is empty, reserved, or used by
    /// more than one transaction.
    pub fn build(self) -> Result<Saga<Seed, Ctx, Err>, SagaConfigError>
    where
        Seed: Clone + Send + 'static,
        Err: Debug,
    {
        validate_labels(self.transactions.iter().map(|t| t.label()))?;
        Ok(Saga::from_parts(self.transactions, self.config))
    }
}

impl<Seed, Ctx, Err> Default for SagaBuilder<Seed, Ctx, Err> {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_labels(labels: impl Iterator<Item = &'static str>) -> Result<(), SagaConfigError> {
    let mut seen: HashMap<&'static str, usize> = HashMap::new();
    for (index, label) in labels.enumerate() {
        if label.is_empty() {
            return Err(SagaConfigError::EmptyLabel { index });
        }
        if label == INITIAL_DATA {
            return Err(SagaConfigError::ReservedLabel {
                index,
                label: INITIAL_DATA,
            });
        }
        if let Some(first) = seen.insert(label, index) {
            return Err(SagaConfigError::DuplicateLabel {
                label,
                first,
                second: index,
            });
        }
    }
    Ok(())
}
