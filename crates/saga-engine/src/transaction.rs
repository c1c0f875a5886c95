use crate::data::SagaData;

/// A transaction in a saga: a forward action paired with its undo.
///
/// Each transaction reads the accumulated data of the run, produces a result
/// that is merged into that data under [`label`](Transaction::label), and
/// can undo its effects if it or a later transaction fails.
///
/// # Type Parameters
///
/// - `Output`: Result merged into the accumulator under the label
/// - `Context`: Shared dependencies (injected, not stored in the accumulator)
/// - `Error`: The error type for commit and compensation failures
pub trait Transaction: Send + Sync {
    /// Result of a successful commit.
    type Output: Clone + Send + 'static;

    /// Shared context providing dependencies.
    type Context;

    /// Error type for commit and compensation failures.
    type Error;

    /// Key under which the commit result is stored.
    ///
    /// Must be non-empty, unique within its saga, and must not be
    /// [`INITIAL_DATA`](crate::INITIAL_DATA).
    fn label(&self) -> &'static str;

    /// Perform the forward action.
    ///
    /// `data` holds the seed under [`INITIAL_DATA`](crate::INITIAL_DATA) and
    /// the results of every transaction committed before this one.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction did not commit. Nothing is merged
    /// into the accumulator in that case.
    fn commit(&self, ctx: &Self::Context, data: &SagaData) -> Result<Self::Output, Self::Error>;

    /// Undo the forward action.
    ///
    /// Receives the snapshot taken right after this transaction committed. If
    /// this transaction is the one whose commit failed, the snapshot is the
    /// one it was committed against and does not contain its own label, so
    /// implementations must tolerate a missing entry. Should be idempotent.
    ///
    /// The default implementation is a no-op, suitable for read-only
    /// transactions.
    ///
    /// # Errors
    ///
    /// Returns an error if compensation fails.
    fn compensate(&self, ctx: &Self::Context, data: &SagaData) -> Result<(), Self::Error> {
        let _ = (ctx, data);
        Ok(())
    }

    /// Human-readable description of what compensation will do.
    fn compensation_description(&self) -> String {
        format!("undo {}", self.label())
    }
}
