use crate::cloneable::CloneableAny;
use crate::data::SagaData;
use crate::transaction::Transaction;

pub(crate) trait ErasedTransaction<Ctx, Err>: Send + Sync {
    fn label(&self) -> &'static str;

    fn commit_erased(&self, ctx: &Ctx, data: &SagaData) -> Result<Box<dyn CloneableAny>, Err>;

    fn compensate(&self, ctx: &Ctx, data: &SagaData) -> Result<(), Err>;

    fn compensation_description(&self) -> String;
}

pub(crate) struct TransactionWrapper<T> {
    transaction: T,
}

impl<T> TransactionWrapper<T> {
    pub(crate) fn new(transaction: T) -> Self {
        Self { transaction }
    }
}

impl<T> ErasedTransaction<T::Context, T::Error> for TransactionWrapper<T>
where
    T: Transaction,
{
    fn label(&self) -> &'static str {
        self.transaction.label()
    }

    fn commit_erased(
        &self,
        ctx: &T::Context,
        data: &SagaData,
    ) -> Result<Box<dyn CloneableAny>, T::Error> {
        let output = self.transaction.commit(ctx, data)?;
        Ok(Box::new(output))
    }

    fn compensate(&self, ctx: &T::Context, data: &SagaData) -> Result<(), T::Error> {
        self.transaction.compensate(ctx, data)
    }

    fn compensation_description(&self) -> String {
        self.transaction.compensation_description()
    }
}
