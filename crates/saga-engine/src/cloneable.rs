use std::any::Any;

/// Trait for type-erased values that can be cloned.
///
/// This trait combines `Any` with `Clone` capability, allowing accumulator
/// entries to be snapshotted without knowing their concrete type at compile
/// time.
pub(crate) trait CloneableAny: Any + Send {
    /// Clone the value into a new boxed trait object.
    fn clone_box(&self) -> Box<dyn CloneableAny>;

    /// Borrow the value as `Any` for by-reference downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Convert into a boxed `Any` for by-value downcasting.
    fn into_any(self: Box<Self>) -> Box<dyn Any + Send>;
}

impl<T> CloneableAny for T
where
    T: Clone + Send + 'static,
{
    fn clone_box(&self) -> Box<dyn CloneableAny> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any + Send> {
        self
    }
}
