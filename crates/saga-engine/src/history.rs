use crate::data::SagaData;

/// Snapshots of the accumulator taken during one saga run.
///
/// Holds the seed snapshot plus one snapshot per successful commit. The
/// snapshot at position `i` is the one taken right after transaction `i`
/// committed, so the committed transactions are always a prefix of the saga.
#[derive(Debug, Clone)]
pub struct SagaHistory {
    seed: SagaData,
    snapshots: Vec<SagaData>,
}

impl SagaHistory {
    pub(crate) fn new(seed: SagaData) -> Self {
        Self {
            seed,
            snapshots: Vec::new(),
        }
    }

    pub(crate) fn record(&mut self, snapshot: SagaData) {
        self.snapshots.push(snapshot);
    }

    /// The accumulator the next transaction commits against.
    pub(crate) fn current(&self) -> &SagaData {
        self.snapshots.last().unwrap_or(&self.seed)
    }

    /// The snapshot handed to `compensate` for the transaction at `index`.
    ///
    /// A committed transaction gets the snapshot taken right after its own
    /// commit. The transaction whose commit failed gets the snapshot it was
    /// committed against.
    pub(crate) fn compensation_snapshot(&self, index: usize) -> &SagaData {
        self.snapshots
            .get(index)
            .or_else(|| index.checked_sub(1).and_then(|prev| self.snapshots.get(prev)))
            .unwrap_or(&self.seed)
    }

    pub(crate) fn into_final(mut self) -> SagaData {
        self.snapshots.pop().unwrap_or(self.seed)
    }

    /// The `{initial_data: seed}` snapshot every run starts from.
    #[must_use]
    pub fn seed(&self) -> &SagaData {
        &self.seed
    }

    /// Post-commit snapshots in commit order.
    #[must_use]
    pub fn snapshots(&self) -> &[SagaData] {
        &self.snapshots
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&SagaData> {
        self.snapshots.get(index)
    }

    /// Number of transactions that committed.
    #[must_use]
    pub fn committed(&self) -> usize {
        self.snapshots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}
