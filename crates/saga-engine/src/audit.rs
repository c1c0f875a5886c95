use std::time::Instant;

/// Status of a transaction in the audit log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum StepStatus {
    /// Commit is running or has succeeded.
    Committed,
    /// Commit returned an error.
    Failed,
    /// Committed transaction was compensated.
    Compensated,
    /// Compensation returned an error.
    CompensationFailed,
    /// Compensation was skipped because the rollback sweep was aborted.
    Abandoned,
}

impl StepStatus {
    fn marker(self) -> &'static str {
        match self {
            Self::Committed => "✓",
            Self::Failed => "✗",
            Self::Compensated => "↩",
            Self::CompensationFailed => "⚠",
            Self::Abandoned => "…",
        }
    }
}

/// What happened to one transaction during a saga run.
#[derive(Debug)]
pub struct StepRecord {
    /// Position of the transaction in the saga.
    pub index: usize,
    pub label: String,
    pub status: StepStatus,
    /// When the commit started.
    pub started_at: Instant,
    /// When the last commit or compensation call for this transaction returned.
    pub completed_at: Option<Instant>,
    /// Set once the transaction commits.
    pub compensation_description: Option<String>,
}

/// Per-run log of commits and compensations.
///
/// Holds one record per transaction that was started, indexed by position;
/// transactions after a failed commit never get a record.
#[derive(Debug, Default)]
pub struct SagaAuditLog {
    records: Vec<StepRecord>,
}

impl SagaAuditLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn commit_started(&mut self, index: usize, label: &str) {
        debug_assert_eq!(index, self.records.len());
        self.records.push(StepRecord {
            index,
            label: label.to_string(),
            status: StepStatus::Committed,
            started_at: Instant::now(),
            completed_at: None,
            compensation_description: None,
        });
    }

    pub(crate) fn commit_succeeded(&mut self, compensation_description: String) {
        if let Some(record) = self.records.last_mut() {
            record.completed_at = Some(Instant::now());
            record.compensation_description = Some(compensation_description);
        }
    }

    pub(crate) fn commit_failed(&mut self) {
        if let Some(record) = self.records.last_mut() {
            record.status = StepStatus::Failed;
            record.completed_at = Some(Instant::now());
        }
    }

    /// A transaction whose commit failed keeps its `Failed` status.
    pub(crate) fn compensated(&mut self, index: usize) {
        if let Some(record) = self.records.get_mut(index) {
            if record.status == StepStatus::Committed {
                record.status = StepStatus::Compensated;
            }
            record.completed_at = Some(Instant::now());
        }
    }

    /// A transaction whose commit failed keeps its `Failed` status.
    pub(crate) fn compensation_failed(&mut self, index: usize) {
        if let Some(record) = self.records.get_mut(index) {
            if record.status == StepStatus::Committed {
                record.status = StepStatus::CompensationFailed;
            }
            record.completed_at = Some(Instant::now());
        }
    }

    pub(crate) fn abandoned(&mut self, index: usize) {
        if let Some(record) = self.records.get_mut(index) {
            record.status = StepStatus::Abandoned;
        }
    }

    #[must_use]
    pub fn records(&self) -> &[StepRecord] {
        &self.records
    }

    /// One `<marker> <label>` line per record, in commit order.
    #[must_use]
    pub fn summary(&self) -> String {
        self.records
            .iter()
            .map(|record| format!("{} {}", record.status.marker(), record.label))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
