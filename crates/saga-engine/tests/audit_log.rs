//! Integration tests for saga audit logging.

use saga_engine::{SagaBuilder, SagaData, StepStatus, Transaction};

#[derive(Debug, thiserror::Error)]
#[error("{0}")]
struct TestError(String);

struct SimpleTransaction {
    label: &'static str,
}

impl Transaction for SimpleTransaction {
    type Output = i32;
    type Context = ();
    type Error = TestError;

    fn label(&self) -> &'static str {
        self.label
    }

    fn commit(&self, _ctx: &(), _data: &SagaData) -> Result<i32, TestError> {
        Ok(1)
    }

    fn compensate(&self, _ctx: &(), _data: &SagaData) -> Result<(), TestError> {
        Ok(())
    }

    fn compensation_description(&self) -> String {
        format!("delete output of {}", self.label)
    }
}

struct FailingTransaction;

impl Transaction for FailingTransaction {
    type Output = i32;
    type Context = ();
    type Error = TestError;

    fn label(&self) -> &'static str {
        "failing"
    }

    fn commit(&self, _ctx: &(), _data: &SagaData) -> Result<i32, TestError> {
        Err(TestError("intentional failure".to_string()))
    }
}

struct BrokenCompensation;

impl Transaction for BrokenCompensation {
    type Output = i32;
    type Context = ();
    type Error = TestError;

    fn label(&self) -> &'static str {
        "broken"
    }

    fn commit(&self, _ctx: &(), _data: &SagaData) -> Result<i32, TestError> {
        Ok(0)
    }

    fn compensate(&self, _ctx: &(), _data: &SagaData) -> Result<(), TestError> {
        Err(TestError("cannot undo".to_string()))
    }
}

#[test]
fn successful_execution_logs_all_steps_as_committed() -> anyhow::Result<()> {
    let saga = SagaBuilder::new()
        .transaction(SimpleTransaction { label: "step_a" })
        .transaction(SimpleTransaction { label: "step_b" })
        .transaction(SimpleTransaction { label: "step_c" })
        .build()?;

    let outcome = saga.execute_with_audit(&(), 0);

    assert!(outcome.result.is_ok());
    let records = outcome.audit_log.records();
    assert_eq!(records.len(), 3);
    for (expected_index, record) in records.iter().enumerate() {
        assert_eq!(record.index, expected_index);
        assert_eq!(record.status, StepStatus::Committed);
    }
    assert_eq!(records[2].label, "step_c");
    Ok(())
}

#[test]
fn failed_execution_logs_failed_and_compensated_steps() -> anyhow::Result<()> {
    let saga = SagaBuilder::new()
        .transaction(SimpleTransaction { label: "step_a" })
        .transaction(SimpleTransaction { label: "step_b" })
        .transaction(FailingTransaction)
        .transaction(SimpleTransaction { label: "never_run" })
        .build()?;

    let outcome = saga.execute_with_audit(&(), 0);

    assert!(outcome.result.is_err());
    let records = outcome.audit_log.records();
    assert_eq!(records.len(), 3);
    assert_eq!(records[0].status, StepStatus::Compensated);
    assert_eq!(records[1].status, StepStatus::Compensated);
    assert_eq!(records[2].label, "failing");
    assert_eq!(records[2].status, StepStatus::Failed);
    Ok(())
}

#[test]
fn compensation_failure_logged_correctly() -> anyhow::Result<()> {
    let saga = SagaBuilder::new()
        .transaction(SimpleTransaction { label: "step_a" })
        .transaction(BrokenCompensation)
        .transaction(FailingTransaction)
        .build()?;

    let outcome = saga.execute_with_audit(&(), 0);

    let statuses: Vec<_> = outcome
        .audit_log
        .records()
        .iter()
        .map(|record| record.status)
        .collect();
    assert_eq!(
        statuses,
        vec![
            StepStatus::Compensated,
            StepStatus::CompensationFailed,
            StepStatus::Failed,
        ]
    );
    Ok(())
}

#[test]
fn audit_log_records_compensation_descriptions() -> anyhow::Result<()> {
    let saga = SagaBuilder::new()
        .transaction(SimpleTransaction { label: "step_a" })
        .transaction(FailingTransaction)
        .build()?;

    let outcome = saga.execute_with_audit(&(), 0);

    let records = outcome.audit_log.records();
    assert_eq!(
        records[0].compensation_description.as_deref(),
        Some("delete output of step_a")
    );
    assert!(records[1].compensation_description.is_none());
    Ok(())
}

#[test]
fn audit_log_timing_is_populated() -> anyhow::Result<()> {
    let saga = SagaBuilder::new()
        .transaction(SimpleTransaction { label: "step_a" })
        .transaction(SimpleTransaction { label: "step_b" })
        .build()?;

    let outcome = saga.execute_with_audit(&(), 0);

    for record in outcome.audit_log.records() {
        let completed_at = record.completed_at.expect("completed_at is set");
        assert!(completed_at >= record.started_at);
    }
    Ok(())
}

#[test]
fn audit_log_summary_shows_status_indicators() -> anyhow::Result<()> {
    let saga = SagaBuilder::new()
        .transaction(SimpleTransaction { label: "step_a" })
        .transaction(BrokenCompensation)
        .transaction(FailingTransaction)
        .build()?;

    let outcome = saga.execute_with_audit(&(), 0);

    assert_eq!(
        outcome.audit_log.summary(),
        "↩ step_a\n⚠ broken\n✗ failing"
    );
    Ok(())
}

#[test]
fn outcome_result_matches_plain_execute() -> anyhow::Result<()> {
    let saga = SagaBuilder::new()
        .transaction(SimpleTransaction { label: "step_a" })
        .build()?;

    let audited = saga.execute_with_audit(&(), 5).into_result()?;
    let plain = saga.execute(&(), 5)?;

    assert_eq!(
        audited.labels().collect::<Vec<_>>(),
        plain.labels().collect::<Vec<_>>()
    );
    assert_eq!(audited.get::<i32>("step_a"), plain.get::<i32>("step_a"));
    Ok(())
}
