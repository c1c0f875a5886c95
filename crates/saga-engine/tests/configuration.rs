//! Integration tests for loading saga settings and validating definitions.

use std::cell::RefCell;

use saga_engine::{
    CompensationPolicy, SagaBuilder, SagaConfig, SagaConfigError, SagaData, Transaction,
};

#[derive(Default)]
struct TestContext {
    compensated: RefCell<Vec<&'static str>>,
}

#[derive(Debug, thiserror::Error)]
#[error("{0}")]
struct TestError(&'static str);

struct Step {
    label: &'static str,
    fail_commit: bool,
    fail_compensate: bool,
}

impl Step {
    fn ok(label: &'static str) -> Self {
        Self {
            label,
            fail_commit: false,
            fail_compensate: false,
        }
    }
}

impl Transaction for Step {
    type Output = ();
    type Context = TestContext;
    type Error = TestError;

    fn label(&self) -> &'static str {
        self.label
    }

    fn commit(&self, _ctx: &TestContext, _data: &SagaData) -> Result<(), TestError> {
        if self.fail_commit {
            return Err(TestError("commit failed"));
        }
        Ok(())
    }

    fn compensate(&self, ctx: &TestContext, _data: &SagaData) -> Result<(), TestError> {
        ctx.compensated.borrow_mut().push(self.label);
        if self.fail_compensate {
            return Err(TestError("compensate failed"));
        }
        Ok(())
    }
}

#[test]
fn toml_config_drives_rollback() -> anyhow::Result<()> {
    let config = SagaConfig::from_toml_str(
        r#"
        compensation-policy = "abort"
        compensate-failed-step = false
        "#,
    )?;
    assert_eq!(config.compensation_policy(), CompensationPolicy::Abort);

    let ctx = TestContext::default();
    let saga = SagaBuilder::new()
        .config(config)
        .transaction(Step::ok("first"))
        .transaction(Step {
            fail_compensate: true,
            ..Step::ok("second")
        })
        .transaction(Step {
            fail_commit: true,
            ..Step::ok("third")
        })
        .build()?;

    let err = saga.execute(&ctx, ()).expect_err("third should fail");

    assert_eq!(*ctx.compensated.borrow(), vec!["second"]);
    assert_eq!(err.compensation_errors().len(), 1);
    Ok(())
}

#[test]
fn invalid_toml_is_a_config_error() {
    let result = SagaConfig::from_toml_str("compensation-policy = ");

    assert!(matches!(result, Err(SagaConfigError::Parse(_))));
}

#[test]
fn duplicate_labels_are_rejected_at_build_time() {
    let result = SagaBuilder::<(), TestContext, TestError>::new()
        .transaction(Step::ok("charge"))
        .transaction(Step::ok("ship"))
        .transaction(Step::ok("charge"))
        .build();

    let err = result.err().expect("duplicate label should be rejected");
    assert_eq!(
        err.to_string(),
        "label 'charge' is used by transactions at positions 0 and 2"
    );
}

#[test]
fn unset_label_is_rejected_at_build_time() {
    let result = SagaBuilder::<(), TestContext, TestError>::new()
        .transaction(Step::ok(""))
        .build();

    assert!(matches!(
        result,
        Err(SagaConfigError::EmptyLabel { index: 0 })
    ));
}
