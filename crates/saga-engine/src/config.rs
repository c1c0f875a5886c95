use serde::Deserialize;

use crate::error::SagaConfigError;

/// What the rollback sweep does when a compensation fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CompensationPolicy {
    /// Record the failure and keep compensating earlier transactions.
    #[default]
    Continue,
    /// Stop the sweep at the first failure. Transactions not yet compensated
    /// are reported as abandoned.
    Abort,
}

/// Execution settings of a saga.
///
/// Can be built in code or read from TOML:
///
/// ```
/// use saga_engine::{CompensationPolicy, SagaConfig};
///
/// let config = SagaConfig::from_toml_str(
///     r#"
///     compensation-policy = "abort"
///     compensate-failed-step = false
///     "#,
/// )?;
///
/// assert_eq!(config.compensation_policy(), CompensationPolicy::Abort);
/// assert!(!config.compensate_failed_step());
/// # Ok::<(), saga_engine::SagaConfigError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct SagaConfig {
    compensation_policy: CompensationPolicy,
    compensate_failed_step: bool,
}

impl Default for SagaConfig {
    fn default() -> Self {
        Self {
            compensation_policy: CompensationPolicy::default(),
            compensate_failed_step: true,
        }
    }
}

impl SagaConfig {
    /// Parse a configuration table. Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`SagaConfigError::Parse`] if the input is not valid TOML or
    /// contains unknown keys or values.
    pub fn from_toml_str(input: &str) -> Result<Self, SagaConfigError> {
        Ok(toml::from_str(input)?)
    }

    #[must_use]
    pub fn compensation_policy(&self) -> CompensationPolicy {
        self.compensation_policy
    }

    /// Whether the transaction whose commit failed is itself offered a
    /// compensation call.
    #[must_use]
    pub fn compensate_failed_step(&self) -> bool {
        self.compensate_failed_step
    }

    #[must_use]
    pub fn with_compensation_policy(mut self, policy: CompensationPolicy) -> Self {
        self.compensation_policy = policy;
        self
    }

    #[must_use]
    pub fn with_compensate_failed_step(mut self, compensate: bool) -> Self {
        self.compensate_failed_step = compensate;
        self
    }
}
