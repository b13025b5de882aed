use super::prompt::{Prompter, Question};
use super::step::Step;
use crate::error::InitError;

/// A step with its execution decision after the challenge phase.
#[derive(Debug)]
pub struct ChallengedStep<'a> {
  pub step: &'a Step,
  pub execute: bool,
  /// Present only if the step required confirmation.
  pub question: Option<Question>,
}

/// The outcome of one step after `execute`.
#[derive(Debug)]
pub struct ExecutedStep {
  pub step: Step,
  /// `false` if the challenge phase declined the step.
  pub executed: bool,
  /// Set if the step ran and failed.
  pub execution_error: Option<InitError>,
}

impl ExecutedStep {
  pub fn is_failure(&self) -> bool {
    self.execution_error.is_some()
  }
}

/// Options for [`CoreInitializer::execute`](super::CoreInitializer::execute).
#[derive(Default, Clone, Copy)]
pub struct ExecutionOptions<'a> {
  /// Confirm steps through this prompter first. `None` executes every step.
  pub challenge: Option<&'a dyn Prompter>,
}

impl<'a> ExecutionOptions<'a> {
  pub fn challenged(prompter: &'a dyn Prompter) -> Self {
    Self {
      challenge: Some(prompter),
    }
  }
}

impl std::fmt::Debug for ExecutionOptions<'_> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("ExecutionOptions")
      .field("challenge", &self.challenge.is_some())
      .finish()
  }
}

/// The steps that ran and failed, in execution order.
pub fn execution_failures(steps: &[ExecutedStep]) -> Vec<&ExecutedStep> {
  steps.iter().filter(|s| s.is_failure()).collect()
}

/// Fold every failed step into a single [`InitError::ExecutionFailed`].
pub fn require_no_failures(steps: &[ExecutedStep]) -> Result<(), InitError> {
  let failures = execution_failures(steps);
  if failures.is_empty() {
    return Ok(());
  }

  let details = failures
    .iter()
    .filter_map(|failed| {
      failed
        .execution_error
        .as_ref()
        .map(|error| format!("{}: {}", failed.step.describe(), error))
    })
    .collect::<Vec<_>>()
    .join("\n");

  Err(InitError::ExecutionFailed {
    count: failures.len(),
    details,
  })
}
