//! The core initializer: an ordered plan of steps, its challenge phase and
//! its continue-on-failure execution.
//!
//! Planners append steps; callers then optionally confirm them through a
//! [`Prompter`] and execute the plan once. A failing step never stops the
//! steps after it; callers fold the results with [`require_no_failures`].

mod prompt;
mod reporter;
mod step;
mod types;

use tracing::{debug, info, warn};

pub use prompt::{Answers, DefaultAnswers, PromptError, Prompter, Question};
pub use reporter::ExecutionReporter;
pub use step::{Step, StepAction, StepKind, describe_step};
pub use types::{ChallengedStep, ExecutedStep, ExecutionOptions, execution_failures, require_no_failures};

use crate::error::InitError;
use crate::events::EventChannel;
use crate::util::names::DistinctNames;

/// Handler signature for the start, end and success channels.
pub type StepHandler = dyn Fn(&Step);

/// Handler signature for the error channel.
pub type ErrorHandler = dyn Fn(&InitError, &Step);

/// Lifecycle notifications published while a plan executes.
#[derive(Debug, Default)]
pub struct ExecutionEvents {
  pub error: EventChannel<ErrorHandler>,
  pub execution_start: EventChannel<StepHandler>,
  pub execution_end: EventChannel<StepHandler>,
  pub execution_success: EventChannel<StepHandler>,
}

fn notify(channel: &EventChannel<StepHandler>, step: &Step) {
  channel.publish(|handler| handler(step));
}

/// Owns the ordered, append-only list of steps for one operation.
#[derive(Debug, Default)]
pub struct CoreInitializer {
  steps: Vec<Step>,
  events: ExecutionEvents,
}

impl CoreInitializer {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn add_step(&mut self, step: Step) -> &mut Self {
    debug!(kind = %step.kind(), path = %step.target_path().display(), "planned step");
    self.steps.push(step);
    self
  }

  /// Planned steps, in the order they were added.
  pub fn steps(&self) -> &[Step] {
    &self.steps
  }

  pub fn events(&self) -> &ExecutionEvents {
    &self.events
  }

  pub fn events_mut(&mut self) -> &mut ExecutionEvents {
    &mut self.events
  }

  /// The confirmation a step needs, if any.
  ///
  /// Steps that may be skipped, carry a warning, or ask for a challenge are
  /// confirmed. Warned steps default to "no".
  pub fn question_for(step: &Step, name: String) -> Option<Question> {
    if !step.can_skip() && step.warning().is_none() && !step.challenge() {
      return None;
    }

    let mut message = format!("Execute [{}]? ", step.describe());
    if let Some(warning) = step.warning() {
      message.push_str(&format!("Warning: {}", warning));
    }

    Some(Question {
      name,
      message,
      default: step.warning().is_none(),
    })
  }

  /// Ask for confirmation of every step that needs it, in one batch.
  ///
  /// Question names are the step kinds suffixed by a per-kind counter, so
  /// two file creations become `Create File 0` and `Create File 1`.
  pub fn challenge(&self, prompter: &dyn Prompter) -> Result<Vec<ChallengedStep<'_>>, InitError> {
    let mut names = DistinctNames::new();
    let mut challenged: Vec<ChallengedStep<'_>> = self
      .steps
      .iter()
      .map(|step| {
        let name = names.create(step.kind().as_str());
        ChallengedStep {
          step,
          execute: true,
          question: Self::question_for(step, name),
        }
      })
      .collect();

    let questions: Vec<Question> = challenged.iter().filter_map(|c| c.question.clone()).collect();
    if questions.is_empty() {
      return Ok(challenged);
    }

    let answers = prompter.prompt(&questions)?;
    for entry in &mut challenged {
      if let Some(question) = &entry.question {
        entry.execute = answers.get(&question.name).copied().unwrap_or(question.default);
      }
    }

    Ok(challenged)
  }

  /// Run the plan, consuming its steps.
  ///
  /// Results come back in the order the steps were added. Declined steps are
  /// reported with `executed == false` and publish no events.
  pub fn execute(&mut self, options: ExecutionOptions<'_>) -> Result<Vec<ExecutedStep>, InitError> {
    let decisions: Vec<bool> = match options.challenge {
      Some(prompter) => self.challenge(prompter)?.into_iter().map(|c| c.execute).collect(),
      None => vec![true; self.steps.len()],
    };

    let steps = std::mem::take(&mut self.steps);
    let mut results = Vec::with_capacity(steps.len());

    for (mut step, execute) in steps.into_iter().zip(decisions) {
      if !execute {
        debug!(description = %step.description(), "step declined");
        results.push(ExecutedStep {
          step,
          executed: false,
          execution_error: None,
        });
        continue;
      }

      let execution_error = self.execute_step(&mut step).err();
      results.push(ExecutedStep {
        step,
        executed: true,
        execution_error,
      });
    }

    let failed = results.iter().filter(|r| r.is_failure()).count();
    info!(total = results.len(), failed, "plan executed");

    Ok(results)
  }

  fn execute_step(&self, step: &mut Step) -> Result<(), InitError> {
    notify(&self.events.execution_start, step);

    let outcome = step.run();
    let step: &Step = step;
    if let Err(error) = &outcome {
      warn!(description = %step.description(), %error, "step failed");
      self.events.error.publish(|handler| handler(error, step));
    }

    notify(&self.events.execution_end, step);
    if outcome.is_ok() {
      notify(&self.events.execution_success, step);
    }

    outcome
  }
}

/// Anything that builds its steps into a [`CoreInitializer`].
pub trait Initializer {
  fn core(&self) -> &CoreInitializer;

  fn core_mut(&mut self) -> &mut CoreInitializer;

  fn events_mut(&mut self) -> &mut ExecutionEvents {
    self.core_mut().events_mut()
  }

  fn challenge(&self, prompter: &dyn Prompter) -> Result<Vec<ChallengedStep<'_>>, InitError> {
    self.core().challenge(prompter)
  }

  fn execute(&mut self, options: ExecutionOptions<'_>) -> Result<Vec<ExecutedStep>, InitError> {
    self.core_mut().execute(options)
  }
}

impl Initializer for CoreInitializer {
  fn core(&self) -> &CoreInitializer {
    self
  }

  fn core_mut(&mut self) -> &mut CoreInitializer {
    self
  }
}

/// Execute a plan with a reporter attached and fail if any step failed.
///
/// The reporter is detached again whether or not the run succeeded.
pub fn run_sequence<I: Initializer + ?Sized>(
  initializer: &mut I,
  options: ExecutionOptions<'_>,
  reporter: &mut ExecutionReporter,
) -> Result<Vec<ExecutedStep>, InitError> {
  reporter.enable(initializer.events_mut());
  let outcome = initializer.execute(options);
  reporter.disable(initializer.events_mut());

  let results = outcome?;
  require_no_failures(&results)?;
  Ok(results)
}
