use std::path::PathBuf;
use std::rc::Rc;

use super::step::{Step, describe_step};
use super::{ExecutionEvents, StepHandler};
use crate::error::InitError;
use crate::events::SubscriptionId;
use crate::util::log::{LogSink, tracing_sink};

#[derive(Debug, Default)]
struct Subscriptions {
  start: Option<SubscriptionId>,
  end: Option<SubscriptionId>,
  success: Option<SubscriptionId>,
  error: Option<SubscriptionId>,
}

/// Writes one line per lifecycle event of an executing plan.
///
/// Lines look like `Started Execution: Create File: (Path: './a') Write a`.
pub struct ExecutionReporter {
  log: LogSink,
  cwd: Option<PathBuf>,
  subscriptions: Subscriptions,
}

impl ExecutionReporter {
  pub fn new(log: LogSink) -> Self {
    Self {
      log,
      cwd: None,
      subscriptions: Subscriptions::default(),
    }
  }

  /// Render step paths relative to `cwd` instead of the process directory.
  pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
    self.cwd = Some(cwd.into());
    self
  }

  fn describer(&self, event: &'static str) -> Box<StepHandler> {
    let log = Rc::clone(&self.log);
    let cwd = self.cwd.clone();
    Box::new(move |step: &Step| {
      let description = match &cwd {
        Some(cwd) => describe_step(step, cwd),
        None => step.describe(),
      };
      log(&format!("{}: {}", event, description));
    })
  }

  /// Subscribe to `events`. Enabling twice replaces the earlier subscriptions.
  pub fn enable(&mut self, events: &mut ExecutionEvents) -> &mut Self {
    self.disable(events);

    self.subscriptions.start = Some(events.execution_start.subscribe(self.describer("Started Execution")));
    self.subscriptions.end = Some(events.execution_end.subscribe(self.describer("Ended Execution")));
    self.subscriptions.success = Some(
      events
        .execution_success
        .subscribe(self.describer("Execution Successful")),
    );

    let failed = self.describer("Execution Failed");
    self.subscriptions.error = Some(
      events
        .error
        .subscribe(Box::new(move |_: &InitError, step: &Step| failed(step))),
    );
    self
  }

  pub fn disable(&mut self, events: &mut ExecutionEvents) -> &mut Self {
    if let Some(id) = self.subscriptions.start.take() {
      events.execution_start.unsubscribe(id);
    }
    if let Some(id) = self.subscriptions.end.take() {
      events.execution_end.unsubscribe(id);
    }
    if let Some(id) = self.subscriptions.success.take() {
      events.execution_success.unsubscribe(id);
    }
    if let Some(id) = self.subscriptions.error.take() {
      events.error.unsubscribe(id);
    }
    self
  }
}

impl Default for ExecutionReporter {
  fn default() -> Self {
    Self::new(tracing_sink())
  }
}
