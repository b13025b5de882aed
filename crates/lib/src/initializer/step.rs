//! The unit of planned mutation.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::InitError;
use crate::util::path::humanize_path;

/// What a step does to its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepKind {
  CreateFile,
  ModifyFile,
  DeleteFile,
  DeleteDirectory,
  LinkFile,
  LinkDirectory,
  ExecuteCommand,
}

impl StepKind {
  pub fn as_str(&self) -> &'static str {
    match self {
      StepKind::CreateFile => "Create File",
      StepKind::ModifyFile => "Modify File",
      StepKind::DeleteFile => "Delete File",
      StepKind::DeleteDirectory => "Delete Directory",
      StepKind::LinkFile => "Link File",
      StepKind::LinkDirectory => "Link Directory",
      StepKind::ExecuteCommand => "Execute Command",
    }
  }
}

impl fmt::Display for StepKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// The effect of a step. Consumed on first run.
pub type StepAction = Box<dyn FnOnce() -> Result<(), InitError>>;

/// A single planned mutation together with its safety metadata.
///
/// Metadata is fixed at construction; once a step is added to a plan only its
/// execution decision varies.
pub struct Step {
  kind: StepKind,
  target_path: PathBuf,
  command: Option<String>,
  description: String,
  can_skip: bool,
  warning: Option<String>,
  challenge: bool,
  action: Option<StepAction>,
}

impl Step {
  /// A filesystem step. Use [`Step::command`] for command steps.
  pub fn new(
    kind: StepKind,
    target_path: impl Into<PathBuf>,
    description: impl Into<String>,
    action: impl FnOnce() -> Result<(), InitError> + 'static,
  ) -> Self {
    Self {
      kind,
      target_path: target_path.into(),
      command: None,
      description: description.into(),
      can_skip: false,
      warning: None,
      challenge: false,
      action: Some(Box::new(action)),
    }
  }

  /// A step that runs `command` with `cwd` as its working directory.
  pub fn command(
    command: impl Into<String>,
    cwd: impl Into<PathBuf>,
    description: impl Into<String>,
    action: impl FnOnce() -> Result<(), InitError> + 'static,
  ) -> Self {
    let mut step = Self::new(StepKind::ExecuteCommand, cwd, description, action);
    step.command = Some(command.into());
    step
  }

  pub fn with_can_skip(mut self, can_skip: bool) -> Self {
    self.can_skip = can_skip;
    self
  }

  /// Attach a risk description. Empty strings are treated as no warning.
  pub fn with_warning(mut self, warning: Option<String>) -> Self {
    self.warning = warning.filter(|w| !w.is_empty());
    self
  }

  pub fn with_challenge(mut self, challenge: bool) -> Self {
    self.challenge = challenge;
    self
  }

  pub fn kind(&self) -> StepKind {
    self.kind
  }

  pub fn target_path(&self) -> &Path {
    &self.target_path
  }

  pub fn command_line(&self) -> Option<&str> {
    self.command.as_deref()
  }

  pub fn description(&self) -> &str {
    &self.description
  }

  pub fn can_skip(&self) -> bool {
    self.can_skip
  }

  pub fn warning(&self) -> Option<&str> {
    self.warning.as_deref()
  }

  pub fn challenge(&self) -> bool {
    self.challenge
  }

  /// Run the step's action. A second call fails instead of repeating the effect.
  pub(crate) fn run(&mut self) -> Result<(), InitError> {
    match self.action.take() {
      Some(action) => action(),
      None => Err(InitError::StepAlreadyRun {
        description: self.description.clone(),
      }),
    }
  }

  /// [`describe_step`] relative to the process working directory.
  pub fn describe(&self) -> String {
    let cwd = std::env::current_dir().unwrap_or_default();
    describe_step(self, &cwd)
  }
}

impl fmt::Debug for Step {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Step")
      .field("kind", &self.kind)
      .field("target_path", &self.target_path)
      .field("command", &self.command)
      .field("description", &self.description)
      .field("can_skip", &self.can_skip)
      .field("warning", &self.warning)
      .field("challenge", &self.challenge)
      .field("pending", &self.action.is_some())
      .finish()
  }
}

/// One-line summary used in prompts, reports and failure messages.
///
/// `Create File: (Path: './a.txt') Write a.txt`, or for command steps
/// `Execute Command: (Command: 'npm install' Path: '.') Install dependencies`.
pub fn describe_step(step: &Step, cwd: &Path) -> String {
  let path = format!("Path: '{}'", humanize_path(&step.target_path, cwd));
  let location = match &step.command {
    Some(command) if !command.is_empty() => format!("Command: '{}' {}", command, path),
    _ => path,
  };
  format!("{}: ({}) {}", step.kind, location, step.description)
}
