//! The umbrella error type for planning and executing initialization steps.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;
use crate::fs::FsError;
use crate::initializer::PromptError;

/// Errors raised while building or running a plan.
///
/// Planner methods return these synchronously, before a step is added.
/// Step actions return them at execution time, where they are collected into
/// the step's result instead of aborting the run.
#[derive(Debug, Error)]
pub enum InitError {
  #[error(transparent)]
  Fs(#[from] FsError),

  #[error(transparent)]
  Config(#[from] ConfigError),

  #[error(transparent)]
  Prompt(#[from] PromptError),

  /// A directory link was requested for something that is not a directory.
  #[error("cannot link directory '{}', because it is not a directory", path.display())]
  NotADirectory { path: PathBuf },

  /// The target directory does not look like an application project.
  #[error("{} is not an application project: missing '{marker}' directory", path.display())]
  NotAProject { path: PathBuf, marker: &'static str },

  /// A command step exited unsuccessfully.
  #[error("command failed with exit code {code:?}: {command}")]
  CommandFailed { command: String, code: Option<i32> },

  /// A command step could not be started.
  #[error("failed to start command '{command}': {source}")]
  Spawn { command: String, source: io::Error },

  /// A step action was invoked a second time.
  #[error("step '{description}' has already been run")]
  StepAlreadyRun { description: String },

  /// One or more steps failed during execution.
  #[error("Project initialization failed, because {count} step(s) encountered an error:\n{details}")]
  ExecutionFailed { count: usize, details: String },
}
