//! Planning of shell command steps.

use std::path::{Path, PathBuf};
use std::process::Command;
use std::rc::Rc;

use tracing::{debug, info};

use crate::error::InitError;
use crate::initializer::{CoreInitializer, Initializer, Step};
use crate::util::log::{LogSink, tracing_sink};

/// Builds command steps. In simulation mode the steps only log the command.
#[derive(Clone)]
pub struct CommandPlanner {
  simulation: bool,
  log: LogSink,
  npm: String,
}

impl CommandPlanner {
  pub fn new(simulation: bool) -> Self {
    Self {
      simulation,
      log: tracing_sink(),
      npm: "npm".to_string(),
    }
  }

  pub fn with_log(mut self, log: LogSink) -> Self {
    self.log = log;
    self
  }

  /// Command used to invoke npm, e.g. `meteor npm`.
  pub fn with_npm(mut self, npm: impl Into<String>) -> Self {
    self.npm = npm.into();
    self
  }

  /// A step running `command` through the shell in `cwd`.
  pub fn exec(&self, command: impl Into<String>, cwd: impl Into<PathBuf>, description: impl Into<String>) -> Step {
    let command = command.into();
    let cwd = cwd.into();
    let simulation = self.simulation;
    let log = Rc::clone(&self.log);
    let (cmd, dir) = (command.clone(), cwd.clone());

    Step::command(command, cwd, description, move || {
      if simulation {
        log(&format!("Would execute: '{}' on {}", cmd, dir.display()));
        Ok(())
      } else {
        run_command(&cmd, &dir)
      }
    })
  }

  pub fn npm_install(&self, dir: impl Into<PathBuf>) -> Step {
    self.exec(format!("{} install", self.npm), dir, "Install npm modules")
  }

  pub fn npm_link(&self, dir: impl Into<PathBuf>, package: Option<&str>) -> Step {
    match package {
      Some(package) => self.exec(
        format!("{} link {}", self.npm, package),
        dir,
        format!("Link npm package '{}'", package),
      ),
      None => self.exec(format!("{} link", self.npm), dir, "Link npm package"),
    }
  }
}

/// Run `command` through the platform shell, inheriting stdio.
pub fn run_command(command: &str, cwd: &Path) -> Result<(), InitError> {
  info!(cmd = %command, cwd = %cwd.display(), "executing command");

  let (shell, args) = shell();
  let status = Command::new(shell)
    .args(args)
    .arg(command)
    .current_dir(cwd)
    .status()
    .map_err(|source| InitError::Spawn {
      command: command.to_string(),
      source,
    })?;

  debug!(cmd = %command, code = ?status.code(), "command finished");

  if !status.success() {
    return Err(InitError::CommandFailed {
      command: command.to_string(),
      code: status.code(),
    });
  }
  Ok(())
}

fn shell() -> (&'static str, &'static [&'static str]) {
  #[cfg(unix)]
  {
    ("/bin/sh", &["-c"])
  }

  #[cfg(windows)]
  {
    ("cmd.exe", &["/C"])
  }
}

/// Plans command steps on top of a [`CoreInitializer`].
pub struct ProgramInitializer {
  core: CoreInitializer,
  commands: CommandPlanner,
}

impl ProgramInitializer {
  pub fn new(core: CoreInitializer, commands: CommandPlanner) -> Self {
    Self { core, commands }
  }

  pub fn create(simulation: bool) -> Self {
    Self::new(CoreInitializer::new(), CommandPlanner::new(simulation))
  }

  pub fn add_exec(
    &mut self,
    command: impl Into<String>,
    cwd: impl Into<PathBuf>,
    description: impl Into<String>,
  ) -> &mut Self {
    let step = self.commands.exec(command, cwd, description);
    self.core.add_step(step);
    self
  }

  pub fn add_npm_install(&mut self, dir: impl Into<PathBuf>) -> &mut Self {
    let step = self.commands.npm_install(dir);
    self.core.add_step(step);
    self
  }

  pub fn add_npm_link(&mut self, dir: impl Into<PathBuf>, package: Option<&str>) -> &mut Self {
    let step = self.commands.npm_link(dir, package);
    self.core.add_step(step);
    self
  }
}

impl Initializer for ProgramInitializer {
  fn core(&self) -> &CoreInitializer {
    &self.core
  }

  fn core_mut(&mut self) -> &mut CoreInitializer {
    &mut self.core
  }
}
