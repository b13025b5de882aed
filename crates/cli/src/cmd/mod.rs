mod init;
mod stack;

pub use init::{InitArgs, cmd_init};
pub use stack::{StackArgs, cmd_stack};

use tracing::debug;

use deployinit_lib::initializer::{ExecutedStep, ExecutionOptions, ExecutionReporter, Initializer, run_sequence};

use crate::output::{self, terminal_sink};
use crate::prompts::TerminalPrompter;

/// Execute a plan with terminal reporting and print a summary.
///
/// Steps are confirmed interactively unless `yes` is set.
pub(crate) fn run_plan<I: Initializer>(initializer: &mut I, yes: bool) -> anyhow::Result<Vec<ExecutedStep>> {
  if initializer.core().steps().is_empty() {
    output::print_info("Nothing to do, everything is up to date");
    return Ok(Vec::new());
  }

  debug!(steps = initializer.core().steps().len(), yes, "executing plan");
  let prompter = TerminalPrompter;
  let options = if yes {
    ExecutionOptions::default()
  } else {
    ExecutionOptions::challenged(&prompter)
  };

  let mut reporter = ExecutionReporter::new(terminal_sink());
  let results = run_sequence(initializer, options, &mut reporter)?;

  let skipped = results.iter().filter(|r| !r.executed).count();
  if skipped > 0 {
    output::print_warning(&format!("Skipped {} step(s)", skipped));
  }
  Ok(results)
}
