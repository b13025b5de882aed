use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

use deployinit_lib::fs::{Filesystem, SimulatedFilesystem};
use deployinit_lib::initializer::{CoreInitializer, ExecutionOptions, ExecutedStep, Initializer};
use deployinit_lib::planner::FileInitializer;
use deployinit_lib::util::log::recording_sink;

pub type Lines = Rc<RefCell<Vec<String>>>;

/// A file planner over the real disk.
pub fn host_files() -> FileInitializer {
  FileInitializer::create(false)
}

/// A file planner over a simulated disk, plus the lines it logged.
pub fn simulated_files(cwd: &Path) -> (FileInitializer, Lines) {
  let (sink, lines) = recording_sink();
  let fs: Rc<dyn Filesystem> = Rc::new(SimulatedFilesystem::with_log(sink).with_cwd(cwd));
  (FileInitializer::new(CoreInitializer::new(), fs), lines)
}

pub fn execute_all(init: &mut impl Initializer) -> Vec<ExecutedStep> {
  init.execute(ExecutionOptions::default()).unwrap()
}

pub fn step_count(init: &impl Initializer) -> usize {
  init.core().steps().len()
}
