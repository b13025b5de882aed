//! Line-oriented log sinks.
//!
//! The reporter and the simulated filesystem print human-readable lines.
//! They write through a [`LogSink`] so callers can redirect the lines to a
//! terminal, a test buffer, or `tracing`.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::info;

/// Receives one rendered line at a time.
pub type LogSink = Rc<dyn Fn(&str)>;

/// Sink that forwards every line to `tracing` at info level.
pub fn tracing_sink() -> LogSink {
  Rc::new(|line: &str| info!("{}", line))
}

/// Sink that records every line, for inspection after the fact.
pub fn recording_sink() -> (LogSink, Rc<RefCell<Vec<String>>>) {
  let lines = Rc::new(RefCell::new(Vec::new()));
  let recorded = Rc::clone(&lines);
  let sink: LogSink = Rc::new(move |line: &str| recorded.borrow_mut().push(line.to_string()));
  (sink, lines)
}
