//! CLI output formatting utilities.
//!
//! Provides colored status messages and renders the execution reporter's
//! progress lines for the terminal.

use std::rc::Rc;

use deployinit_lib::util::log::LogSink;
use owo_colors::{OwoColorize, Stream};

pub mod symbols {
  pub const SUCCESS: &str = "✓";
  pub const ERROR: &str = "✗";
  pub const WARNING: &str = "⚠";
  pub const INFO: &str = "•";
  pub const ARROW: &str = "→";
  pub const SKIP: &str = "-";
}

/// How a reporter line should be decorated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
  Started,
  Ended,
  Succeeded,
  Failed,
  Simulated,
  Other,
}

pub fn classify(line: &str) -> LineKind {
  if line.starts_with("Started Execution:") {
    LineKind::Started
  } else if line.starts_with("Ended Execution:") {
    LineKind::Ended
  } else if line.starts_with("Execution Successful:") {
    LineKind::Succeeded
  } else if line.starts_with("Execution Failed:") {
    LineKind::Failed
  } else if line.starts_with("Would execute:") {
    LineKind::Simulated
  } else {
    LineKind::Other
  }
}

pub fn print_line(line: &str) {
  match classify(line) {
    LineKind::Started => println!("{} {}", symbols::ARROW.if_supports_color(Stream::Stdout, |s| s.cyan()), line),
    LineKind::Ended => println!(
      "{} {}",
      symbols::INFO.if_supports_color(Stream::Stdout, |s| s.dimmed()),
      line.if_supports_color(Stream::Stdout, |s| s.dimmed())
    ),
    LineKind::Succeeded => print_success(line),
    LineKind::Failed => print_error(line),
    LineKind::Simulated => println!(
      "{} {}",
      symbols::SKIP.if_supports_color(Stream::Stdout, |s| s.yellow()),
      line.if_supports_color(Stream::Stdout, |s| s.yellow())
    ),
    LineKind::Other => println!("{}", line),
  }
}

/// Log sink that prints reporter and simulation lines to the terminal.
pub fn terminal_sink() -> LogSink {
  Rc::new(|line: &str| print_line(line))
}

pub fn print_success(message: &str) {
  println!(
    "{} {}",
    symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green()),
    message
  );
}

pub fn print_error(message: &str) {
  eprintln!(
    "{} {}",
    symbols::ERROR.if_supports_color(Stream::Stderr, |s| s.red()),
    message.if_supports_color(Stream::Stderr, |s| s.red())
  );
}

pub fn print_warning(message: &str) {
  eprintln!(
    "{} {}",
    symbols::WARNING.if_supports_color(Stream::Stderr, |s| s.yellow()),
    message.if_supports_color(Stream::Stderr, |s| s.yellow())
  );
}

pub fn print_info(message: &str) {
  println!(
    "{} {}",
    symbols::INFO.if_supports_color(Stream::Stdout, |s| s.blue()),
    message
  );
}
