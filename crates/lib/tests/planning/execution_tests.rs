//! Ordering and failure isolation across a real plan.

use std::fs;

use deployinit_lib::initializer::{Initializer, StepKind, require_no_failures};
use deployinit_lib::planner::TextFileOptions;
use deployinit_lib::InitError;
use tempfile::TempDir;

use super::common::{execute_all, host_files};

#[test]
fn failure_in_the_middle_does_not_block_later_steps() {
  let temp = TempDir::new().unwrap();
  let first = temp.path().join("first.txt");
  let blocked = temp.path().join("blocked.txt");
  let last = temp.path().join("last.txt");
  let mut files = host_files();

  files
    .add_text_file("1", TextFileOptions::new(&first, "first"))
    .unwrap()
    .add_text_file("2", TextFileOptions::new(&blocked, "blocked"))
    .unwrap()
    .add_text_file("3", TextFileOptions::new(&last, "last"))
    .unwrap();

  // Appears after planning, so the create-only write of the second step fails.
  fs::write(&blocked, "in the way").unwrap();

  let results = execute_all(&mut files);
  let descriptions: Vec<_> = results.iter().map(|r| r.step.description()).collect();
  assert_eq!(descriptions, vec!["first", "blocked", "last"]);

  assert!(results.iter().all(|r| r.executed));
  assert!(results[0].execution_error.is_none());
  assert!(matches!(results[1].execution_error, Some(InitError::Fs(_))));
  assert!(results[2].execution_error.is_none());

  assert_eq!(fs::read_to_string(&last).unwrap(), "3");
  assert_eq!(fs::read_to_string(&blocked).unwrap(), "in the way");

  let err = require_no_failures(&results).unwrap_err();
  assert!(err.to_string().contains("1 step(s) encountered an error"));
}

#[test]
fn results_follow_planning_order() {
  let temp = TempDir::new().unwrap();
  let mut files = host_files();
  for name in ["c", "a", "b"] {
    files
      .add_text_file(name, TextFileOptions::new(temp.path().join(name), name))
      .unwrap();
  }
  let kinds: Vec<_> = files.core().steps().iter().map(|s| s.kind()).collect();
  assert_eq!(kinds, vec![StepKind::CreateFile; 3]);

  let results = execute_all(&mut files);
  let descriptions: Vec<_> = results.iter().map(|r| r.step.description()).collect();
  assert_eq!(descriptions, vec!["c", "a", "b"]);
}
