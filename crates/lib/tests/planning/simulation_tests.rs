//! A simulated run plans exactly what a real run plans, without writing.

use std::fs;

use deployinit_lib::fs::FsError;
use deployinit_lib::initializer::{Initializer, StepKind};
use deployinit_lib::planner::{ConfigFileOptions, TextFileOptions};
use deployinit_lib::InitError;
use tempfile::TempDir;

use super::common::{execute_all, host_files, simulated_files};

#[test]
fn simulated_plan_matches_real_plan() {
  let temp = TempDir::new().unwrap();
  fs::write(temp.path().join(".dockerignore"), "Dockerfile").unwrap();
  fs::write(temp.path().join("a.json"), "{\n  \"a\": 1\n}").unwrap();

  let plan = |files: &mut deployinit_lib::planner::FileInitializer| {
    files
      .add_ignore_entries(&["Dockerfile", "Pulumi.yaml"], temp.path().join(".dockerignore"))
      .unwrap()
      .extend_config(ConfigFileOptions::new(temp.path().join("a.json")), |mut existing| {
        existing.insert("a".into(), 2_i64.into());
        existing
      })
      .unwrap()
      .add_text_file("new", TextFileOptions::new(temp.path().join("new.txt"), "New file"))
      .unwrap();
  };

  let mut real = host_files();
  let (mut simulated, _) = simulated_files(temp.path());
  plan(&mut real);
  plan(&mut simulated);

  let describe = |files: &deployinit_lib::planner::FileInitializer| -> Vec<(StepKind, bool, Option<String>)> {
    files
      .core()
      .steps()
      .iter()
      .map(|s| (s.kind(), s.can_skip(), s.warning().map(str::to_string)))
      .collect()
  };
  assert_eq!(describe(&real), describe(&simulated));
}

#[test]
fn simulated_execution_only_logs() {
  let temp = TempDir::new().unwrap();
  fs::write(temp.path().join(".dockerignore"), "Dockerfile").unwrap();
  let (mut files, lines) = simulated_files(temp.path());

  files
    .add_ignore_entries(&["Pulumi.yaml"], temp.path().join(".dockerignore"))
    .unwrap()
    .add_text_file("x", TextFileOptions::new(temp.path().join("x.txt"), "x"))
    .unwrap();

  let results = execute_all(&mut files);
  assert!(results.iter().all(|r| r.execution_error.is_none()));
  assert_eq!(fs::read_to_string(temp.path().join(".dockerignore")).unwrap(), "Dockerfile");
  assert!(!temp.path().join("x.txt").exists());
  assert_eq!(
    *lines.borrow(),
    vec![
      "Would execute: Modify text file './.dockerignore'".to_string(),
      "Would execute: Create text file './x.txt'".to_string(),
    ]
  );
}

#[test]
fn simulated_conflicts_fail_like_real_ones() {
  let temp = TempDir::new().unwrap();
  let path = temp.path().join("late.txt");
  let (mut files, lines) = simulated_files(temp.path());

  files.add_text_file("x", TextFileOptions::new(&path, "late")).unwrap();
  fs::write(&path, "appeared").unwrap();

  let results = execute_all(&mut files);
  assert!(matches!(
    results[0].execution_error,
    Some(InitError::Fs(FsError::AlreadyExists { .. }))
  ));
  assert!(lines.borrow().is_empty());
  assert_eq!(fs::read_to_string(&path).unwrap(), "appeared");
}
