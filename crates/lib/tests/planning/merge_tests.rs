//! Configuration merges that would lose data ask for confirmation.

use std::fs;

use deployinit_lib::consts::OVERWRITE_CONFIG_WARNING;
use deployinit_lib::initializer::{Answers, ExecutionOptions, Initializer, StepKind};
use deployinit_lib::planner::ConfigFileOptions;
use tempfile::TempDir;

use super::common::host_files;

const STACK_FILE: &str = "config:\n  proj:stackType: a\n  proj:extra: x\n";

#[test]
fn dropping_a_key_warns_and_can_be_skipped() {
  let temp = TempDir::new().unwrap();
  let path = temp.path().join("Pulumi.dev.yaml");
  fs::write(&path, STACK_FILE).unwrap();
  let mut files = host_files();

  files
    .extend_config(ConfigFileOptions::new(&path), |mut existing| {
      if let Some(config) = existing.get_mut("config").and_then(|c| match c {
        deployinit_lib::config::ConfigValue::Object(map) => Some(map),
        _ => None,
      }) {
        config.shift_remove("proj:extra");
      }
      existing
    })
    .unwrap();

  let step = &files.core().steps()[0];
  assert_eq!(step.kind(), StepKind::ModifyFile);
  assert_eq!(step.warning(), Some(OVERWRITE_CONFIG_WARNING));
  assert!(step.can_skip());

  // Declining the confirmation leaves the file alone.
  let results = files
    .execute(ExecutionOptions::challenged(&Answers::new()))
    .unwrap();
  assert!(!results[0].executed);
  assert_eq!(fs::read_to_string(&path).unwrap(), STACK_FILE);
}

#[test]
fn adding_a_key_writes_without_asking() {
  let temp = TempDir::new().unwrap();
  let path = temp.path().join("Pulumi.dev.yaml");
  fs::write(&path, STACK_FILE).unwrap();
  let mut files = host_files();

  files
    .extend_config(ConfigFileOptions::new(&path), |mut existing| {
      existing.insert("encryptionsalt".into(), "v1:abc".into());
      existing
    })
    .unwrap();

  let challenged = files.challenge(&Answers::new()).unwrap();
  assert!(challenged[0].question.is_none());
  assert!(challenged[0].execute);

  files.execute(ExecutionOptions::challenged(&Answers::new())).unwrap();
  assert_eq!(
    fs::read_to_string(&path).unwrap(),
    format!("{}encryptionsalt: v1:abc\n", STACK_FILE)
  );
}

#[test]
fn ignore_file_append_writes_only_the_delta() {
  let temp = TempDir::new().unwrap();
  let ignore = temp.path().join(".meteorignore");
  fs::write(&ignore, "foo\nbar").unwrap();
  let mut files = host_files();

  files.add_ignore_entries(&["bar", "baz"], &ignore).unwrap();
  assert_eq!(files.core().steps().len(), 1);
  assert_eq!(files.core().steps()[0].kind(), StepKind::ModifyFile);

  files.execute(ExecutionOptions::default()).unwrap();
  let content = fs::read_to_string(&ignore).unwrap();
  assert_eq!(content.strip_prefix("foo\nbar"), Some("\nbaz"));
}
