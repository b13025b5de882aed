//! Planning the same outcome twice adds exactly one step.

use std::fs;

use deployinit_lib::config::ConfigValue;
use deployinit_lib::config_map;
use deployinit_lib::planner::{ConfigFileOptions, TextFileOptions};
use tempfile::TempDir;

use super::common::{execute_all, host_files, step_count};

#[test]
fn ignore_entries_twice() {
  let temp = TempDir::new().unwrap();
  let ignore = temp.path().join(".dockerignore");
  let mut files = host_files();

  files.add_ignore_entries(&["a", "b"], &ignore).unwrap();
  assert_eq!(step_count(&files), 1);
  execute_all(&mut files);

  files.add_ignore_entries(&["a", "b"], &ignore).unwrap();
  assert_eq!(step_count(&files), 0);
}

#[test]
fn text_file_twice() {
  let temp = TempDir::new().unwrap();
  let path = temp.path().join("notes.txt");
  let mut files = host_files();

  files.add_text_file("hello", TextFileOptions::new(&path, "Notes")).unwrap();
  assert_eq!(step_count(&files), 1);
  execute_all(&mut files);

  files.add_text_file("hello", TextFileOptions::new(&path, "Notes")).unwrap();
  assert_eq!(step_count(&files), 0);
}

#[test]
fn config_file_twice() {
  let temp = TempDir::new().unwrap();
  let path = temp.path().join("Pulumi.yaml");
  let config = ConfigValue::Object(config_map! { "name" => "shop", "runtime" => "nodejs" });
  let mut files = host_files();

  files.add_config_file(&config, ConfigFileOptions::new(&path)).unwrap();
  execute_all(&mut files);
  assert_eq!(fs::read_to_string(&path).unwrap(), "name: shop\nruntime: nodejs\n");

  files.add_config_file(&config, ConfigFileOptions::new(&path)).unwrap();
  assert_eq!(step_count(&files), 0);
}

#[cfg(unix)]
#[test]
fn symlink_already_pointing_at_source_is_a_noop() {
  let temp = TempDir::new().unwrap();
  let src = temp.path().join("index.js");
  let dest = temp.path().join("pulumi.js");
  fs::write(&src, "program").unwrap();
  std::os::unix::fs::symlink(&src, &dest).unwrap();

  let mut files = host_files();
  files.install_file(&src, &dest, true).unwrap();
  assert_eq!(step_count(&files), 0);
}

#[cfg(unix)]
#[test]
fn directory_link_twice() {
  let temp = TempDir::new().unwrap();
  let src = temp.path().join("package");
  fs::create_dir(&src).unwrap();
  let target = temp.path().join("app/node_modules/package");
  let mut files = host_files();

  files.add_directory_link(&src, &target).unwrap();
  assert_eq!(step_count(&files), 1);
  execute_all(&mut files);

  files.add_directory_link(&src, &target).unwrap();
  assert_eq!(step_count(&files), 0);
}
