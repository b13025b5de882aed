//! Writing per-stack configuration files.

use std::path::PathBuf;

use indexmap::IndexMap;

use super::file::{ConfigFileOptions, FileInitializer};
use crate::config::{ConfigMap, ConfigValue, sort_object, sort_object_alphabetically, stable_merge_order};
use crate::consts::stack_file_name;
use crate::error::InitError;
use crate::initializer::{CoreInitializer, Initializer};
use crate::util::log::LogSink;

/// Prefix every key of `config` with `<project>:`.
pub fn pulumi_stack_config(project: &str, config: &ConfigMap) -> ConfigMap {
  config
    .iter()
    .map(|(key, value)| (format!("{}:{}", project, key), value.clone()))
    .collect()
}

/// Options for [`StackConfigurator::add_stack`].
#[derive(Debug, Clone)]
pub struct StackOptions {
  pub stack_name: String,
  /// Values to set, grouped by project name.
  pub config: IndexMap<String, ConfigMap>,
  pub directory: PathBuf,
}

/// Merges configuration values into `Pulumi.<stack>.yaml`.
pub struct StackConfigurator {
  files: FileInitializer,
}

impl StackConfigurator {
  pub fn new(files: FileInitializer) -> Self {
    Self { files }
  }

  pub fn create(simulation: bool) -> Self {
    Self::new(FileInitializer::create(simulation))
  }

  pub fn create_with_log(simulation: bool, log: LogSink) -> Self {
    Self::new(FileInitializer::create_with_log(simulation, log))
  }

  /// Plan the merge of `options.config` into the stack file.
  ///
  /// Keys already in the file's `config` section keep their positions; new
  /// keys follow in alphabetical order. Changing an existing value makes the
  /// step ask for confirmation.
  pub fn add_stack(&mut self, options: StackOptions) -> Result<&mut Self, InitError> {
    let target = options.directory.join(stack_file_name(&options.stack_name));
    let new_config: ConfigMap = options
      .config
      .iter()
      .flat_map(|(project, values)| pulumi_stack_config(project, values))
      .collect();

    let file_options = ConfigFileOptions::new(target)
      .with_description(format!("Configure stack '{}'", options.stack_name));
    self.files.extend_config(file_options, move |mut existing| {
      let existing_config = existing
        .shift_remove("config")
        .and_then(ConfigValue::into_object)
        .unwrap_or_default();

      let order = stable_merge_order(&existing_config);
      let mut merged = existing_config;
      merged.extend(new_config);

      existing.insert("config".to_string(), ConfigValue::Object(sort_object(merged, order)));
      sort_object_alphabetically(existing)
    })?;
    Ok(self)
  }
}

impl Initializer for StackConfigurator {
  fn core(&self) -> &CoreInitializer {
    self.files.core()
  }

  fn core_mut(&mut self) -> &mut CoreInitializer {
    self.files.core_mut()
  }
}
