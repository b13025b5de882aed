use std::path::PathBuf;
use std::rc::Rc;

use indexmap::IndexMap;
use tracing::debug;

use crate::config::{ConfigFormat, ConfigValue, Indent};
use crate::fs::Filesystem;
use crate::initializer::{CoreInitializer, Step, StepKind};

/// Extra step metadata for [`JsonEditor::save`].
#[derive(Debug, Clone, Default)]
pub struct SaveOptions {
  pub can_skip: bool,
  pub challenge: bool,
  pub warning: Option<String>,
}

/// Batches dotted-path writes to one JSON file into at most one step.
///
/// Obtained from [`FileInitializer::edit_json_file`](super::FileInitializer::edit_json_file).
pub struct JsonEditor<'a> {
  core: &'a mut CoreInitializer,
  fs: Rc<dyn Filesystem>,
  target_path: PathBuf,
  description: String,
  indent: Indent,
  current: ConfigValue,
  exists: bool,
  changes: IndexMap<String, ConfigValue>,
}

impl<'a> JsonEditor<'a> {
  pub(super) fn new(
    core: &'a mut CoreInitializer,
    fs: Rc<dyn Filesystem>,
    target_path: PathBuf,
    description: String,
    indent: Indent,
    current: ConfigValue,
    exists: bool,
  ) -> Self {
    Self {
      core,
      fs,
      target_path,
      description,
      indent,
      current,
      exists,
      changes: IndexMap::new(),
    }
  }

  /// Record a write. Later writes to the same path win.
  pub fn set(&mut self, path: &str, value: impl Into<ConfigValue>) -> &mut Self {
    self.changes.insert(path.to_string(), value.into());
    self
  }

  /// The value currently stored in the file, ignoring pending writes.
  pub fn get(&self, path: &str) -> &ConfigValue {
    self.current.get_path(path)
  }

  /// Plan the write if any recorded value differs from the file.
  ///
  /// Returns whether a step was added.
  pub fn save(self, options: SaveOptions) -> bool {
    let JsonEditor {
      core,
      fs,
      target_path,
      description,
      indent,
      mut current,
      exists,
      changes,
    } = self;

    let mut modified = 0;
    for (path, value) in changes {
      if current.get_path(&path) != &value {
        current.set_path(&path, value);
        modified += 1;
      }
    }

    if modified == 0 {
      debug!(path = %target_path.display(), "json file already up to date");
      return false;
    }

    let kind = if exists { StepKind::ModifyFile } else { StepKind::CreateFile };
    let path = target_path.clone();
    core.add_step(
      Step::new(kind, target_path, description, move || {
        let content = ConfigFormat::Json.render(&current, indent)?;
        Ok(fs.write_text_file(&path, &content, true)?)
      })
      .with_can_skip(options.can_skip)
      .with_challenge(options.challenge)
      .with_warning(options.warning),
    );
    true
  }
}
