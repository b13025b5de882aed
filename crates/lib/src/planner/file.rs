//! Idempotent planning of file, directory, link and configuration changes.
//!
//! Every operation probes the current state first and adds at most one step
//! (two for a directory link that must replace something). When the target
//! already matches, nothing is planned.

use std::path::{Path, PathBuf};
use std::rc::Rc;

use tracing::debug;

use super::json_edit::JsonEditor;
use crate::config::{ConfigFormat, ConfigMap, ConfigValue, Indent, is_destructive, read_config};
use crate::consts::{DEFAULT_CONFIG_DESCRIPTION, OVERWRITE_CONFIG_WARNING, OVERWRITE_FILE_WARNING};
use crate::error::InitError;
use crate::fs::{ContentSource, Filesystem, HostFilesystem, SimulatedFilesystem};
use crate::initializer::{CoreInitializer, Initializer, Step, StepKind};
use crate::util::log::{LogSink, tracing_sink};
use crate::util::path::humanize_cwd;

/// Options for [`FileInitializer::add_text_file`].
#[derive(Debug, Clone)]
pub struct TextFileOptions {
  pub target_path: PathBuf,
  pub description: String,
  /// Attached when existing content would be replaced. `None` replaces silently.
  pub warning: Option<String>,
}

impl TextFileOptions {
  pub fn new(target_path: impl Into<PathBuf>, description: impl Into<String>) -> Self {
    Self {
      target_path: target_path.into(),
      description: description.into(),
      warning: Some(OVERWRITE_FILE_WARNING.to_string()),
    }
  }

  pub fn with_warning(mut self, warning: Option<String>) -> Self {
    self.warning = warning;
    self
  }
}

/// Options for [`FileInitializer::add_config_file`] and
/// [`FileInitializer::extend_config`].
#[derive(Debug, Clone)]
pub struct ConfigFileOptions {
  pub target_path: PathBuf,
  pub description: String,
  /// Inferred from the file extension when unset.
  pub format: Option<ConfigFormat>,
  pub indent: Indent,
  pub warning: Option<String>,
}

impl ConfigFileOptions {
  pub fn new(target_path: impl Into<PathBuf>) -> Self {
    Self {
      target_path: target_path.into(),
      description: DEFAULT_CONFIG_DESCRIPTION.to_string(),
      format: None,
      indent: Indent::DEFAULT,
      warning: Some(OVERWRITE_FILE_WARNING.to_string()),
    }
  }

  pub fn with_description(mut self, description: impl Into<String>) -> Self {
    self.description = description.into();
    self
  }

  pub fn with_format(mut self, format: ConfigFormat) -> Self {
    self.format = Some(format);
    self
  }

  pub fn with_indent(mut self, indent: Indent) -> Self {
    self.indent = indent;
    self
  }

  pub fn with_warning(mut self, warning: Option<String>) -> Self {
    self.warning = warning;
    self
  }
}

/// Plans filesystem mutations on top of a [`CoreInitializer`].
pub struct FileInitializer {
  core: CoreInitializer,
  fs: Rc<dyn Filesystem>,
}

impl FileInitializer {
  pub fn new(core: CoreInitializer, fs: Rc<dyn Filesystem>) -> Self {
    Self { core, fs }
  }

  /// A fresh plan over the host filesystem, or over a [`SimulatedFilesystem`]
  /// that only reports what it would do.
  pub fn create(simulation: bool) -> Self {
    Self::create_with_log(simulation, tracing_sink())
  }

  /// Like [`FileInitializer::create`], with simulated operations reported to `log`.
  pub fn create_with_log(simulation: bool, log: LogSink) -> Self {
    let fs: Rc<dyn Filesystem> = if simulation {
      Rc::new(SimulatedFilesystem::with_log(log))
    } else {
      Rc::new(HostFilesystem::new())
    };
    Self::new(CoreInitializer::new(), fs)
  }

  pub fn filesystem(&self) -> &Rc<dyn Filesystem> {
    &self.fs
  }

  /// Make sure every entry appears in the ignore file.
  ///
  /// Creates the file when missing; otherwise appends only the entries not
  /// yet present (compared after trimming).
  pub fn add_ignore_entries<S: AsRef<str>>(
    &mut self,
    entries: &[S],
    ignore_file: impl AsRef<Path>,
  ) -> Result<&mut Self, InitError> {
    let ignore_file = ignore_file.as_ref().to_path_buf();
    let entries: Vec<String> = entries.iter().map(|e| e.as_ref().to_string()).collect();

    if !self.fs.exists(&ignore_file) {
      let fs = Rc::clone(&self.fs);
      let content = entries.join("\n");
      let path = ignore_file.clone();
      self.core.add_step(Step::new(
        StepKind::CreateFile,
        &ignore_file,
        format!("With entries: {}", entries.join(", ")),
        move || Ok(fs.write_text_file(&path, &content, false)?),
      ));
      return Ok(self);
    }

    let existing = self.fs.read_text_file(&ignore_file)?;
    let present: std::collections::HashSet<&str> = existing.split('\n').map(str::trim).collect();
    let missing: Vec<String> = entries
      .into_iter()
      .filter(|entry| !present.contains(entry.as_str()))
      .collect();

    if missing.is_empty() {
      debug!(path = %ignore_file.display(), "ignore entries already present");
      return Ok(self);
    }

    let separator = if existing.is_empty() || existing.ends_with('\n') {
      ""
    } else {
      "\n"
    };
    let delta = format!("{}{}", separator, missing.join("\n"));
    let fs = Rc::clone(&self.fs);
    let path = ignore_file.clone();
    self.core.add_step(Step::new(
      StepKind::ModifyFile,
      &ignore_file,
      format!("Add entries: {}", missing.join(", ")),
      move || Ok(fs.append_text_file(&path, &delta)?),
    ));
    Ok(self)
  }

  /// Copy `src` to `dest`, or link `dest` to `src` when `as_symlink` is set.
  pub fn install_file(
    &mut self,
    src: impl AsRef<Path>,
    dest: impl AsRef<Path>,
    as_symlink: bool,
  ) -> Result<&mut Self, InitError> {
    let src = src.as_ref().to_path_buf();
    let dest = dest.as_ref().to_path_buf();

    let mut kind = if as_symlink { StepKind::LinkFile } else { StepKind::CreateFile };
    let mut description = if as_symlink {
      format!("Link to {}", humanize_cwd(&src))
    } else {
      format!("Copy from {}", humanize_cwd(&src))
    };
    let mut can_skip = false;
    let mut warn = false;
    let overwrite = self.fs.exists(&dest);

    if overwrite {
      can_skip = true;
      if as_symlink {
        let resolved = self.fs.realpath(&dest).ok();
        if resolved.is_some() && resolved == self.fs.realpath(&src).ok() {
          debug!(dest = %dest.display(), "link already in place");
          return Ok(self);
        }
        // A plain file resolves to itself; replacing it loses its content.
        warn = !self.fs.is_symlink(&dest);
        description = format!("Overwrite original file with a link to {}", humanize_cwd(&src));
      } else {
        if !self.fs.is_symlink(&dest) && self.fs.content_equals(&dest, ContentSource::File(&src))? {
          debug!(dest = %dest.display(), "file already identical");
          return Ok(self);
        }
        kind = StepKind::ModifyFile;
        description = format!("Overwrite original file with {}", humanize_cwd(&src));
        warn = true;
      }
    }

    let fs = Rc::clone(&self.fs);
    let target = dest.clone();
    let action = move || -> Result<(), InitError> {
      if as_symlink {
        fs.create_symlink(&src, &target, overwrite)?;
      } else {
        if overwrite && fs.is_symlink(&target) {
          fs.delete_file(&target)?;
        }
        fs.copy_file(&src, &target, overwrite)?;
      }
      Ok(())
    };

    self.core.add_step(
      Step::new(kind, dest, description, action)
        .with_can_skip(can_skip)
        .with_warning(warn.then(|| OVERWRITE_FILE_WARNING.to_string()))
        .with_challenge(warn),
    );
    Ok(self)
  }

  /// Make sure the file at `options.target_path` contains exactly `text`.
  pub fn add_text_file(&mut self, text: impl Into<String>, options: TextFileOptions) -> Result<&mut Self, InitError> {
    let text = text.into();
    let TextFileOptions {
      target_path,
      description,
      warning,
    } = options;

    let exists = self.fs.exists(&target_path);
    let overwrite = exists && !self.fs.content_equals(&target_path, ContentSource::Text(&text))?;

    if exists && !overwrite {
      debug!(path = %target_path.display(), "file content already up to date");
      return Ok(self);
    }

    let kind = if overwrite { StepKind::ModifyFile } else { StepKind::CreateFile };
    let warning = if overwrite { warning } else { None };
    let can_skip = warning.is_some();

    let fs = Rc::clone(&self.fs);
    let path = target_path.clone();
    self.core.add_step(
      Step::new(kind, target_path, description, move || {
        Ok(fs.write_text_file(&path, &text, overwrite)?)
      })
      .with_can_skip(can_skip)
      .with_warning(warning),
    );
    Ok(self)
  }

  /// Serialize `config` in the target's format and plan it like a text file.
  pub fn add_config_file(&mut self, config: &ConfigValue, options: ConfigFileOptions) -> Result<&mut Self, InitError> {
    let format = match options.format {
      Some(format) => format,
      None => ConfigFormat::require_from_path(&options.target_path)?,
    };
    let content = format.render(config, options.indent)?;

    self.add_text_file(
      content,
      TextFileOptions {
        target_path: options.target_path,
        description: options.description,
        warning: options.warning,
      },
    )
  }

  /// Merge new values into an existing configuration file.
  ///
  /// `transform` receives the current top-level object (empty if the file is
  /// missing, blank or not an object) and returns the new content. The file's
  /// indentation is kept. The write only carries a warning, and only asks
  /// for confirmation, when it would drop or change existing values.
  /// `options.indent` and `options.warning` are derived and ignored.
  pub fn extend_config(
    &mut self,
    options: ConfigFileOptions,
    transform: impl FnOnce(ConfigMap) -> ConfigMap,
  ) -> Result<&mut Self, InitError> {
    let target_path = options.target_path.clone();
    let format = match options.format {
      Some(format) => format,
      None => ConfigFormat::require_from_path(&target_path)?,
    };

    let existing = if self.fs.exists(&target_path) {
      Some(self.fs.read_text_file(&target_path)?)
    } else {
      None
    };

    let indent = existing
      .as_deref()
      .and_then(Indent::detect)
      .unwrap_or(Indent::DEFAULT);

    let current = match existing.as_deref() {
      Some(content) if !content.trim().is_empty() => read_config(&target_path, format, content)?,
      _ => ConfigValue::object(),
    };

    let base = current.as_object().cloned().unwrap_or_default();
    let extended = ConfigValue::Object(transform(base));

    let destructive = is_destructive(&current, &extended);
    debug!(path = %target_path.display(), destructive, "extending configuration");

    self.add_config_file(
      &extended,
      ConfigFileOptions {
        format: Some(format),
        indent,
        warning: destructive.then(|| OVERWRITE_CONFIG_WARNING.to_string()),
        ..options
      },
    )
  }

  /// Make `target_dir` a symbolic link to the directory `src_dir`.
  ///
  /// Anything else occupying `target_dir` is deleted first, in a separate
  /// step that always asks for confirmation.
  pub fn add_directory_link(
    &mut self,
    src_dir: impl AsRef<Path>,
    target_dir: impl AsRef<Path>,
  ) -> Result<&mut Self, InitError> {
    let src_dir = src_dir.as_ref().to_path_buf();
    let target_dir = target_dir.as_ref().to_path_buf();

    if !self.fs.is_directory(&src_dir) {
      return Err(InitError::NotADirectory { path: src_dir });
    }

    let target_exists = self.fs.exists(&target_dir);

    if target_exists {
      if let (Ok(target), Ok(src)) = (self.fs.realpath(&target_dir), self.fs.realpath(&src_dir))
        && target == src
      {
        debug!(target = %target_dir.display(), "directory link already in place");
        return Ok(self);
      }

      if !self.fs.is_symlink(&target_dir) {
        let is_directory = self.fs.is_directory(&target_dir);
        let (kind, file_type) = if is_directory {
          (StepKind::DeleteDirectory, "directory")
        } else {
          (StepKind::DeleteFile, "file")
        };

        let fs = Rc::clone(&self.fs);
        let path = target_dir.clone();
        self.core.add_step(
          Step::new(
            kind,
            &target_dir,
            format!(
              "Delete {} to make room for symbolic link to directory '{}'",
              file_type,
              humanize_cwd(&src_dir)
            ),
            move || {
              if is_directory {
                fs.delete_directory(&path)?;
              } else {
                fs.delete_file(&path)?;
              }
              Ok(())
            },
          )
          .with_challenge(true)
          .with_warning(Some(format!("The {} and all of its contents will be deleted", file_type))),
        );
      }
    }

    let fs = Rc::clone(&self.fs);
    let src = src_dir.clone();
    let link = target_dir.clone();
    self.core.add_step(Step::new(
      StepKind::LinkDirectory,
      target_dir,
      format!("Add symbolic link to directory {}", humanize_cwd(&src_dir)),
      move || Ok(fs.create_symlink(&src, &link, target_exists)?),
    ));
    Ok(self)
  }

  /// Start a batch of path-level edits to a JSON file.
  ///
  /// The file's indentation is kept; a missing file is edited as `{}`.
  pub fn edit_json_file(
    &mut self,
    target_path: impl AsRef<Path>,
    description: impl Into<String>,
  ) -> Result<JsonEditor<'_>, InitError> {
    let target_path = target_path.as_ref().to_path_buf();
    let existing = if self.fs.exists(&target_path) {
      Some(self.fs.read_text_file(&target_path)?)
    } else {
      None
    };

    let indent = existing
      .as_deref()
      .and_then(Indent::detect)
      .unwrap_or(Indent::DEFAULT);
    let current = match existing.as_deref() {
      Some(content) => read_config(&target_path, ConfigFormat::Json, content)?,
      None => ConfigValue::object(),
    };

    Ok(JsonEditor::new(
      &mut self.core,
      Rc::clone(&self.fs),
      target_path,
      description.into(),
      indent,
      current,
      existing.is_some(),
    ))
  }
}

impl Initializer for FileInitializer {
  fn core(&self) -> &CoreInitializer {
    &self.core
  }

  fn core_mut(&mut self) -> &mut CoreInitializer {
    &mut self.core
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config_map;
  use crate::fs::FsError;
  use crate::initializer::{Answers, ExecutionOptions};
  use std::fs;
  use tempfile::TempDir;

  fn host() -> FileInitializer {
    FileInitializer::create(false)
  }

  fn run(files: &mut FileInitializer) {
    let results = files.execute(ExecutionOptions::default()).unwrap();
    for result in &results {
      assert!(result.execution_error.is_none(), "{:?}", result.execution_error);
    }
  }

  #[test]
  fn ignore_entries_create_missing_file() {
    let temp = TempDir::new().unwrap();
    let ignore = temp.path().join(".dockerignore");
    let mut files = host();

    files.add_ignore_entries(&["Dockerfile", ".meteor/local"], &ignore).unwrap();
    assert_eq!(files.core().steps().len(), 1);
    assert_eq!(files.core().steps()[0].kind(), StepKind::CreateFile);

    run(&mut files);
    assert_eq!(fs::read_to_string(&ignore).unwrap(), "Dockerfile\n.meteor/local");
  }

  #[test]
  fn ignore_entries_append_only_missing() {
    let temp = TempDir::new().unwrap();
    let ignore = temp.path().join(".meteorignore");
    fs::write(&ignore, "foo\nbar").unwrap();
    let mut files = host();

    files.add_ignore_entries(&["bar", "baz"], &ignore).unwrap();
    assert_eq!(files.core().steps().len(), 1);
    assert_eq!(files.core().steps()[0].kind(), StepKind::ModifyFile);
    assert_eq!(files.core().steps()[0].description(), "Add entries: baz");

    run(&mut files);
    assert_eq!(fs::read_to_string(&ignore).unwrap(), "foo\nbar\nbaz");
  }

  #[test]
  fn ignore_entries_after_trailing_newline_add_no_blank_line() {
    let temp = TempDir::new().unwrap();
    let ignore = temp.path().join(".dockerignore");
    fs::write(&ignore, "foo\n").unwrap();
    let mut files = host();

    files.add_ignore_entries(&["baz"], &ignore).unwrap();
    run(&mut files);
    assert_eq!(fs::read_to_string(&ignore).unwrap(), "foo\nbaz");
  }

  #[test]
  fn ignore_entries_trim_existing_lines() {
    let temp = TempDir::new().unwrap();
    let ignore = temp.path().join(".ignore");
    fs::write(&ignore, "  foo  \r\nbar\n").unwrap();
    let mut files = host();

    files.add_ignore_entries(&["foo", "bar"], &ignore).unwrap();
    assert!(files.core().steps().is_empty());
  }

  #[test]
  fn text_file_lifecycle() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("Dockerfile");
    let mut files = host();

    files
      .add_text_file("FROM node", TextFileOptions::new(&path, "Add Dockerfile"))
      .unwrap();
    let step = &files.core().steps()[0];
    assert_eq!(step.kind(), StepKind::CreateFile);
    assert!(!step.can_skip());
    assert!(step.warning().is_none());
    run(&mut files);

    files
      .add_text_file("FROM node", TextFileOptions::new(&path, "Add Dockerfile"))
      .unwrap();
    assert!(files.core().steps().is_empty());

    files
      .add_text_file("FROM alpine", TextFileOptions::new(&path, "Add Dockerfile"))
      .unwrap();
    let step = &files.core().steps()[0];
    assert_eq!(step.kind(), StepKind::ModifyFile);
    assert!(step.can_skip());
    assert_eq!(step.warning(), Some(OVERWRITE_FILE_WARNING));
    run(&mut files);
    assert_eq!(fs::read_to_string(&path).unwrap(), "FROM alpine");
  }

  #[test]
  fn config_file_unknown_format_adds_nothing() {
    let temp = TempDir::new().unwrap();
    let mut files = host();
    let err = files
      .add_config_file(&ConfigValue::object(), ConfigFileOptions::new(temp.path().join("a.toml")))
      .err()
      .unwrap();
    assert!(matches!(err, InitError::Config(_)));
    assert!(files.core().steps().is_empty());
  }

  #[test]
  fn config_file_uses_indent() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("settings.json");
    let mut files = host();
    let config = ConfigValue::Object(config_map! { "a" => 1_i64 });

    files
      .add_config_file(&config, ConfigFileOptions::new(&path).with_indent(Indent::spaces(4)))
      .unwrap();
    run(&mut files);
    assert_eq!(fs::read_to_string(&path).unwrap(), "{\n    \"a\": 1\n}");
  }

  #[test]
  fn config_file_explicit_format_ignores_extension() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join(".babelrc");
    let mut files = host();
    let config = ConfigValue::Object(config_map! { "a" => 1_i64 });

    files
      .add_config_file(
        &config,
        ConfigFileOptions::new(&path)
          .with_format(ConfigFormat::Json)
          .with_description("Write babel config"),
      )
      .unwrap();
    assert_eq!(files.core().steps()[0].description(), "Write babel config");
    run(&mut files);
    assert_eq!(fs::read_to_string(&path).unwrap(), "{\n  \"a\": 1\n}");
  }

  #[test]
  fn extend_config_additive_change_does_not_warn() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("Pulumi.dev.yaml");
    fs::write(&path, "config:\n    proj:a: x\n").unwrap();
    let mut files = host();

    files
      .extend_config(ConfigFileOptions::new(&path), |mut existing| {
        existing.insert("encryptionsalt".into(), "salt".into());
        existing
      })
      .unwrap();

    let step = &files.core().steps()[0];
    assert_eq!(step.kind(), StepKind::ModifyFile);
    assert!(step.warning().is_none());
    assert!(!step.can_skip());

    run(&mut files);
    assert_eq!(
      fs::read_to_string(&path).unwrap(),
      "config:\n    proj:a: x\nencryptionsalt: salt\n"
    );
  }

  #[test]
  fn extend_config_missing_file_starts_empty() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("new.json");
    let mut files = host();

    files
      .extend_config(ConfigFileOptions::new(&path), |existing| {
        assert!(existing.is_empty());
        config_map! { "name" => "app" }
      })
      .unwrap();
    assert_eq!(files.core().steps()[0].kind(), StepKind::CreateFile);
  }

  #[test]
  fn extend_config_unchanged_is_noop() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("a.json");
    fs::write(&path, "{\n  \"a\": 1\n}").unwrap();
    let mut files = host();

    files.extend_config(ConfigFileOptions::new(&path), |existing| existing).unwrap();
    assert!(files.core().steps().is_empty());
  }

  #[cfg(unix)]
  #[test]
  fn install_file_copy_and_link() {
    let temp = TempDir::new().unwrap();
    let src = temp.path().join("src.js");
    let copy = temp.path().join("copy.js");
    let link = temp.path().join("link.js");
    fs::write(&src, "program").unwrap();
    let mut files = host();

    files.install_file(&src, &copy, false).unwrap();
    files.install_file(&src, &link, true).unwrap();
    let kinds: Vec<_> = files.core().steps().iter().map(|s| s.kind()).collect();
    assert_eq!(kinds, vec![StepKind::CreateFile, StepKind::LinkFile]);
    run(&mut files);

    assert_eq!(fs::read_to_string(&copy).unwrap(), "program");
    assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());

    files.install_file(&src, &copy, false).unwrap();
    files.install_file(&src, &link, true).unwrap();
    assert!(files.core().steps().is_empty());
  }

  #[test]
  fn install_file_over_different_file_warns() {
    let temp = TempDir::new().unwrap();
    let src = temp.path().join("src.js");
    let dest = temp.path().join("dest.js");
    fs::write(&src, "new").unwrap();
    fs::write(&dest, "old").unwrap();
    let mut files = host();

    files.install_file(&src, &dest, false).unwrap();
    let step = &files.core().steps()[0];
    assert_eq!(step.kind(), StepKind::ModifyFile);
    assert!(step.can_skip());
    assert!(step.challenge());
    assert_eq!(step.warning(), Some(OVERWRITE_FILE_WARNING));

    run(&mut files);
    assert_eq!(fs::read_to_string(&dest).unwrap(), "new");
  }

  #[cfg(unix)]
  #[test]
  fn install_link_over_plain_file_warns() {
    let temp = TempDir::new().unwrap();
    let src = temp.path().join("src.js");
    let dest = temp.path().join("dest.js");
    fs::write(&src, "new").unwrap();
    fs::write(&dest, "old").unwrap();
    let mut files = host();

    files.install_file(&src, &dest, true).unwrap();
    let step = &files.core().steps()[0];
    assert_eq!(step.kind(), StepKind::LinkFile);
    assert!(step.can_skip());
    assert!(step.warning().is_some());

    run(&mut files);
    assert_eq!(fs::read_to_string(&dest).unwrap(), "new");
    assert!(fs::symlink_metadata(&dest).unwrap().file_type().is_symlink());
  }

  #[cfg(unix)]
  #[test]
  fn install_copy_over_stale_link_replaces_link() {
    let temp = TempDir::new().unwrap();
    let src = temp.path().join("src.js");
    let other = temp.path().join("other.js");
    let dest = temp.path().join("dest.js");
    fs::write(&src, "new").unwrap();
    fs::write(&other, "other").unwrap();
    std::os::unix::fs::symlink(&other, &dest).unwrap();
    let mut files = host();

    files.install_file(&src, &dest, false).unwrap();
    run(&mut files);

    assert!(!fs::symlink_metadata(&dest).unwrap().file_type().is_symlink());
    assert_eq!(fs::read_to_string(&dest).unwrap(), "new");
    assert_eq!(fs::read_to_string(&other).unwrap(), "other");
  }

  #[test]
  fn directory_link_requires_directory() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("file");
    fs::write(&file, "x").unwrap();
    let mut files = host();

    let err = files.add_directory_link(&file, temp.path().join("link")).err().unwrap();
    assert!(matches!(err, InitError::NotADirectory { .. }));
    assert!(err.to_string().contains("because it is not a directory"));
    assert!(files.core().steps().is_empty());
  }

  #[cfg(unix)]
  #[test]
  fn directory_link_replaces_existing_directory() {
    let temp = TempDir::new().unwrap();
    let src = temp.path().join("resources");
    let target = temp.path().join("app/resources");
    fs::create_dir_all(&src).unwrap();
    fs::create_dir_all(&target).unwrap();
    fs::write(target.join("stale"), "x").unwrap();
    let mut files = host();

    files.add_directory_link(&src, &target).unwrap();
    let steps = files.core().steps();
    assert_eq!(steps.len(), 2);
    assert_eq!(steps[0].kind(), StepKind::DeleteDirectory);
    assert!(steps[0].challenge());
    assert!(!steps[0].can_skip());
    assert!(steps[0].warning().is_some());
    assert_eq!(steps[1].kind(), StepKind::LinkDirectory);

    run(&mut files);
    assert!(fs::symlink_metadata(&target).unwrap().file_type().is_symlink());

    files.add_directory_link(&src, &target).unwrap();
    assert!(files.core().steps().is_empty());
  }

  #[cfg(unix)]
  #[test]
  fn declined_directory_delete_keeps_contents() {
    let temp = TempDir::new().unwrap();
    let src = temp.path().join("resources");
    let target = temp.path().join("app/resources");
    fs::create_dir_all(&src).unwrap();
    fs::create_dir_all(&target).unwrap();
    fs::write(target.join("precious"), "keep me").unwrap();
    let mut files = host();

    files.add_directory_link(&src, &target).unwrap();
    let mut answers = Answers::new();
    answers.insert("Delete Directory 0".to_string(), false);
    let results = files.execute(ExecutionOptions::challenged(&answers)).unwrap();

    let delete = results.iter().find(|r| r.step.kind() == StepKind::DeleteDirectory).unwrap();
    assert!(!delete.executed);
    let link = results.iter().find(|r| r.step.kind() == StepKind::LinkDirectory).unwrap();
    assert!(link.executed);
    assert!(matches!(
      link.execution_error,
      Some(InitError::Fs(FsError::DirectoryInTheWay { .. }))
    ));

    assert!(!fs::symlink_metadata(&target).unwrap().file_type().is_symlink());
    assert_eq!(fs::read_to_string(target.join("precious")).unwrap(), "keep me");
  }

  #[test]
  fn edit_json_batches_changes() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("package.json");
    fs::write(&path, "{\n    \"name\": \"app\",\n    \"main\": \"index.js\"\n}").unwrap();
    let mut files = host();

    let mut editor = files.edit_json_file(&path, "Configure package").unwrap();
    assert_eq!(editor.get("main"), &ConfigValue::from("index.js"));
    editor.set("main", "pulumi.js");
    editor.set("devDependencies.@pulumi/pulumi", "^2.0.0");
    editor.set("name", "app");
    assert!(editor.save(Default::default()));
    assert_eq!(files.core().steps().len(), 1);

    run(&mut files);
    assert_eq!(
      fs::read_to_string(&path).unwrap(),
      "{\n    \"name\": \"app\",\n    \"main\": \"pulumi.js\",\n    \"devDependencies\": {\n        \"@pulumi/pulumi\": \"^2.0.0\"\n    }\n}"
    );
  }

  #[test]
  fn edit_json_without_differences_adds_nothing() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("package.json");
    fs::write(&path, "{\"main\": \"pulumi.js\"}").unwrap();
    let mut files = host();

    let mut editor = files.edit_json_file(&path, "Configure package").unwrap();
    editor.set("main", "pulumi.js");
    assert!(!editor.save(Default::default()));
    assert!(files.core().steps().is_empty());
  }
}
