use std::cell::RefCell;
use std::collections::HashSet;
use std::env;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::{ContentSource, Filesystem, FsError, HostFilesystem};
use crate::util::log::{LogSink, tracing_sink};
use crate::util::path::humanize_path;

/// Filesystem capability for dry runs.
///
/// Probes read the real disk. Mutations never touch it; each one emits a
/// `Would execute: <description>` line through the log sink instead, after
/// performing the same overwrite checks a real run would. Paths it has
/// pretended to delete count as gone for those checks.
pub struct SimulatedFilesystem {
  host: HostFilesystem,
  cwd: PathBuf,
  log: LogSink,
  deleted: RefCell<HashSet<PathBuf>>,
}

impl SimulatedFilesystem {
  pub fn new() -> Self {
    Self::with_log(tracing_sink())
  }

  pub fn with_log(log: LogSink) -> Self {
    Self {
      host: HostFilesystem::new(),
      cwd: env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
      log,
      deleted: RefCell::new(HashSet::new()),
    }
  }

  /// Base directory used when rendering paths in log lines.
  pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
    self.cwd = cwd.into();
    self
  }

  fn humanize(&self, path: &Path) -> String {
    humanize_path(path, &self.cwd)
  }

  fn simulate(&self, description: &str) {
    debug!(%description, "simulating file operation");
    (self.log)(&format!("Would execute: {}", description));
  }

  fn was_deleted(&self, path: &Path) -> bool {
    self.deleted.borrow().contains(path)
  }

  fn refuse_existing(&self, description: String, path: &Path, allow_overwrite: bool) -> Result<(), FsError> {
    if !allow_overwrite && self.exists(path) && !self.was_deleted(path) {
      return Err(FsError::AlreadyExists {
        description,
        path: self.humanize(path),
      });
    }
    Ok(())
  }
}

impl Default for SimulatedFilesystem {
  fn default() -> Self {
    Self::new()
  }
}

impl Filesystem for SimulatedFilesystem {
  fn exists(&self, path: &Path) -> bool {
    self.host.exists(path)
  }

  fn realpath(&self, path: &Path) -> Result<PathBuf, FsError> {
    self.host.realpath(path)
  }

  fn is_directory(&self, path: &Path) -> bool {
    self.host.is_directory(path)
  }

  fn is_symlink(&self, path: &Path) -> bool {
    self.host.is_symlink(path)
  }

  fn read_text_file(&self, path: &Path) -> Result<String, FsError> {
    self.host.read_text_file(path)
  }

  fn content_equals(&self, file: &Path, source: ContentSource<'_>) -> Result<bool, FsError> {
    self.host.content_equals(file, source)
  }

  fn copy_file(&self, src: &Path, dest: &Path, allow_overwrite: bool) -> Result<(), FsError> {
    let description = super::describe_copy(&self.humanize(src), &self.humanize(dest));
    self.refuse_existing(description.clone(), dest, allow_overwrite)?;
    self.simulate(&description);
    Ok(())
  }

  fn write_text_file(&self, path: &Path, _content: &str, allow_overwrite: bool) -> Result<(), FsError> {
    let description = super::describe_write(&self.humanize(path));
    self.refuse_existing(description.clone(), path, allow_overwrite)?;
    self.simulate(&description);
    Ok(())
  }

  fn append_text_file(&self, path: &Path, _content: &str) -> Result<(), FsError> {
    self.simulate(&super::describe_append(&self.humanize(path)));
    Ok(())
  }

  fn delete_file(&self, path: &Path) -> Result<(), FsError> {
    self.simulate(&super::describe_delete_file(&self.humanize(path)));
    self.deleted.borrow_mut().insert(path.to_path_buf());
    Ok(())
  }

  fn delete_directory(&self, path: &Path) -> Result<(), FsError> {
    self.simulate(&super::describe_delete_directory(&self.humanize(path)));
    self.deleted.borrow_mut().insert(path.to_path_buf());
    Ok(())
  }

  fn create_symlink(&self, existing: &Path, link: &Path, allow_overwrite: bool) -> Result<(), FsError> {
    let description = super::describe_link(&self.humanize(existing), &self.humanize(link));
    self.refuse_existing(description.clone(), link, allow_overwrite)?;
    if self.is_directory(link) && !self.is_symlink(link) && !self.was_deleted(link) {
      return Err(FsError::DirectoryInTheWay {
        description,
        path: self.humanize(link),
      });
    }
    self.simulate(&description);
    Ok(())
  }
}
