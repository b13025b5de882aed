//! Filesystem capability used by the planners.
//!
//! Planners only talk to the [`Filesystem`] trait. [`HostFilesystem`] touches
//! the disk; [`SimulatedFilesystem`] answers probes from the disk but only
//! reports the mutations it would make.

mod host;
mod simulated;

use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub use host::HostFilesystem;
pub use simulated::SimulatedFilesystem;

use std::path::Path;

/// Errors raised by filesystem capabilities.
#[derive(Debug, Error)]
pub enum FsError {
  #[error("failed to {action} {}: {source}", path.display())]
  Io {
    action: &'static str,
    path: PathBuf,
    source: io::Error,
  },

  #[error("cannot carry out file operation \"{description}\", because a file already exists at {path}")]
  AlreadyExists { description: String, path: String },

  #[error("cannot carry out file operation \"{description}\", because a directory is in the way at {path}")]
  DirectoryInTheWay { description: String, path: String },
}

impl FsError {
  pub(crate) fn io(action: &'static str, path: &Path) -> impl FnOnce(io::Error) -> FsError {
    let path = path.to_path_buf();
    move |source| FsError::Io { action, path, source }
  }
}

/// What to compare a file against in [`Filesystem::content_equals`].
#[derive(Debug, Clone, Copy)]
pub enum ContentSource<'a> {
  /// The content of another file.
  File(&'a Path),
  /// Literal text.
  Text(&'a str),
}

/// The set of probing and mutating operations a plan may use.
///
/// Mutations that would replace an existing entry without `allow_overwrite`
/// fail with [`FsError::AlreadyExists`]; implementations must agree on that so
/// a simulated run rejects exactly what a real run rejects.
pub trait Filesystem {
  /// Whether anything (including a dangling symlink) is present at `path`.
  fn exists(&self, path: &Path) -> bool;

  /// Canonical path with all symlinks resolved.
  fn realpath(&self, path: &Path) -> Result<PathBuf, FsError>;

  /// Whether `path` is a directory, following symlinks.
  fn is_directory(&self, path: &Path) -> bool;

  fn is_symlink(&self, path: &Path) -> bool;

  fn read_text_file(&self, path: &Path) -> Result<String, FsError>;

  fn read_file_lines(&self, path: &Path) -> Result<Vec<String>, FsError> {
    Ok(self.read_text_file(path)?.split('\n').map(str::to_string).collect())
  }

  /// Compare content hashes of `file` and `source`.
  fn content_equals(&self, file: &Path, source: ContentSource<'_>) -> Result<bool, FsError>;

  fn copy_file(&self, src: &Path, dest: &Path, allow_overwrite: bool) -> Result<(), FsError>;

  /// Write `content` to `path`, creating parent directories as needed.
  fn write_text_file(&self, path: &Path, content: &str, allow_overwrite: bool) -> Result<(), FsError>;

  fn append_text_file(&self, path: &Path, content: &str) -> Result<(), FsError>;

  fn delete_file(&self, path: &Path) -> Result<(), FsError>;

  /// Remove a directory and everything below it.
  fn delete_directory(&self, path: &Path) -> Result<(), FsError>;

  /// Create a symlink at `link` pointing to `existing`.
  ///
  /// With `allow_overwrite`, a file or symlink at `link` is replaced; a real
  /// directory is never removed and fails with [`FsError::DirectoryInTheWay`].
  fn create_symlink(&self, existing: &Path, link: &Path, allow_overwrite: bool) -> Result<(), FsError>;
}

// Shared wording, so real and simulated runs describe operations identically.
pub(crate) fn describe_copy(src: &str, dest: &str) -> String {
  format!("Copy file from '{}' to '{}'", src, dest)
}

pub(crate) fn describe_write(path: &str) -> String {
  format!("Create text file '{}'", path)
}

pub(crate) fn describe_append(path: &str) -> String {
  format!("Modify text file '{}'", path)
}

pub(crate) fn describe_link(existing: &str, link: &str) -> String {
  format!("Create link to '{}' at '{}'", existing, link)
}

pub(crate) fn describe_delete_file(path: &str) -> String {
  format!("Delete file at '{}'", path)
}

pub(crate) fn describe_delete_directory(path: &str) -> String {
  format!("Delete directory at '{}'", path)
}
