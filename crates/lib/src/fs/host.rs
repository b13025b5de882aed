use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use super::{ContentSource, Filesystem, FsError};
use crate::util::hash::{hash_bytes, hash_file};
use crate::util::path::humanize_cwd;

/// Filesystem capability backed by the real disk.
#[derive(Debug, Default, Clone, Copy)]
pub struct HostFilesystem;

impl HostFilesystem {
  pub fn new() -> Self {
    Self
  }
}

fn ensure_parent(path: &Path) -> Result<(), FsError> {
  if let Some(parent) = path.parent()
    && !parent.as_os_str().is_empty()
    && !parent.exists()
  {
    fs::create_dir_all(parent).map_err(FsError::io("create directory", parent))?;
  }
  Ok(())
}

fn already_exists(description: String, path: &Path) -> FsError {
  FsError::AlreadyExists {
    description,
    path: humanize_cwd(path),
  }
}

/// Cross-platform symlink creation.
fn symlink(target: &Path, link: &Path) -> io::Result<()> {
  #[cfg(unix)]
  {
    std::os::unix::fs::symlink(target, link)
  }
  #[cfg(windows)]
  {
    if target.is_dir() {
      std::os::windows::fs::symlink_dir(target, link)
    } else {
      std::os::windows::fs::symlink_file(target, link)
    }
  }
}

impl Filesystem for HostFilesystem {
  fn exists(&self, path: &Path) -> bool {
    path.symlink_metadata().is_ok()
  }

  fn realpath(&self, path: &Path) -> Result<PathBuf, FsError> {
    dunce::canonicalize(path).map_err(FsError::io("resolve", path))
  }

  fn is_directory(&self, path: &Path) -> bool {
    path.is_dir()
  }

  fn is_symlink(&self, path: &Path) -> bool {
    path
      .symlink_metadata()
      .map(|meta| meta.file_type().is_symlink())
      .unwrap_or(false)
  }

  fn read_text_file(&self, path: &Path) -> Result<String, FsError> {
    fs::read_to_string(path).map_err(FsError::io("read", path))
  }

  fn content_equals(&self, file: &Path, source: ContentSource<'_>) -> Result<bool, FsError> {
    let current = hash_file(file).map_err(FsError::io("hash", file))?;
    let candidate = match source {
      ContentSource::File(other) => hash_file(other).map_err(FsError::io("hash", other))?,
      ContentSource::Text(text) => hash_bytes(text.as_bytes()),
    };
    Ok(current == candidate)
  }

  fn copy_file(&self, src: &Path, dest: &Path, allow_overwrite: bool) -> Result<(), FsError> {
    if !allow_overwrite && self.exists(dest) {
      return Err(already_exists(
        super::describe_copy(&humanize_cwd(src), &humanize_cwd(dest)),
        dest,
      ));
    }
    ensure_parent(dest)?;
    debug!(src = %src.display(), dest = %dest.display(), "copying file");
    fs::copy(src, dest).map_err(FsError::io("copy to", dest))?;
    Ok(())
  }

  fn write_text_file(&self, path: &Path, content: &str, allow_overwrite: bool) -> Result<(), FsError> {
    ensure_parent(path)?;

    let mut options = OpenOptions::new();
    options.write(true);
    if allow_overwrite {
      options.create(true).truncate(true);
    } else {
      options.create_new(true);
    }

    let mut file = options.open(path).map_err(|e| {
      if e.kind() == io::ErrorKind::AlreadyExists {
        already_exists(super::describe_write(&humanize_cwd(path)), path)
      } else {
        FsError::Io {
          action: "write",
          path: path.to_path_buf(),
          source: e,
        }
      }
    })?;

    debug!(path = %path.display(), bytes = content.len(), "writing file");
    file.write_all(content.as_bytes()).map_err(FsError::io("write", path))
  }

  fn append_text_file(&self, path: &Path, content: &str) -> Result<(), FsError> {
    let mut file = OpenOptions::new()
      .append(true)
      .create(true)
      .open(path)
      .map_err(FsError::io("open", path))?;
    debug!(path = %path.display(), bytes = content.len(), "appending to file");
    file.write_all(content.as_bytes()).map_err(FsError::io("append to", path))
  }

  fn delete_file(&self, path: &Path) -> Result<(), FsError> {
    debug!(path = %path.display(), "deleting file");
    fs::remove_file(path).map_err(FsError::io("delete", path))
  }

  fn delete_directory(&self, path: &Path) -> Result<(), FsError> {
    debug!(path = %path.display(), "deleting directory");
    fs::remove_dir_all(path).map_err(FsError::io("delete directory", path))
  }

  fn create_symlink(&self, existing: &Path, link: &Path, allow_overwrite: bool) -> Result<(), FsError> {
    ensure_parent(link)?;

    if self.exists(link) {
      let description = super::describe_link(&humanize_cwd(existing), &humanize_cwd(link));
      if !allow_overwrite {
        return Err(already_exists(description, link));
      }
      if self.is_directory(link) && !self.is_symlink(link) {
        return Err(FsError::DirectoryInTheWay {
          description,
          path: humanize_cwd(link),
        });
      }
      self.delete_file(link)?;
    }

    debug!(target = %existing.display(), link = %link.display(), "creating symlink");
    symlink(existing, link).map_err(FsError::io("create symlink at", link))
  }
}
