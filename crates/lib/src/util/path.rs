//! Path rendering for prompts and reports.

use std::path::{Component, MAIN_SEPARATOR, Path, PathBuf};

/// Lexically normalize a path, dropping `.` and folding `..` where possible.
pub fn normalize(path: &Path) -> PathBuf {
  let mut out = PathBuf::new();
  for component in path.components() {
    match component {
      Component::CurDir => {}
      Component::ParentDir => {
        let can_pop = matches!(out.components().next_back(), Some(Component::Normal(_)));
        if can_pop {
          out.pop();
        } else if !out.has_root() {
          out.push("..");
        }
      }
      other => out.push(other.as_os_str()),
    }
  }
  out
}

/// Render `path` relative to `base` when it is nested below it.
///
/// Nested paths come out as `./sub/file`; anything outside `base` is printed
/// as given (normalized).
pub fn humanize_path(path: &Path, base: &Path) -> String {
  let path = normalize(path);

  if path.is_relative() {
    if path.starts_with("..") {
      return path.display().to_string();
    }
    return format!(".{}{}", MAIN_SEPARATOR, path.display());
  }

  match path.strip_prefix(normalize(base)) {
    Ok(rel) if rel.as_os_str().is_empty() => ".".to_string(),
    Ok(rel) => format!(".{}{}", MAIN_SEPARATOR, rel.display()),
    Err(_) => path.display().to_string(),
  }
}

/// [`humanize_path`] against the process working directory.
pub fn humanize_cwd(path: &Path) -> String {
  match std::env::current_dir() {
    Ok(cwd) => humanize_path(path, &cwd),
    Err(_) => normalize(path).display().to_string(),
  }
}
