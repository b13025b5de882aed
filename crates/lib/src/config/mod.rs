//! Configuration trees, their file formats, and the safe-merge helpers.

pub mod diff;
pub mod indent;
pub mod order;
pub mod value;
mod yaml;

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use thiserror::Error;

pub use diff::is_destructive;
pub use indent::{Indent, IndentStyle};
pub use order::{sort_object, sort_object_alphabetically, stable_merge_order};
pub use value::{ConfigMap, ConfigValue};

/// Errors raised while reading or writing configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("unknown configuration format for file '{}'", path.display())]
  UnknownFormat { path: PathBuf },

  #[error("could not parse {}: {message}", path.display())]
  Parse { path: PathBuf, message: String },

  #[error("could not serialize configuration: {0}")]
  Serialize(String),
}

/// A supported configuration file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
  Json,
  Yaml,
}

impl ConfigFormat {
  /// Infer the format from the file extension (`.json`, `.yml`, `.yaml`).
  pub fn from_path(path: &Path) -> Option<Self> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
      "json" => Some(ConfigFormat::Json),
      "yml" | "yaml" => Some(ConfigFormat::Yaml),
      _ => None,
    }
  }

  pub fn require_from_path(path: &Path) -> Result<Self, ConfigError> {
    Self::from_path(path).ok_or_else(|| ConfigError::UnknownFormat {
      path: path.to_path_buf(),
    })
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      ConfigFormat::Json => "json",
      ConfigFormat::Yaml => "yaml",
    }
  }

  /// Serialize `value` using `indent` for each nesting level.
  ///
  /// YAML cannot be indented with tabs; a tab indent falls back to the
  /// default two spaces there.
  pub fn render(&self, value: &ConfigValue, indent: Indent) -> Result<String, ConfigError> {
    match self {
      ConfigFormat::Json => render_json(value, indent),
      ConfigFormat::Yaml => {
        let width = match indent.style {
          IndentStyle::Space if indent.count > 0 => indent.count,
          _ => Indent::DEFAULT.count,
        };
        yaml::render(value, width)
      }
    }
  }

  pub fn parse(&self, content: &str) -> Result<ConfigValue, String> {
    match self {
      ConfigFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
      ConfigFormat::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
    }
  }
}

impl std::fmt::Display for ConfigFormat {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

fn render_json(value: &ConfigValue, indent: Indent) -> Result<String, ConfigError> {
  if indent.count == 0 {
    return serde_json::to_string(value).map_err(|e| ConfigError::Serialize(e.to_string()));
  }

  let indent_str = indent.render();
  let mut out = Vec::new();
  let formatter = PrettyFormatter::with_indent(indent_str.as_bytes());
  let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
  value
    .serialize(&mut serializer)
    .map_err(|e| ConfigError::Serialize(e.to_string()))?;
  String::from_utf8(out).map_err(|e| ConfigError::Serialize(e.to_string()))
}

/// Parse `content` of the file at `path` in the given format.
pub fn read_config(path: &Path, format: ConfigFormat, content: &str) -> Result<ConfigValue, ConfigError> {
  format.parse(content).map_err(|message| ConfigError::Parse {
    path: path.to_path_buf(),
    message,
  })
}
