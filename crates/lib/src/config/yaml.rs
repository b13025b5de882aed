//! Block-style YAML output with a configurable indentation width.
//!
//! Scalars are quoted by `serde_yaml`; only the block layout is done here.

use super::ConfigError;
use super::value::{ConfigMap, ConfigValue};

pub(super) fn render(value: &ConfigValue, width: usize) -> Result<String, ConfigError> {
  let width = width.max(2);
  let mut out = String::new();
  match value {
    ConfigValue::Object(map) if has_entries(map) => emit_map(map, 0, width, &mut out)?,
    ConfigValue::Array(items) if !items.is_empty() => emit_seq(items, 0, width, &mut out)?,
    other => {
      out.push_str(&scalar(other)?);
      out.push('\n');
    }
  }
  Ok(out)
}

fn has_entries(map: &ConfigMap) -> bool {
  map.values().any(|v| !v.is_undefined())
}

fn is_block(value: &ConfigValue) -> bool {
  match value {
    ConfigValue::Object(map) => has_entries(map),
    ConfigValue::Array(items) => !items.is_empty(),
    _ => false,
  }
}

fn emit_block(value: &ConfigValue, column: usize, width: usize, out: &mut String) -> Result<(), ConfigError> {
  match value {
    ConfigValue::Object(map) => emit_map(map, column, width, out),
    ConfigValue::Array(items) => emit_seq(items, column, width, out),
    _ => Ok(()),
  }
}

fn emit_map(map: &ConfigMap, column: usize, width: usize, out: &mut String) -> Result<(), ConfigError> {
  let pad = " ".repeat(column);
  for (key, value) in map.iter().filter(|(_, v)| !v.is_undefined()) {
    let key = string_scalar(key)?;
    if is_block(value) {
      out.push_str(&format!("{}{}:\n", pad, key));
      emit_block(value, column + width, width, out)?;
    } else {
      out.push_str(&format!("{}{}: {}\n", pad, key, scalar(value)?));
    }
  }
  Ok(())
}

fn emit_seq(items: &[ConfigValue], column: usize, width: usize, out: &mut String) -> Result<(), ConfigError> {
  let pad = " ".repeat(column);
  for item in items {
    if is_block(item) {
      // The nested block starts at `column + width`; its first line carries the dash.
      let mut nested = String::new();
      emit_block(item, column + width, width, &mut nested)?;
      out.push_str(&pad);
      out.push('-');
      out.push_str(&" ".repeat(width - 1));
      out.push_str(&nested[column + width..]);
    } else {
      out.push_str(&format!("{}- {}\n", pad, scalar(item)?));
    }
  }
  Ok(())
}

fn scalar(value: &ConfigValue) -> Result<String, ConfigError> {
  Ok(match value {
    ConfigValue::Undefined | ConfigValue::Null => "null".to_string(),
    ConfigValue::Bool(b) => b.to_string(),
    ConfigValue::Number(n) => n.to_string(),
    ConfigValue::String(s) => string_scalar(s)?,
    ConfigValue::Object(map) if !has_entries(map) => "{}".to_string(),
    ConfigValue::Array(items) if items.is_empty() => "[]".to_string(),
    // Block values are laid out by the callers; flow style is still valid YAML.
    other => serde_json::to_string(other).map_err(|e| ConfigError::Serialize(e.to_string()))?,
  })
}

fn string_scalar(s: &str) -> Result<String, ConfigError> {
  if s.chars().any(char::is_control) {
    return serde_json::to_string(s).map_err(|e| ConfigError::Serialize(e.to_string()));
  }
  let rendered = serde_yaml::to_string(s).map_err(|e| ConfigError::Serialize(e.to_string()))?;
  Ok(rendered.trim_end_matches('\n').to_string())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::{ConfigFormat, read_config};
  use crate::config_map;
  use std::path::Path;

  fn parse(content: &str) -> ConfigValue {
    read_config(Path::new("t.yaml"), ConfigFormat::Yaml, content).unwrap()
  }

  #[test]
  fn nested_maps_follow_width() {
    let value = ConfigValue::Object(config_map! { "config" => config_map! { "a" => config_map! { "b" => 1i64 } } });
    assert_eq!(render(&value, 2).unwrap(), "config:\n  a:\n    b: 1\n");
    assert_eq!(render(&value, 4).unwrap(), "config:\n    a:\n        b: 1\n");
  }

  #[test]
  fn sequences_of_maps_stay_aligned() {
    let value = ConfigValue::Object(config_map! {
      "items" => vec![
        ConfigValue::Object(config_map! { "x" => 1i64, "y" => 2i64 }),
        ConfigValue::from("plain"),
      ],
    });
    let out = render(&value, 4).unwrap();
    assert_eq!(out, "items:\n    -   x: 1\n        y: 2\n    - plain\n");
    assert_eq!(parse(&out), value);
  }

  #[test]
  fn ambiguous_strings_are_quoted() {
    let value = ConfigValue::Object(config_map! {
      "flag" => "true",
      "number" => "10",
      "empty" => "",
      "multi" => "line one\nline two",
    });
    let out = render(&value, 2).unwrap();
    assert_eq!(parse(&out), value);
  }

  #[test]
  fn empty_containers_and_scalars() {
    let value = ConfigValue::Object(config_map! {
      "obj" => config_map! {},
      "list" => Vec::<ConfigValue>::new(),
      "nothing" => ConfigValue::Null,
      "gone" => ConfigValue::Undefined,
    });
    assert_eq!(render(&value, 2).unwrap(), "obj: {}\nlist: []\nnothing: null\n");
    assert_eq!(render(&ConfigValue::object(), 2).unwrap(), "{}\n");
  }
}
