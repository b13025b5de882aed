//! The configuration tree shared by the merge algorithm and the file formats.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde::ser::{SerializeMap, SerializeSeq};
use serde_json::Number;

/// String-keyed map that keeps insertion order, so re-serialized files keep
/// the user's key order.
pub type ConfigMap = IndexMap<String, ConfigValue>;

/// A JSON-like value as read from, or written to, a configuration file.
///
/// `Undefined` stands for a value that is absent. It never appears in parsed
/// input; callers produce it to mark keys that should be dropped. On output it
/// is omitted from objects and written as `null` inside arrays.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ConfigValue {
  #[default]
  Undefined,
  Null,
  Bool(bool),
  Number(Number),
  String(String),
  Array(Vec<ConfigValue>),
  Object(ConfigMap),
}

impl ConfigValue {
  pub fn object() -> Self {
    ConfigValue::Object(ConfigMap::new())
  }

  pub fn is_undefined(&self) -> bool {
    matches!(self, ConfigValue::Undefined)
  }

  pub fn as_object(&self) -> Option<&ConfigMap> {
    match self {
      ConfigValue::Object(map) => Some(map),
      _ => None,
    }
  }

  pub fn as_str(&self) -> Option<&str> {
    match self {
      ConfigValue::String(s) => Some(s),
      _ => None,
    }
  }

  /// Consume the value, keeping it only if it is an object.
  pub fn into_object(self) -> Option<ConfigMap> {
    match self {
      ConfigValue::Object(map) => Some(map),
      _ => None,
    }
  }

  /// Look up a dot-separated path such as `devDependencies.left-pad`.
  ///
  /// Returns `Undefined` when any segment is missing or not an object.
  pub fn get_path(&self, path: &str) -> &ConfigValue {
    static UNDEFINED: ConfigValue = ConfigValue::Undefined;

    let mut current = self;
    for segment in path.split('.') {
      match current {
        ConfigValue::Object(map) => match map.get(segment) {
          Some(value) => current = value,
          None => return &UNDEFINED,
        },
        _ => return &UNDEFINED,
      }
    }
    current
  }

  /// Set a dot-separated path, creating (or replacing non-object) intermediate
  /// segments with empty objects.
  pub fn set_path(&mut self, path: &str, value: ConfigValue) {
    if !matches!(self, ConfigValue::Object(_)) {
      *self = ConfigValue::object();
    }
    if let ConfigValue::Object(map) = self {
      let segments: Vec<&str> = path.split('.').collect();
      set_in(map, &segments, value);
    }
  }
}

fn set_in(map: &mut ConfigMap, segments: &[&str], value: ConfigValue) {
  let Some((first, rest)) = segments.split_first() else {
    return;
  };
  if rest.is_empty() {
    map.insert(first.to_string(), value);
    return;
  }

  let child = map.entry(first.to_string()).or_insert_with(ConfigValue::object);
  if !matches!(child, ConfigValue::Object(_)) {
    *child = ConfigValue::object();
  }
  if let ConfigValue::Object(child_map) = child {
    set_in(child_map, rest, value);
  }
}

impl From<serde_json::Value> for ConfigValue {
  fn from(value: serde_json::Value) -> Self {
    match value {
      serde_json::Value::Null => ConfigValue::Null,
      serde_json::Value::Bool(b) => ConfigValue::Bool(b),
      serde_json::Value::Number(n) => ConfigValue::Number(n),
      serde_json::Value::String(s) => ConfigValue::String(s),
      serde_json::Value::Array(items) => ConfigValue::Array(items.into_iter().map(ConfigValue::from).collect()),
      serde_json::Value::Object(map) => {
        ConfigValue::Object(map.into_iter().map(|(k, v)| (k, ConfigValue::from(v))).collect())
      }
    }
  }
}

impl From<&str> for ConfigValue {
  fn from(value: &str) -> Self {
    ConfigValue::String(value.to_string())
  }
}

impl From<String> for ConfigValue {
  fn from(value: String) -> Self {
    ConfigValue::String(value)
  }
}

impl From<bool> for ConfigValue {
  fn from(value: bool) -> Self {
    ConfigValue::Bool(value)
  }
}

impl From<i64> for ConfigValue {
  fn from(value: i64) -> Self {
    ConfigValue::Number(value.into())
  }
}

impl From<u64> for ConfigValue {
  fn from(value: u64) -> Self {
    ConfigValue::Number(value.into())
  }
}

impl From<f64> for ConfigValue {
  fn from(value: f64) -> Self {
    Number::from_f64(value).map(ConfigValue::Number).unwrap_or(ConfigValue::Null)
  }
}

impl From<ConfigMap> for ConfigValue {
  fn from(value: ConfigMap) -> Self {
    ConfigValue::Object(value)
  }
}

impl From<Vec<ConfigValue>> for ConfigValue {
  fn from(value: Vec<ConfigValue>) -> Self {
    ConfigValue::Array(value)
  }
}

impl Serialize for ConfigValue {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    match self {
      ConfigValue::Undefined | ConfigValue::Null => serializer.serialize_unit(),
      ConfigValue::Bool(b) => serializer.serialize_bool(*b),
      ConfigValue::Number(n) => n.serialize(serializer),
      ConfigValue::String(s) => serializer.serialize_str(s),
      ConfigValue::Array(items) => {
        let mut seq = serializer.serialize_seq(Some(items.len()))?;
        for item in items {
          seq.serialize_element(item)?;
        }
        seq.end()
      }
      ConfigValue::Object(map) => {
        let defined = map.values().filter(|v| !v.is_undefined()).count();
        let mut out = serializer.serialize_map(Some(defined))?;
        for (key, value) in map {
          if !value.is_undefined() {
            out.serialize_entry(key, value)?;
          }
        }
        out.end()
      }
    }
  }
}

impl<'de> Deserialize<'de> for ConfigValue {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    serde_json::Value::deserialize(deserializer).map(ConfigValue::from)
  }
}

/// Build a [`ConfigMap`] from `key => value` pairs.
#[macro_export]
macro_rules! config_map {
  () => { $crate::config::ConfigMap::new() };
  ($($key:expr => $value:expr),+ $(,)?) => {{
    let mut map = $crate::config::ConfigMap::new();
    $(map.insert(($key).to_string(), $crate::config::ConfigValue::from($value));)+
    map
  }};
}
