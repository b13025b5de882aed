//! Destructive-change detection for configuration merges.
//!
//! Before a merged configuration is written over an existing file, the
//! planner asks whether the new tree still carries everything the old tree
//! said. Additions are always fine; removals, reorderings, and changed values
//! are not.

use serde_json::Number;

use super::value::ConfigValue;

/// Returns `true` if replacing `original` with `proposed` loses information.
///
/// - Arrays must have the same length and be element-wise non-destructive;
///   order matters.
/// - An array on exactly one side is a type change and therefore destructive.
/// - Objects are destructive if any defined key of `original` is missing in
///   `proposed` or destructive against the value found there. Keys that only
///   `proposed` has are additive. Keys whose original value is `Undefined`
///   are ignored.
/// - Anything else must be strictly equal, including its type.
///
/// The `Undefined`-key exemption is applied to object members only. Array
/// elements are compared as-is, so `[Undefined]` against `[]` or `[Null]` is
/// destructive.
pub fn is_destructive(original: &ConfigValue, proposed: &ConfigValue) -> bool {
  match (original, proposed) {
    (ConfigValue::Array(before), ConfigValue::Array(after)) => {
      before.len() != after.len() || before.iter().zip(after).any(|(a, b)| is_destructive(a, b))
    }
    (ConfigValue::Array(_), _) | (_, ConfigValue::Array(_)) => true,
    (ConfigValue::Object(before), ConfigValue::Object(after)) => before.iter().any(|(key, value)| {
      !value.is_undefined()
        && match after.get(key) {
          Some(next) => is_destructive(value, next),
          None => true,
        }
    }),
    _ => !strictly_equal(original, proposed),
  }
}

fn strictly_equal(a: &ConfigValue, b: &ConfigValue) -> bool {
  match (a, b) {
    (ConfigValue::Undefined, ConfigValue::Undefined) | (ConfigValue::Null, ConfigValue::Null) => true,
    (ConfigValue::Bool(a), ConfigValue::Bool(b)) => a == b,
    (ConfigValue::Number(a), ConfigValue::Number(b)) => numbers_equal(a, b),
    (ConfigValue::String(a), ConfigValue::String(b)) => a == b,
    _ => false,
  }
}

/// Numeric equality across integer and float representations, so `1` and
/// `1.0` read from different formats compare equal.
fn numbers_equal(a: &Number, b: &Number) -> bool {
  if let (Some(a), Some(b)) = (a.as_i64(), b.as_i64()) {
    return a == b;
  }
  if let (Some(a), Some(b)) = (a.as_u64(), b.as_u64()) {
    return a == b;
  }
  match (a.as_f64(), b.as_f64()) {
    (Some(a), Some(b)) => a == b,
    _ => false,
  }
}
