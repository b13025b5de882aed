//! Key ordering for merged configuration objects.
//!
//! Re-running configuration with a small change should produce a small diff
//! of the written file, so keys the file already had keep their positions.

use std::cmp::Ordering;
use std::collections::HashMap;

use super::value::ConfigMap;

/// Comparator that keeps the relative order of keys already in `existing`
/// and sorts new keys alphabetically after them.
pub fn stable_merge_order(existing: &ConfigMap) -> impl Fn(&str, &str) -> Ordering + use<> {
  let positions: HashMap<String, usize> = existing
    .keys()
    .enumerate()
    .map(|(index, key)| (key.clone(), index))
    .collect();

  move |a: &str, b: &str| {
    let pos_a = positions.get(a).copied().unwrap_or(usize::MAX);
    let pos_b = positions.get(b).copied().unwrap_or(usize::MAX);
    pos_a.cmp(&pos_b).then_with(|| a.cmp(b))
  }
}

/// Rebuild `map` with its keys sorted by `compare`.
pub fn sort_object(map: ConfigMap, compare: impl Fn(&str, &str) -> Ordering) -> ConfigMap {
  let mut entries: Vec<_> = map.into_iter().collect();
  entries.sort_by(|(a, _), (b, _)| compare(a, b));
  entries.into_iter().collect()
}

/// Rebuild `map` with its keys in plain lexical order.
pub fn sort_object_alphabetically(map: ConfigMap) -> ConfigMap {
  sort_object(map, |a: &str, b: &str| a.cmp(b))
}
