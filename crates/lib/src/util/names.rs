use std::collections::HashMap;

/// Hands out distinct names by suffixing a per-name counter.
///
/// `create("Create File")` yields `"Create File 0"`, then `"Create File 1"`.
#[derive(Debug, Default)]
pub struct DistinctNames {
  counts: HashMap<String, usize>,
}

impl DistinctNames {
  pub fn new() -> Self {
    Self::default()
  }

  /// Returns the next unused index for `name`.
  pub fn use_index(&mut self, name: &str) -> usize {
    let count = self.counts.entry(name.to_string()).or_insert(0);
    let index = *count;
    *count += 1;
    index
  }

  pub fn create(&mut self, name: &str) -> String {
    let index = self.use_index(name);
    format!("{} {}", name, index)
  }
}
