//! Indentation style of configuration files.

use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndentStyle {
  Space,
  Tab,
}

impl IndentStyle {
  fn as_char(self) -> char {
    match self {
      IndentStyle::Space => ' ',
      IndentStyle::Tab => '\t',
    }
  }
}

/// One indentation level, e.g. two spaces or one tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Indent {
  pub style: IndentStyle,
  pub count: usize,
}

impl Default for Indent {
  fn default() -> Self {
    Self::DEFAULT
  }
}

impl Indent {
  pub const DEFAULT: Indent = Indent::spaces(2);

  pub const fn spaces(count: usize) -> Self {
    Self {
      style: IndentStyle::Space,
      count,
    }
  }

  pub const fn tabs(count: usize) -> Self {
    Self {
      style: IndentStyle::Tab,
      count,
    }
  }

  pub fn render(&self) -> String {
    std::iter::repeat_n(self.style.as_char(), self.count).collect()
  }

  /// Guess the indentation used by `content`.
  ///
  /// Looks at how much indentation grows between consecutive non-blank lines
  /// and picks the most frequent step; ties go to the smaller step. Returns
  /// `None` when no line is indented deeper than the one before it.
  pub fn detect(content: &str) -> Option<Indent> {
    let mut steps: HashMap<(IndentStyle, usize), usize> = HashMap::new();
    let mut previous = 0usize;

    for line in content.lines() {
      if line.trim().is_empty() {
        continue;
      }

      let tabs = line.chars().take_while(|c| *c == '\t').count();
      let spaces = line.chars().take_while(|c| *c == ' ').count();
      let (style, depth) = if tabs > 0 {
        (IndentStyle::Tab, tabs)
      } else {
        (IndentStyle::Space, spaces)
      };

      if depth > previous {
        *steps.entry((style, depth - previous)).or_insert(0) += 1;
      }
      previous = depth;
    }

    steps
      .into_iter()
      .max_by(|(a_key, a_used), (b_key, b_used)| {
        a_used
          .cmp(b_used)
          .then_with(|| b_key.1.cmp(&a_key.1))
          .then_with(|| (a_key.0 == IndentStyle::Space).cmp(&(b_key.0 == IndentStyle::Space)))
      })
      .map(|((style, count), _)| Indent { style, count })
  }
}
