//! Batched yes/no confirmation.

use std::collections::HashMap;
use std::io;

use thiserror::Error;

/// A single yes/no question shown before executing a step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
  /// Unique key of the answer in [`Answers`].
  pub name: String,
  pub message: String,
  pub default: bool,
}

/// Answers keyed by [`Question::name`].
pub type Answers = HashMap<String, bool>;

#[derive(Debug, Error)]
pub enum PromptError {
  #[error("cannot prompt for confirmation in non-interactive mode")]
  NotInteractive,

  #[error("prompt failed: {0}")]
  Io(#[from] io::Error),
}

/// Asks a batch of questions at once and returns the answers.
///
/// Questions missing from the returned map fall back to their default.
pub trait Prompter {
  fn prompt(&self, questions: &[Question]) -> Result<Answers, PromptError>;
}

/// Answers every question with its default, without any interaction.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultAnswers;

impl Prompter for DefaultAnswers {
  fn prompt(&self, questions: &[Question]) -> Result<Answers, PromptError> {
    Ok(questions.iter().map(|q| (q.name.clone(), q.default)).collect())
  }
}

/// Pre-recorded answers. Questions without an entry take their default.
impl Prompter for Answers {
  fn prompt(&self, questions: &[Question]) -> Result<Answers, PromptError> {
    Ok(
      questions
        .iter()
        .map(|q| (q.name.clone(), self.get(&q.name).copied().unwrap_or(q.default)))
        .collect(),
    )
  }
}
