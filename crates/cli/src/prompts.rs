use std::io::{self, IsTerminal, Write};

use deployinit_lib::initializer::{Answers, PromptError, Prompter, Question};

/// Asks each question on the terminal, one line at a time.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
  fn prompt(&self, questions: &[Question]) -> Result<Answers, PromptError> {
    if !io::stdin().is_terminal() || !io::stderr().is_terminal() {
      return Err(PromptError::NotInteractive);
    }

    let mut answers = Answers::new();
    for question in questions {
      let hint = if question.default { "[Y/n]" } else { "[y/N]" };
      write!(io::stderr(), "{} {} ", question.message.trim_end(), hint)?;
      io::stderr().flush()?;

      let mut input = String::new();
      io::stdin().read_line(&mut input)?;
      answers.insert(question.name.clone(), parse_answer(&input, question.default));
    }
    Ok(answers)
  }
}

fn parse_answer(input: &str, default: bool) -> bool {
  match input.trim().to_ascii_lowercase().as_str() {
    "y" | "yes" => true,
    "n" | "no" => false,
    _ => default,
  }
}
