//! Planners that turn desired outcomes into steps.

mod file;
mod json_edit;
mod program;
mod project;
mod stack;
mod templates;

pub use file::{ConfigFileOptions, FileInitializer, TextFileOptions};
pub use json_edit::{JsonEditor, SaveOptions};
pub use program::{CommandPlanner, ProgramInitializer};
pub use project::{ProjectInitializer, ProjectOptions};
pub use stack::{StackConfigurator, StackOptions, pulumi_stack_config};
