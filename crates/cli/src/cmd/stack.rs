//! Implementation of the `deployinit stack` command.
//!
//! Merges `--set` values into the stack configuration file without
//! discarding keys already in it.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, bail};
use clap::Args;
use indexmap::IndexMap;
use owo_colors::OwoColorize;

use deployinit_lib::config::{ConfigFormat, ConfigMap, ConfigValue, read_config};
use deployinit_lib::consts::{PROJECT_FILE, stack_file_name};
use deployinit_lib::planner::{StackConfigurator, StackOptions};

use crate::output::{symbols, terminal_sink};

#[derive(Debug, Args)]
pub struct StackArgs {
  /// Stack name, e.g. `dev`
  pub name: String,

  /// Project directory (default: current directory)
  #[arg(default_value = ".")]
  pub dir: PathBuf,

  /// Project name used as key prefix (default: the name in the project file)
  #[arg(long)]
  pub project: Option<String>,

  /// Configuration value as KEY=VALUE; may be repeated
  #[arg(long = "set", value_name = "KEY=VALUE")]
  pub values: Vec<String>,

  /// Only report what would be done
  #[arg(long)]
  pub simulate: bool,

  /// Execute every step without asking for confirmation
  #[arg(short, long)]
  pub yes: bool,
}

/// Parse `KEY=VALUE`. JSON scalars (numbers, booleans) keep their type.
pub fn parse_assignment(assignment: &str) -> Result<(String, ConfigValue)> {
  let (key, raw) = assignment
    .split_once('=')
    .ok_or_else(|| anyhow!("Invalid value '{}', expected KEY=VALUE", assignment))?;

  let key = key.trim();
  if key.is_empty() {
    bail!("Invalid value '{}', the key is empty", assignment);
  }

  let value = match serde_json::from_str::<serde_json::Value>(raw) {
    Ok(json) if !json.is_object() && !json.is_array() && !json.is_null() => ConfigValue::from(json),
    _ => ConfigValue::from(raw),
  };
  Ok((key.to_string(), value))
}

fn project_name(dir: &Path) -> Result<String> {
  let path = dir.join(PROJECT_FILE);
  let content =
    std::fs::read_to_string(&path).with_context(|| format!("Failed to read project file: {}", path.display()))?;
  let project = read_config(&path, ConfigFormat::Yaml, &content)?;
  project
    .get_path("name")
    .as_str()
    .map(str::to_string)
    .ok_or_else(|| anyhow!("Project file {} has no name, use --project", path.display()))
}

/// Execute the stack command.
pub fn cmd_stack(args: StackArgs) -> Result<()> {
  let project = match args.project {
    Some(project) => project,
    None => project_name(&args.dir)?,
  };

  let mut values = ConfigMap::new();
  for assignment in &args.values {
    let (key, value) = parse_assignment(assignment)?;
    values.insert(key, value);
  }

  let mut stacks = StackConfigurator::create_with_log(args.simulate, terminal_sink());
  stacks
    .add_stack(StackOptions {
      stack_name: args.name.clone(),
      config: IndexMap::from([(project, values)]),
      directory: args.dir.clone(),
    })
    .with_context(|| format!("Failed to plan configuration of stack '{}'", args.name))?;

  let results = super::run_plan(&mut stacks, args.yes || args.simulate)?;
  if results.is_empty() {
    return Ok(());
  }

  println!(
    "{} Stack {} configured in {}",
    symbols::SUCCESS.green(),
    args.name.bold(),
    args.dir.join(stack_file_name(&args.name)).display()
  );
  Ok(())
}
