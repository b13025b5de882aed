//! Implementation of the `deployinit init` command.
//!
//! Prepares an application directory for deployment: ignore files, the
//! Dockerfile and program, the project file and `package.json`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use owo_colors::OwoColorize;

use deployinit_lib::planner::{ProjectInitializer, ProjectOptions};

use crate::output::{symbols, terminal_sink};

#[derive(Debug, Args)]
pub struct InitArgs {
  /// Application directory (default: current directory)
  #[arg(default_value = ".")]
  pub dir: PathBuf,

  /// Project name (default: the name in package.json)
  #[arg(long)]
  pub name: Option<String>,

  /// Project description
  #[arg(long)]
  pub description: Option<String>,

  /// File name of the infrastructure program
  #[arg(long, default_value = deployinit_lib::consts::DEFAULT_PROGRAM)]
  pub program: String,

  /// Install resource files from this directory instead of the built-in templates
  #[arg(long)]
  pub resources: Option<PathBuf>,

  /// Link resource files instead of copying them
  #[arg(long)]
  pub dev: bool,

  /// Only report what would be done
  #[arg(long)]
  pub simulate: bool,

  /// Execute every step without asking for confirmation
  #[arg(short, long)]
  pub yes: bool,
}

/// Execute the init command.
///
/// # Errors
///
/// Returns an error if the directory is not an application project or if any
/// planned step failed.
pub fn cmd_init(args: InitArgs) -> Result<()> {
  let mut project = ProjectInitializer::create_with_log(args.simulate, terminal_sink());

  let options = ProjectOptions {
    directory: args.dir.clone(),
    project_name: args.name,
    description: args.description,
    program: args.program,
    resource_dir: args.resources,
    development_mode: args.dev,
  };

  project
    .add_project(options)
    .with_context(|| format!("Failed to plan project initialization in {}", args.dir.display()))?;

  let results = super::run_plan(&mut project, args.yes || args.simulate)?;
  if results.is_empty() {
    return Ok(());
  }

  let message = if args.simulate {
    "Simulation complete, no files were changed"
  } else {
    "Project initialized!"
  };
  println!("{} {}", symbols::SUCCESS.green(), message.green().bold());
  println!("  {} Directory: {}", symbols::INFO.cyan(), args.dir.display());

  Ok(())
}
