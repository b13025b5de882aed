mod cmd;
mod output;
mod prompts;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use cmd::{InitArgs, StackArgs, cmd_init, cmd_stack};

/// deployinit - prepare applications and stacks for infrastructure deployment
#[derive(Parser)]
#[command(name = "deployinit")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Prepare an application directory for deployment
  Init(InitArgs),

  /// Add or update values in a stack configuration file
  Stack(StackArgs),
}

fn main() -> Result<()> {
  let cli = Cli::parse();

  let filter = if cli.verbose {
    EnvFilter::new("debug")
  } else {
    EnvFilter::from_default_env()
  };
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  match cli.command {
    Commands::Init(args) => cmd_init(args),
    Commands::Stack(args) => cmd_stack(args),
  }
}
