//! deployinit-lib: planning and executing project initialization steps.
//!
//! - `initializer`: the step model, the core plan and its execution events
//! - `planner`: idempotent planners for files, configs, links and commands
//! - `config`: configuration trees, formats and the safe-merge helpers
//! - `fs`: the filesystem capability with real and simulated backends

pub mod config;
pub mod consts;
pub mod error;
pub mod events;
pub mod fs;
pub mod initializer;
pub mod planner;
pub mod util;

pub use error::InitError;
