//! Shared utilities.
//!
//! Hashing, path humanizing, name de-duplication and log sinks.

pub mod hash;
pub mod log;
pub mod names;
pub mod path;
