//! Resource files installed into a project when no resource directory is given.

/// Container build for the application bundle.
pub const DOCKERFILE: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/../../resources/Dockerfile"));

/// Entry point of the infrastructure program.
pub const PROGRAM: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/../../resources/pulumi.js"));

/// File names inside a resource directory.
pub const DOCKERFILE_NAME: &str = "Dockerfile";
pub const PROGRAM_NAME: &str = "index.js";
