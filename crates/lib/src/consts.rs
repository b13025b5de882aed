//! Shared constants.

pub const APP_NAME: &str = "deployinit";

/// Warning attached to steps that replace the whole content of an existing file.
pub const OVERWRITE_FILE_WARNING: &str = "This will overwrite all contents of the existing file";

/// Warning attached to config merges that would drop or change values the user already set.
pub const OVERWRITE_CONFIG_WARNING: &str = "This will overwrite your existing configuration";

pub const DEFAULT_CONFIG_DESCRIPTION: &str = "Write configuration";

/// File name of the infrastructure program installed into a project.
pub const DEFAULT_PROGRAM: &str = "pulumi.js";

pub const DEFAULT_SDK_PACKAGE: &str = "@pulumi/pulumi";
pub const DEFAULT_SDK_VERSION: &str = "^2.0.0";

/// Runtime declared in the generated project file.
pub const PROJECT_RUNTIME: &str = "nodejs";

pub const PROJECT_FILE: &str = "Pulumi.yaml";

/// Marker directory that identifies an application project.
pub const PROJECT_MARKER_DIR: &str = ".meteor";

/// Entries the application bundler must never pick up.
pub const APP_IGNORE_ENTRIES: &[&str] = &["Pulumi.yaml", "Pulumi.*.yaml"];

/// Entries kept out of the container build context.
pub const DOCKER_IGNORE_ENTRIES: &[&str] = &[
  "Dockerfile",
  ".dockerignore",
  ".meteor/local",
  "Pulumi.yaml",
  "Pulumi.*.yaml",
  "Pulumi.yml",
  "Pulumi.*.yml",
];

/// Returns the stack configuration file name for `stack_name`.
pub fn stack_file_name(stack_name: &str) -> String {
  format!("Pulumi.{}.yaml", stack_name)
}
