//! Preparing an application directory for infrastructure deployment.

use std::path::{Path, PathBuf};
use std::rc::Rc;

use tracing::info;

use super::file::{ConfigFileOptions, FileInitializer, TextFileOptions};
use super::json_edit::SaveOptions;
use super::program::CommandPlanner;
use super::templates;
use crate::config::{ConfigFormat, ConfigValue, Indent, read_config};
use crate::config_map;
use crate::consts::{
  APP_IGNORE_ENTRIES, APP_NAME, DEFAULT_PROGRAM, DEFAULT_SDK_PACKAGE, DEFAULT_SDK_VERSION, DOCKER_IGNORE_ENTRIES,
  PROJECT_FILE, PROJECT_MARKER_DIR, PROJECT_RUNTIME,
};
use crate::error::InitError;
use crate::initializer::{CoreInitializer, Initializer};
use crate::util::log::{LogSink, tracing_sink};

/// Options for [`ProjectInitializer::add_project`].
#[derive(Debug, Clone)]
pub struct ProjectOptions {
  pub directory: PathBuf,
  /// Defaults to the `name` in `package.json`, then to the directory name.
  pub project_name: Option<String>,
  pub description: Option<String>,
  /// File name of the infrastructure program inside the project.
  pub program: String,
  /// Install resource files from here instead of the embedded templates.
  pub resource_dir: Option<PathBuf>,
  /// Link resource files instead of copying them.
  pub development_mode: bool,
}

impl ProjectOptions {
  pub fn new(directory: impl Into<PathBuf>) -> Self {
    Self {
      directory: directory.into(),
      project_name: None,
      description: None,
      program: DEFAULT_PROGRAM.to_string(),
      resource_dir: None,
      development_mode: false,
    }
  }
}

pub fn default_description() -> String {
  format!(
    "Pulumi infrastructure deployment project generated by {} (Version {})",
    APP_NAME,
    env!("CARGO_PKG_VERSION")
  )
}

/// Plans every file and command change that turns an application into a
/// deployable project, over one shared plan.
pub struct ProjectInitializer {
  files: FileInitializer,
  commands: CommandPlanner,
}

impl ProjectInitializer {
  pub fn new(files: FileInitializer, commands: CommandPlanner) -> Self {
    Self { files, commands }
  }

  pub fn create(simulation: bool) -> Self {
    Self::create_with_log(simulation, tracing_sink())
  }

  /// Simulated file operations and commands are reported to `log`.
  pub fn create_with_log(simulation: bool, log: LogSink) -> Self {
    Self::new(
      FileInitializer::create_with_log(simulation, Rc::clone(&log)),
      CommandPlanner::new(simulation).with_log(log),
    )
  }

  pub fn files(&mut self) -> &mut FileInitializer {
    &mut self.files
  }

  pub fn add_meteor_ignore(&mut self, dir: &Path, extra: &[&str]) -> Result<&mut Self, InitError> {
    let entries: Vec<&str> = APP_IGNORE_ENTRIES.iter().chain(extra).copied().collect();
    self.files.add_ignore_entries(&entries, dir.join(".meteorignore"))?;
    Ok(self)
  }

  pub fn add_docker_ignore(&mut self, dir: &Path, extra: &[&str]) -> Result<&mut Self, InitError> {
    let entries: Vec<&str> = DOCKER_IGNORE_ENTRIES.iter().chain(extra).copied().collect();
    self.files.add_ignore_entries(&entries, dir.join(".dockerignore"))?;
    Ok(self)
  }

  pub fn add_pulumi_yaml(&mut self, dir: &Path, name: &str, description: &str) -> Result<&mut Self, InitError> {
    let project = ConfigValue::Object(config_map! {
      "name" => name,
      "description" => description,
      "runtime" => PROJECT_RUNTIME,
    });
    self.files.add_config_file(
      &project,
      ConfigFileOptions::new(dir.join(PROJECT_FILE)).with_indent(Indent::DEFAULT),
    )?;
    Ok(self)
  }

  /// Install the Dockerfile and the program, named `program` in `dir`.
  ///
  /// Without a resource directory the embedded templates are written.
  pub fn add_resource_files(
    &mut self,
    dir: &Path,
    program: &str,
    resource_dir: Option<&Path>,
    as_symlink: bool,
  ) -> Result<&mut Self, InitError> {
    let files = [
      (templates::DOCKERFILE_NAME, templates::DOCKERFILE_NAME, templates::DOCKERFILE),
      (templates::PROGRAM_NAME, program, templates::PROGRAM),
    ];

    for (source_name, target_name, template) in files {
      let dest = dir.join(target_name);
      match resource_dir {
        Some(resources) => {
          self.files.install_file(resources.join(source_name), &dest, as_symlink)?;
        }
        None => {
          self
            .files
            .add_text_file(template, TextFileOptions::new(&dest, format!("Add {}", target_name)))?;
        }
      }
    }
    Ok(self)
  }

  /// Link `package_root` into `dir/node_modules/<package_name>`.
  pub fn link_package(&mut self, dir: &Path, package_name: &str, package_root: &Path) -> Result<&mut Self, InitError> {
    self
      .files
      .add_directory_link(package_root, dir.join("node_modules").join(package_name))?;
    Ok(self)
  }

  /// Point `main` at the program and add the SDK as a dev dependency.
  pub fn init_package_json(
    &mut self,
    dir: &Path,
    program: &str,
    sdk: &str,
    sdk_version: &str,
  ) -> Result<&mut Self, InitError> {
    let mut editor = self.files.edit_json_file(
      dir.join("package.json"),
      "Add additional npm dependencies and declare the pulumi program runtime",
    )?;

    let conflicting_main = match editor.get("main") {
      ConfigValue::String(main) if !main.is_empty() && main != program => Some(main.clone()),
      _ => None,
    };

    editor.set("main", program);
    editor.set(&format!("devDependencies.{}", sdk), sdk_version);
    editor.save(SaveOptions {
      can_skip: true,
      challenge: conflicting_main.is_some(),
      warning: conflicting_main.map(|main| format!("This will change the 'main' entry from {} to {}", main, program)),
    });
    Ok(self)
  }

  pub fn add_npm_install(&mut self, dir: &Path) -> &mut Self {
    let step = self.commands.npm_install(dir);
    self.files.core_mut().add_step(step);
    self
  }

  pub fn add_npm_link(&mut self, dir: &Path, package: Option<&str>) -> &mut Self {
    let step = self.commands.npm_link(dir, package);
    self.files.core_mut().add_step(step);
    self
  }

  fn default_project_name(&self, dir: &Path) -> Result<String, InitError> {
    let package_json = dir.join("package.json");
    let fs = self.files.filesystem();
    if fs.exists(&package_json) {
      let content = fs.read_text_file(&package_json)?;
      let package = read_config(&package_json, ConfigFormat::Json, &content)?;
      if let Some(name) = package.get_path("name").as_str() {
        return Ok(name.to_string());
      }
    }

    let resolved = fs.realpath(dir).unwrap_or_else(|_| dir.to_path_buf());
    Ok(
      resolved
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| APP_NAME.to_string()),
    )
  }

  /// Plan everything a new project needs.
  ///
  /// Fails before planning anything if the directory is not an application
  /// project.
  pub fn add_project(&mut self, options: ProjectOptions) -> Result<&mut Self, InitError> {
    let dir = options.directory.as_path();
    if !self.files.filesystem().exists(&dir.join(PROJECT_MARKER_DIR)) {
      return Err(InitError::NotAProject {
        path: dir.to_path_buf(),
        marker: PROJECT_MARKER_DIR,
      });
    }

    let name = match options.project_name {
      Some(name) => name,
      None => self.default_project_name(dir)?,
    };
    let description = options.description.unwrap_or_else(default_description);
    let program = options.program.as_str();
    info!(project = %name, dir = %dir.display(), "planning project");

    self
      .add_meteor_ignore(dir, &[program])?
      .add_docker_ignore(dir, &[program])?
      .add_resource_files(dir, program, options.resource_dir.as_deref(), options.development_mode)?
      .add_pulumi_yaml(dir, &name, &description)?
      .init_package_json(dir, program, DEFAULT_SDK_PACKAGE, DEFAULT_SDK_VERSION)
  }
}

impl Initializer for ProjectInitializer {
  fn core(&self) -> &CoreInitializer {
    self.files.core()
  }

  fn core_mut(&mut self) -> &mut CoreInitializer {
    self.files.core_mut()
  }
}
