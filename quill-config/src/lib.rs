//! Shared configuration loader for the quill toolchain.
//!
//! `defaults/quill.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`QuillConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};

pub use config::ConfigError;

const DEFAULT_TOML: &str = include_str!("../defaults/quill.default.toml");

/// Top-level configuration consumed by quill applications.
#[derive(Debug, Clone, Deserialize)]
pub struct QuillConfig {
    pub output: OutputConfig,
    pub compile: CompileConfig,
    #[serde(default)]
    pub projects: HashMap<String, ProjectConfig>,
}

impl QuillConfig {
    pub fn project(&self, name: &str) -> Result<&ProjectConfig, ConfigError> {
        self.projects
            .get(name)
            .ok_or_else(|| ConfigError::Message(format!("no project named '{}'", name)))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub format: String,
    pub directory: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CompileConfig {
    pub self_check: bool,
}

/// One manuscript the user builds regularly.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProjectConfig {
    pub input: PathBuf,
    /// Directory `input` is relative to. A leading `$` names an environment variable.
    pub root: Option<String>,
    pub chapter: Option<String>,
    pub format: Option<String>,
}

impl ProjectConfig {
    /// The project root with `$VAR` expanded.
    pub fn resolved_root(&self) -> Result<Option<PathBuf>, ConfigError> {
        let Some(root) = &self.root else {
            return Ok(None);
        };
        match root.strip_prefix('$') {
            Some(var) => env::var(var).map(|value| Some(PathBuf::from(value))).map_err(|_| {
                ConfigError::Message(format!("environment variable '{}' is not set", var))
            }),
            None => Ok(Some(PathBuf::from(root))),
        }
    }

    /// The manuscript path, joined onto the resolved root when there is one.
    pub fn input_path(&self) -> Result<PathBuf, ConfigError> {
        Ok(match self.resolved_root()? {
            Some(root) => root.join(&self.input),
            None => self.input.clone(),
        })
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<QuillConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<QuillConfig, ConfigError> {
    Loader::new().build()
}
