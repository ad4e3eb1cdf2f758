//! Configuration file handling
//!
//! Looks for `scaffold.toml` in the current directory or any parent
//! directory. Values given on the command line win over the file; relative
//! paths in the file are resolved against the file's directory.

use scaffold_codegen::{GeneratorConfig, OverwritePolicy};
use scaffold_ir::DEFAULT_SCHEMA_FILE;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::args::{MakeArgs, SchemaArgs};

/// Name of the configuration file
pub const CONFIG_FILE: &str = "scaffold.toml";

// ============================================================================
// FileConfig
// ============================================================================

/// Contents of `scaffold.toml`; every key is optional
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    /// Schema description file
    pub schema: Option<PathBuf>,

    /// Root of the Laravel project
    pub output_dir: Option<PathBuf>,

    pub create_migrations: Option<bool>,

    pub create_models: Option<bool>,

    pub model_namespace: Option<String>,
}

impl FileConfig {
    /// Parse a configuration from TOML text
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Make relative paths relative to `base`
    fn rebase(mut self, base: &Path) -> Self {
        self.schema = self.schema.map(|p| join_relative(base, p));
        self.output_dir = self.output_dir.map(|p| join_relative(base, p));
        self
    }
}

fn join_relative(base: &Path, path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        base.join(path)
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An explicitly requested file does not exist
    #[error("Configuration file not found: {0}")]
    NotFound(PathBuf),

    /// I/O error reading the file
    #[error("Failed to read {path}: {message}")]
    Io { path: PathBuf, message: String },

    /// Parse error in the TOML file
    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

// ============================================================================
// Loading
// ============================================================================

/// Load the configuration file.
///
/// An explicit path must exist; otherwise `scaffold.toml` is searched for
/// upwards from `start`, and a missing file yields the default (empty)
/// configuration.
pub fn load(explicit: Option<&Path>, start: &Path) -> Result<FileConfig, ConfigError> {
    let path = match explicit {
        Some(path) if path.exists() => path.to_path_buf(),
        Some(path) => return Err(ConfigError::NotFound(path.to_path_buf())),
        None => match find_config_file(start) {
            Some(path) => path,
            None => return Ok(FileConfig::default()),
        },
    };

    let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::Io {
        path: path.clone(),
        message: e.to_string(),
    })?;

    tracing::debug!("Using configuration {}", path.display());

    let base = path.parent().unwrap_or_else(|| Path::new(""));
    Ok(FileConfig::from_toml(&content)?.rebase(base))
}

/// Find `scaffold.toml` by searching up the directory tree.
pub fn find_config_file(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE);
        if config_path.is_file() {
            return Some(config_path);
        }

        if !current.pop() {
            return None;
        }
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Schema path: command line, then configuration file, then `scaffold.json`.
pub fn schema_path(args: &SchemaArgs, file: &FileConfig) -> PathBuf {
    args.schema
        .clone()
        .or_else(|| file.schema.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SCHEMA_FILE))
}

/// Build the generator configuration for `scaffold make`.
pub fn generator_config(args: &MakeArgs, file: &FileConfig) -> GeneratorConfig {
    let mut config = GeneratorConfig::new();

    if let Some(dir) = args.out.clone().or_else(|| file.output_dir.clone()) {
        config = config.with_output_dir(dir);
    }

    if args.no_migrations || file.create_migrations == Some(false) {
        config = config.without_migrations();
    }

    if args.no_models || file.create_models == Some(false) {
        config = config.without_models();
    }

    if let Some(namespace) = args
        .model_namespace
        .as_deref()
        .or(file.model_namespace.as_deref())
    {
        config = config.with_model_namespace(namespace);
    }

    if args.force {
        config = config.with_overwrite(OverwritePolicy::Always);
    }

    config
}

// ============================================================================
// Tests
// ============================================================================
