//! Configuration loading
//!
//! `defaults/astview.default.toml` is embedded into the binary so that the documented defaults
//! and runtime behavior stay in sync. User files and command line overrides are layered on top
//! via [`Loader`] before deserializing into [`AstviewConfig`].

use crate::host::{CommandParser, Language};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

const DEFAULT_TOML: &str = include_str!("../defaults/astview.default.toml");

/// Top-level configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AstviewConfig {
    pub analysis: AnalysisConfig,
    pub viewer: ViewerConfig,
    pub logging: LoggingConfig,
    /// External parser commands keyed by language name
    #[serde(default)]
    pub parsers: HashMap<String, ParserCommandConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisConfig {
    pub default_language: Language,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ViewerConfig {
    pub tree_width: u16,
    pub min_width: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub filter: String,
    #[serde(default)]
    pub file: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ParserCommandConfig {
    pub command: Vec<String>,
}

impl AstviewConfig {
    /// Parser commands for every configured language.
    ///
    /// Entries whose key is not a language, or whose command is empty, are skipped.
    pub fn parser_commands(&self) -> Vec<(Language, CommandParser)> {
        let mut commands: Vec<(Language, CommandParser)> = self
            .parsers
            .iter()
            .filter_map(|(name, entry)| {
                let language = name.parse::<Language>().ok()?;
                let parser = CommandParser::from_argv(&entry.command)?;
                Some((language, parser))
            })
            .collect();
        commands.sort_by_key(|(language, _)| language.name());
        commands
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

    /// Apply a single key/value override (command line flags end up here).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    pub fn build(self) -> Result<AstviewConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

pub fn load_defaults() -> Result<AstviewConfig, ConfigError> {
    Loader::new().build()
}
