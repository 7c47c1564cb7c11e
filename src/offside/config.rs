//! Configuration loading
//!
//! `defaults/offside.default.toml` is embedded into the crate so that docs and runtime
//! behavior stay in sync. Callers layer their own files on top of those defaults via
//! [`Loader`] before deserializing into [`OffsideConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../../defaults/offside.default.toml");

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct OffsideConfig {
    pub tracker: TrackerConfig,
}

/// Knobs of the indentation tracker
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct TrackerConfig {
    pub dedent: DedentPolicy,
    pub after_end: ExhaustionPolicy,
}

impl TrackerConfig {
    /// Reject ragged dedents and calls after end of input
    pub fn strict() -> Self {
        TrackerConfig {
            dedent: DedentPolicy::Strict,
            after_end: ExhaustionPolicy::Fail,
        }
    }
}

/// Handling of a dedent to a column that matches no open level
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DedentPolicy {
    /// Close every level deeper than the column and accept the line
    #[default]
    Lenient,
    /// Report `IndentationError::InconsistentDedent`
    Strict,
}

/// Result of `next_token` once end of input has been returned
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExhaustionPolicy {
    /// Keep returning the end-of-input token
    #[default]
    Repeat,
    /// Report `IndentationError::UseAfterEnd`
    Fail,
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

    /// Layer a configuration file. Missing files trigger an error; the format follows the
    /// file extension (toml, yaml, json).
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref()).required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref()).required(false);
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
    pub fn build(self) -> Result<OffsideConfig, ConfigError> {
        let config: OffsideConfig = self.builder.build()?.try_deserialize()?;
        tracing::debug!(
            dedent = ?config.tracker.dedent,
            after_end = ?config.tracker.after_end,
            "configuration loaded"
        );
        Ok(config)
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<OffsideConfig, ConfigError> {
    Loader::new().build()
}
