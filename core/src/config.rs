//! Console configuration.
//!
//! # Example YAML
//!
//! ```yaml
//! prompt: "> "
//! parser:
//!   long_prefix: "--"
//!   short_prefix: "-"
//! catalog: locale/fr.yaml
//! ```

use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ConsoleError, Result};

/// Prefixes that mark named arguments.
///
/// # Examples
///
/// ```
/// use console_command_core::ParserConfig;
///
/// let slashes = ParserConfig::new("//", "/").unwrap();
/// assert_eq!(slashes.long_prefix, "//");
/// assert!(ParserConfig::new("-", "-").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Marks a long name, e.g. `--reason`. On its own it ends named arguments.
    pub long_prefix: String,
    /// Marks a single-character name, e.g. `-r`.
    pub short_prefix: String,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            long_prefix: "--".to_string(),
            short_prefix: "-".to_string(),
        }
    }
}

impl ParserConfig {
    /// Creates a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::InvalidConfig`] if either prefix is empty or
    /// both are the same.
    pub fn new(long_prefix: &str, short_prefix: &str) -> Result<Self> {
        let config = Self {
            long_prefix: long_prefix.to_string(),
            short_prefix: short_prefix.to_string(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks the prefixes are usable.
    pub fn validate(&self) -> Result<()> {
        if self.long_prefix.is_empty() || self.short_prefix.is_empty() {
            return Err(ConsoleError::InvalidConfig(
                "argument prefixes cannot be empty".to_string(),
            ));
        }
        if self.long_prefix == self.short_prefix {
            return Err(ConsoleError::InvalidConfig(format!(
                "long and short prefixes must differ, both are '{}'",
                self.long_prefix
            )));
        }
        Ok(())
    }
}

/// Top-level console configuration, usually loaded from YAML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Written before each read; empty disables the prompt.
    pub prompt: String,
    pub parser: ParserConfig,
    /// Optional message catalog (YAML or JSON).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog: Option<PathBuf>,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            prompt: "> ".to_string(),
            parser: ParserConfig::default(),
            catalog: None,
        }
    }
}

impl ConsoleConfig {
    /// Loads configuration from a YAML file. Missing fields take defaults.
    ///
    /// # Errors
    ///
    /// Returns [`Io`](ConsoleError::Io) if the file cannot be read,
    /// [`Yaml`](ConsoleError::Yaml) if parsing fails, or
    /// [`InvalidConfig`](ConsoleError::InvalidConfig) if the prefixes are
    /// unusable.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let reader = BufReader::new(file);
        let config: Self = serde_yaml::from_reader(reader)?;
        config.parser.validate()?;
        Ok(config)
    }

    /// Saves the configuration as YAML.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = BufWriter::new(file);
        serde_yaml::to_writer(writer, self)?;
        Ok(())
    }
}
