//! Pluggable text resolution for help and diagnostic messages.
//!
//! Every user-visible string goes through a [`TextSource`]. Keys are the
//! English templates themselves, so [`IdentityText`] renders plain English
//! and a [`Catalog`] only needs entries for what it translates.
//! Templates carry `{name}` placeholders filled by [`render`].
//!
//! # Examples
//!
//! ```
//! use console_command_core::{Catalog, IdentityText, TextSource, render};
//!
//! let key = "unknown command '{token}'";
//! assert_eq!(render(&IdentityText.resolve(key), &[("token", "frob")]), "unknown command 'frob'");
//!
//! let mut catalog = Catalog::new();
//! catalog.insert(key, "commande inconnue « {token} »");
//! assert_eq!(render(&catalog.resolve(key), &[("token", "frob")]), "commande inconnue « frob »");
//! ```

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ValueType;
use crate::error::Result;

/// Message template keys used by the engine.
pub mod keys {
    pub const UNKNOWN_COMMAND: &str = "unknown command '{token}'";
    pub const CONVERSION: &str = "invalid value '{token}' for '{argument}': expected {type}";
    pub const MISSING_ARGUMENTS: &str = "missing required arguments: {arguments}";
    pub const MISSING_ENTRY: &str = "{argument} ({type})";
    pub const UNHANDLED: &str = "ignored unexpected input: {tokens}";
    pub const USAGE: &str = "usage: {usage}";
    pub const REQUIRED: &str = "required";
    pub const OPTIONAL: &str = "optional";
    pub const ARGUMENTS_HEADER: &str = "Arguments:";
    pub const COMMANDS_HEADER: &str = "Commands:";
    pub const ERROR_LINE: &str = "error: {message}";
    pub const WARNING_LINE: &str = "warning: {message}";
    pub const NOT_A_BOOLEAN: &str = "not true or false";
    pub const NOT_A_CHOICE: &str = "not one of the accepted values";
}

/// Maps a message key to its display text.
pub trait TextSource: Send + Sync {
    /// Returns the display text for `key`.
    fn resolve<'a>(&'a self, key: &'a str) -> Cow<'a, str>;
}

/// Returns every key unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityText;

impl TextSource for IdentityText {
    fn resolve<'a>(&'a self, key: &'a str) -> Cow<'a, str> {
        Cow::Borrowed(key)
    }
}

/// Translation table loaded from YAML or JSON; unknown keys pass through.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    entries: BTreeMap<String, String>,
}

impl Catalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces one entry.
    pub fn insert(&mut self, key: &str, text: &str) {
        self.entries.insert(key.to_string(), text.to_string());
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the catalog has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Loads a catalog file. `.json` files are read as JSON, anything else
    /// as YAML.
    ///
    /// # Errors
    ///
    /// Returns [`Io`](crate::ConsoleError::Io) if the file cannot be read, or
    /// [`Yaml`](crate::ConsoleError::Yaml)/[`Json`](crate::ConsoleError::Json)
    /// if it does not hold a flat string map.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let catalog = if is_json {
            serde_json::from_str(&raw)?
        } else {
            serde_yaml::from_str(&raw)?
        };
        Ok(catalog)
    }
}

impl TextSource for Catalog {
    fn resolve<'a>(&'a self, key: &'a str) -> Cow<'a, str> {
        match self.entries.get(key) {
            Some(text) => Cow::Borrowed(text.as_str()),
            None => Cow::Borrowed(key),
        }
    }
}

/// Operator-facing name of a value type, e.g. `integer` or `one of on|off`.
pub fn type_label(value_type: &ValueType, text: &dyn TextSource) -> String {
    let label = text.resolve(value_type.tag());
    match value_type {
        ValueType::Choice(choices) => render(&label, &[("choices", choices.join("|").as_str())]),
        _ => label.into_owned(),
    }
}

/// Replaces each `{name}` placeholder in `template` with its value.
///
/// The template is scanned once; inserted values are never scanned again,
/// so a value that itself looks like `{name}` is copied through as is.
/// Unknown placeholders are left in place.
pub fn render(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let value = after.find('}').and_then(|close| {
            let name = &after[..close];
            values
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value, close))
        });
        match value {
            Some((value, close)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}
