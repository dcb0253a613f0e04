//! The outcome of parsing one console line.
//!
//! A [`ParseResult`] is built once per line, never mutated afterwards, and
//! dropped once the driver has acted on it. Errors are data: each
//! [`ParseError`] says what went wrong and whether it blocks dispatch.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::{ArgumentSpec, CommandSpec, HELP_ARGUMENT};

/// Classification of console errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorKind {
    /// The first token names no registered command.
    MissingCommand,
    /// Required arguments were never bound.
    MissingArgument,
    /// A token could not be converted to the declared type.
    TypeConversion,
    /// Tokens were left over after matching.
    UnhandledArgument,
    /// A command name was registered twice. Registration time only.
    DuplicateCommand,
}

impl ErrorKind {
    /// Whether errors of this kind block dispatch.
    pub fn is_fatal(self) -> bool {
        match self {
            Self::MissingCommand | Self::TypeConversion | Self::DuplicateCommand => true,
            Self::MissingArgument | Self::UnhandledArgument => false,
        }
    }
}

/// One classified problem found while parsing a line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseError {
    pub kind: ErrorKind,
    /// Rendered, operator-facing message.
    pub message: String,
    /// Blocks handler invocation.
    pub fatal: bool,
    /// Lower-level detail, e.g. why a conversion failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cause: Option<String>,
}

impl ParseError {
    /// Creates an error whose fatality follows its kind.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            fatal: kind.is_fatal(),
            cause: None,
        }
    }

    /// Attaches the underlying cause.
    pub fn with_cause(mut self, cause: impl Into<String>) -> Self {
        self.cause = Some(cause.into());
        self
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.cause {
            Some(cause) => write!(f, "{} ({cause})", self.message),
            None => f.write_str(&self.message),
        }
    }
}

/// A typed argument value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum BoundValue {
    Flag(bool),
    Integer(i64),
    Text(String),
    /// Canonical spelling of the matched choice.
    Choice(String),
}

/// Values bound to argument names, kept in name order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct BoundValues(BTreeMap<String, BoundValue>);

impl BoundValues {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds a value, replacing any earlier one.
    pub fn insert(&mut self, name: &str, value: BoundValue) {
        self.0.insert(name.to_string(), value);
    }

    /// The raw value for `name`.
    pub fn get(&self, name: &str) -> Option<&BoundValue> {
        self.0.get(name)
    }

    /// Returns `true` if `name` was bound.
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Boolean value; absent flags read as `false`.
    pub fn flag(&self, name: &str) -> bool {
        matches!(self.get(name), Some(BoundValue::Flag(true)))
    }

    pub fn integer(&self, name: &str) -> Option<i64> {
        match self.get(name) {
            Some(BoundValue::Integer(n)) => Some(*n),
            _ => None,
        }
    }

    /// Text or choice value.
    pub fn text(&self, name: &str) -> Option<&str> {
        match self.get(name) {
            Some(BoundValue::Text(s) | BoundValue::Choice(s)) => Some(s),
            _ => None,
        }
    }

    pub fn choice(&self, name: &str) -> Option<&str> {
        match self.get(name) {
            Some(BoundValue::Choice(s)) => Some(s),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Bound names with their values, in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BoundValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Everything the matcher learned from one line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseResult<'r> {
    /// The matched command, `None` when the first token names nothing.
    #[serde(serialize_with = "serialize_command_name")]
    pub command: Option<&'r CommandSpec>,
    /// Successfully converted values.
    pub values: BoundValues,
    /// Required arguments that were never bound, in declaration order.
    pub missing: Vec<&'r ArgumentSpec>,
    /// Problems in the order they were found.
    pub errors: Vec<ParseError>,
    /// Tokens no argument accepted.
    pub unconsumed: Vec<String>,
}

impl<'r> ParseResult<'r> {
    /// Whether any error blocks dispatch.
    pub fn has_fatal(&self) -> bool {
        self.errors.iter().any(|e| e.fatal)
    }

    /// A command matched and nothing fatal was found.
    pub fn is_dispatchable(&self) -> bool {
        self.command.is_some() && !self.has_fatal()
    }

    /// The command is help-capable and `--help` was given.
    pub fn help_requested(&self) -> bool {
        self.command.is_some_and(|spec| spec.supports_help) && self.values.flag(HELP_ARGUMENT)
    }

    pub fn fatal_errors(&self) -> impl Iterator<Item = &ParseError> {
        self.errors.iter().filter(|e| e.fatal)
    }

    /// Non-fatal errors, surfaced as warnings.
    pub fn warnings(&self) -> impl Iterator<Item = &ParseError> {
        self.errors.iter().filter(|e| !e.fatal)
    }
}

fn serialize_command_name<S>(command: &Option<&CommandSpec>, s: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    match command {
        Some(spec) => s.serialize_some(&spec.name),
        None => s.serialize_none(),
    }
}
