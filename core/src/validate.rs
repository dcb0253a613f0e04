//! Command spec validation.
//!
//! Checks the structural invariants of a [`CommandSpec`] before it is
//! registered, so a malformed grammar fails at startup instead of on the
//! first line an operator types.
//!
//! # Examples
//!
//! ```
//! use console_command_core::*;
//!
//! let spec = CommandSpec::new("say", "Broadcast a message")
//!     .with_arg(ArgumentSpec::rest("message"));
//! assert!(validate_command_spec(&spec).is_empty());
//!
//! // Invalid: variadic positional followed by another positional
//! let bad = CommandSpec::new("say", "")
//!     .with_arg(ArgumentSpec::rest("message"))
//!     .with_arg(ArgumentSpec::positional("target", ValueType::Text));
//! assert!(!validate_command_spec(&bad).is_empty());
//! ```

use std::collections::HashSet;

use thiserror::Error;

use crate::{CommandSpec, ValueType};

/// Structural problems in a command spec.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpecError {
    /// Command name is empty or contains whitespace.
    #[error("invalid command name: {0:?}")]
    InvalidCommandName(String),
    /// Argument name is empty or contains whitespace.
    #[error("invalid argument name: {0:?}")]
    InvalidArgumentName(String),
    /// Two arguments share a name.
    #[error("duplicate argument: {0}")]
    DuplicateArgument(String),
    /// Two named arguments share a short form.
    #[error("duplicate short name: -{0}")]
    DuplicateShort(char),
    /// An argument is declared both positional and a flag.
    #[error("positional argument cannot be a flag: {0}")]
    PositionalFlag(String),
    /// A positional argument declares a short form.
    #[error("positional argument cannot have a short name: {0}")]
    PositionalShort(String),
    /// A named argument declares itself variadic.
    #[error("only positional arguments can be variadic: {0}")]
    NamedVariadic(String),
    /// More than one positional is variadic.
    #[error("more than one variadic argument: {0}")]
    MultipleVariadic(String),
    /// A positional follows the variadic one.
    #[error("variadic argument must be the last positional: {0}")]
    VariadicNotLast(String),
    /// A required positional follows an optional one.
    #[error("required positional follows an optional one: {0}")]
    RequiredAfterOptional(String),
    /// A choice argument lists no choices.
    #[error("choice argument has no choices: {0}")]
    EmptyChoice(String),
    /// A variadic positional declares a type other than text.
    #[error("variadic argument must be text: {0}")]
    VariadicNotText(String),
    /// A flag declares a value type other than `flag`.
    #[error("flag argument must have the flag type: {0}")]
    FlagNotBoolean(String),
}

/// Validates a command spec, returning every problem found.
///
/// # Examples
///
/// ```
/// use console_command_core::*;
///
/// let spec = CommandSpec::new("kick", "")
///     .with_arg(ArgumentSpec::flag("quiet").short('q'))
///     .with_arg(ArgumentSpec::named("queue", ValueType::Text).short('q'));
/// let errors = validate_command_spec(&spec);
/// assert_eq!(errors, vec![SpecError::DuplicateShort('q')]);
/// ```
pub fn validate_command_spec(spec: &CommandSpec) -> Vec<SpecError> {
    let mut errors = Vec::new();

    if !is_valid_name(&spec.name) {
        errors.push(SpecError::InvalidCommandName(spec.name.clone()));
    }

    let mut names = HashSet::new();
    let mut shorts = HashSet::new();
    for arg in &spec.arguments {
        if !is_valid_name(&arg.name) {
            errors.push(SpecError::InvalidArgumentName(arg.name.clone()));
        }
        if !names.insert(arg.name.as_str()) {
            errors.push(SpecError::DuplicateArgument(arg.name.clone()));
        }
        if let Some(short) = arg.short {
            if arg.positional {
                errors.push(SpecError::PositionalShort(arg.name.clone()));
            } else if !shorts.insert(short) {
                errors.push(SpecError::DuplicateShort(short));
            }
        }
        if arg.positional && arg.flag {
            errors.push(SpecError::PositionalFlag(arg.name.clone()));
        }
        if arg.variadic && !arg.positional {
            errors.push(SpecError::NamedVariadic(arg.name.clone()));
        }
        if arg.variadic && arg.value_type != ValueType::Text {
            errors.push(SpecError::VariadicNotText(arg.name.clone()));
        }
        if arg.flag && arg.value_type != ValueType::Flag {
            errors.push(SpecError::FlagNotBoolean(arg.name.clone()));
        }
        if matches!(&arg.value_type, ValueType::Choice(c) if c.is_empty()) {
            errors.push(SpecError::EmptyChoice(arg.name.clone()));
        }
    }

    errors.extend(validate_positionals(spec));
    errors
}

fn validate_positionals(spec: &CommandSpec) -> Vec<SpecError> {
    let mut errors = Vec::new();
    let mut variadic_seen = false;
    let mut optional_seen = false;

    for arg in spec.positionals() {
        if variadic_seen {
            if arg.variadic {
                errors.push(SpecError::MultipleVariadic(arg.name.clone()));
            } else {
                errors.push(SpecError::VariadicNotLast(arg.name.clone()));
            }
        }
        if arg.required && optional_seen {
            errors.push(SpecError::RequiredAfterOptional(arg.name.clone()));
        }
        variadic_seen |= arg.variadic;
        optional_seen |= !arg.required;
    }

    errors
}

fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && !name.chars().any(char::is_whitespace)
}
