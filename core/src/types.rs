//! Declarative argument and command specifications.
//!
//! A [`CommandSpec`] is pure metadata: its name, a description, and the
//! ordered [`ArgumentSpec`]s the matcher binds tokens to. Specs are built
//! with chained constructors and are immutable once a command is
//! registered. They serialize with [`serde`] so a registry can be dumped
//! as JSON or YAML.

use serde::{Deserialize, Serialize};

/// Name of the implicit flag added by [`CommandSpec::with_help`].
pub const HELP_ARGUMENT: &str = "help";

/// Kind of value an argument accepts.
///
/// # Examples
///
/// ```
/// use console_command_core::ValueType;
///
/// let mode = ValueType::choice(["fast", "safe"]);
/// assert!(matches!(mode, ValueType::Choice(ref c) if c.len() == 2));
/// assert_eq!(ValueType::default(), ValueType::Text);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
    /// Boolean; presence alone carries meaning when the argument is a flag.
    Flag,
    /// Signed 64-bit integer.
    Integer,
    /// Free text (the default).
    #[default]
    Text,
    /// One of a fixed set of tokens, matched case-insensitively.
    Choice(Vec<String>),
}

impl ValueType {
    /// Builds a [`ValueType::Choice`] from any list of tokens.
    pub fn choice<I, S>(choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Choice(choices.into_iter().map(Into::into).collect())
    }

    /// Internal tag used as the lookup key for display names.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Flag => "flag",
            Self::Integer => "integer",
            Self::Text => "text",
            Self::Choice(_) => "one of {choices}",
        }
    }
}

/// Description of one parameter of a command.
///
/// Positional arguments are bound by order; named arguments by a long
/// (`--name`) or short (`-x`) token. A flag is a named argument that binds
/// `true` by presence and never consumes a value.
///
/// # Examples
///
/// ```
/// use console_command_core::{ArgumentSpec, ValueType};
///
/// let player = ArgumentSpec::positional("player", ValueType::Text)
///     .with_description("Player to kick");
/// assert!(player.positional && player.required);
///
/// let reason = ArgumentSpec::named("reason", ValueType::Text).short('r');
/// assert!(!reason.required);
/// assert!(reason.matches_short('r'));
///
/// let silent = ArgumentSpec::flag("silent").short('s');
/// assert!(silent.flag);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArgumentSpec {
    /// Name, unique within its command; also the long form for named arguments.
    pub name: String,
    /// Optional single-character short form (named arguments only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short: Option<char>,
    /// Declared value type.
    pub value_type: ValueType,
    /// Bound by position rather than by name.
    pub positional: bool,
    /// Presence alone carries meaning; no value is consumed.
    pub flag: bool,
    /// Reported as missing when never bound.
    pub required: bool,
    /// Absorbs the rest of the free tokens as one space-joined string.
    pub variadic: bool,
    /// Help text.
    #[serde(default)]
    pub description: String,
}

impl ArgumentSpec {
    /// Creates a required positional argument.
    pub fn positional(name: &str, value_type: ValueType) -> Self {
        Self {
            name: name.to_string(),
            short: None,
            value_type,
            positional: true,
            flag: false,
            required: true,
            variadic: false,
            description: String::new(),
        }
    }

    /// Creates a required positional text argument that swallows the rest
    /// of the line.
    pub fn rest(name: &str) -> Self {
        Self {
            variadic: true,
            ..Self::positional(name, ValueType::Text)
        }
    }

    /// Creates an optional named argument that takes a value.
    pub fn named(name: &str, value_type: ValueType) -> Self {
        Self {
            name: name.to_string(),
            short: None,
            value_type,
            positional: false,
            flag: false,
            required: false,
            variadic: false,
            description: String::new(),
        }
    }

    /// Creates a boolean flag.
    pub fn flag(name: &str) -> Self {
        Self {
            flag: true,
            ..Self::named(name, ValueType::Flag)
        }
    }

    /// Sets the short form.
    pub fn short(mut self, short: char) -> Self {
        self.short = Some(short);
        self
    }

    /// Marks the argument as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Marks the argument as optional.
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Adds a description.
    pub fn with_description(mut self, desc: &str) -> Self {
        self.description = desc.to_string();
        self
    }

    /// Named arguments are everything that is not positional.
    pub fn is_named(&self) -> bool {
        !self.positional
    }

    /// Checks the long form against a token with the prefix already stripped.
    pub fn matches_long(&self, name: &str) -> bool {
        self.is_named() && self.name == name
    }

    /// Checks the short form.
    pub fn matches_short(&self, short: char) -> bool {
        self.is_named() && self.short == Some(short)
    }
}

/// Metadata for one console command.
///
/// # Examples
///
/// ```
/// use console_command_core::{ArgumentSpec, CommandSpec, ValueType};
///
/// let spec = CommandSpec::new("ban", "Ban a player")
///     .with_arg(ArgumentSpec::positional("player", ValueType::Text))
///     .with_arg(ArgumentSpec::positional("minutes", ValueType::Integer).optional())
///     .with_arg(ArgumentSpec::flag("silent").short('s'))
///     .with_help();
///
/// assert_eq!(spec.positionals().count(), 2);
/// assert_eq!(spec.named().count(), 2); // --silent and the implicit --help
/// assert!(spec.find_short('h').is_some());
/// assert!(spec.supports_help);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandSpec {
    /// Command name, matched case-insensitively against the first token.
    pub name: String,
    /// One-line description.
    pub description: String,
    /// Arguments in declaration order.
    pub arguments: Vec<ArgumentSpec>,
    /// Whether `--help`/`-h` renders help instead of executing.
    pub supports_help: bool,
}

impl CommandSpec {
    /// Creates a command with no arguments.
    pub fn new(name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            arguments: Vec::new(),
            supports_help: false,
        }
    }

    /// Appends an argument.
    pub fn with_arg(mut self, arg: ArgumentSpec) -> Self {
        self.arguments.push(arg);
        self
    }

    /// Adds the implicit `--help`/`-h` flag.
    pub fn with_help(mut self) -> Self {
        if !self.supports_help {
            self.supports_help = true;
            self.arguments.push(
                ArgumentSpec::flag(HELP_ARGUMENT)
                    .short('h')
                    .with_description("Show help for this command"),
            );
        }
        self
    }

    /// Positional arguments in their fixed order.
    pub fn positionals(&self) -> impl Iterator<Item = &ArgumentSpec> {
        self.arguments.iter().filter(|a| a.positional)
    }

    /// Named arguments and flags in declaration order.
    pub fn named(&self) -> impl Iterator<Item = &ArgumentSpec> {
        self.arguments.iter().filter(|a| a.is_named())
    }

    /// Looks up any argument by name.
    pub fn argument(&self, name: &str) -> Option<&ArgumentSpec> {
        self.arguments.iter().find(|a| a.name == name)
    }

    /// Finds a named argument by its long form (prefix stripped).
    pub fn find_long(&self, name: &str) -> Option<&ArgumentSpec> {
        self.arguments.iter().find(|a| a.matches_long(name))
    }

    /// Finds a named argument by its short form.
    pub fn find_short(&self, short: char) -> Option<&ArgumentSpec> {
        self.arguments.iter().find(|a| a.matches_short(short))
    }

    /// Case-insensitive name comparison.
    pub fn is_named(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}
