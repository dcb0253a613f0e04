//! Binds tokens to a command's arguments.
//!
//! The first token selects the command. The rest are scanned left to
//! right:
//!
//! - `--name` / `-x` naming a declared argument binds it. Flags bind `true`;
//!   other arguments take the next token (or the text after `=` in
//!   `--name=value`) as their value.
//! - The long prefix on its own ends named arguments; everything after it
//!   is positional.
//! - Option-looking tokens that name nothing (`--bogus`, `-z`) are left
//!   unconsumed. Other tokens, including `-5`, are positional data.
//! - Positional tokens fill the declared positionals in order. A variadic
//!   positional takes every remaining free token, joined with single spaces.
//!
//! Nothing here panics or returns `Err`: every problem becomes a
//! [`ParseError`] on the result.

use tracing::{debug, warn};

use crate::text::{IdentityText, TextSource, keys, render, type_label};
use crate::{
    ArgumentSpec, BoundValue, BoundValues, CommandSpec, ErrorKind, ParseError, ParseResult,
    ParserConfig, Registry, ValueType, tokenize,
};

/// What a single token is, before positional assignment.
enum TokenRole<'r, 't> {
    /// A declared named argument, with an inline `=value` if one was given.
    Named(&'r ArgumentSpec, Option<&'t str>),
    /// Looks like an option but names nothing.
    UnknownOption,
    /// The long prefix alone.
    EndOfOptions,
    /// Positional data.
    Free,
}

/// Turns console lines into [`ParseResult`]s against a fixed registry.
///
/// # Examples
///
/// ```
/// use console_command_core::*;
///
/// struct Kick(CommandSpec);
///
/// impl Command<()> for Kick {
///     fn spec(&self) -> &CommandSpec {
///         &self.0
///     }
///     fn execute(&self, _: &mut (), _: &BoundValues) -> CommandOutcome {
///         CommandOutcome::silent()
///     }
/// }
///
/// let mut registry = Registry::new();
/// registry
///     .register(Kick(
///         CommandSpec::new("kick", "Kick a player")
///             .with_arg(ArgumentSpec::positional("player", ValueType::Text))
///             .with_arg(ArgumentSpec::named("reason", ValueType::Text).short('r')),
///     ))
///     .unwrap();
///
/// let parser = CommandParser::new(&registry);
/// let result = parser.parse(r#"kick bob -r "spamming chat""#).unwrap();
/// assert_eq!(result.values.text("player"), Some("bob"));
/// assert_eq!(result.values.text("reason"), Some("spamming chat"));
/// assert!(result.is_dispatchable());
///
/// assert!(parser.parse("   ").is_none());
/// ```
pub struct CommandParser<'r, C> {
    registry: &'r Registry<C>,
    config: ParserConfig,
    text: &'r dyn TextSource,
}

impl<'r, C> CommandParser<'r, C> {
    /// Creates a parser with default prefixes and untranslated messages.
    pub fn new(registry: &'r Registry<C>) -> Self {
        Self {
            registry,
            config: ParserConfig::default(),
            text: &IdentityText,
        }
    }

    /// Uses different argument prefixes.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ConsoleError::InvalidConfig`] if the prefixes fail
    /// [`ParserConfig::validate`].
    pub fn with_config(mut self, config: ParserConfig) -> crate::Result<Self> {
        config.validate()?;
        self.config = config;
        Ok(self)
    }

    /// Uses a message catalog for diagnostics.
    pub fn with_text(mut self, text: &'r dyn TextSource) -> Self {
        self.text = text;
        self
    }

    pub fn registry(&self) -> &'r Registry<C> {
        self.registry
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    pub fn text(&self) -> &'r dyn TextSource {
        self.text
    }

    /// Parses one line. Blank lines yield `None`.
    pub fn parse(&self, line: &str) -> Option<ParseResult<'r>> {
        self.match_tokens(&tokenize(line))
    }

    /// Matches already tokenized input. An empty slice yields `None`.
    pub fn match_tokens(&self, tokens: &[String]) -> Option<ParseResult<'r>> {
        let (head, rest) = tokens.split_first()?;

        let Some(spec) = self.registry.resolve(head) else {
            warn!(token = %head, "unknown console command");
            let message = render(
                &self.text.resolve(keys::UNKNOWN_COMMAND),
                &[("token", head.as_str())],
            );
            return Some(ParseResult {
                command: None,
                values: BoundValues::new(),
                missing: Vec::new(),
                errors: vec![ParseError::new(ErrorKind::MissingCommand, message)],
                unconsumed: Vec::new(),
            });
        };

        let result = self.match_arguments(spec, rest);
        debug!(
            command = %spec.name,
            bound = result.values.len(),
            missing = result.missing.len(),
            errors = result.errors.len(),
            unconsumed = result.unconsumed.len(),
            "matched console line"
        );
        Some(result)
    }

    fn match_arguments(&self, spec: &'r CommandSpec, tokens: &[String]) -> ParseResult<'r> {
        let positionals: Vec<&ArgumentSpec> = spec.positionals().collect();
        let mut values = BoundValues::new();
        let mut errors = Vec::new();
        let mut unconsumed = Vec::new();
        let mut tail: Vec<&str> = Vec::new();
        let mut next_positional = 0;
        let mut options_open = true;

        let mut iter = tokens.iter();
        while let Some(token) = iter.next() {
            if options_open {
                match self.classify(spec, token) {
                    TokenRole::EndOfOptions => {
                        options_open = false;
                        continue;
                    }
                    TokenRole::UnknownOption => {
                        unconsumed.push(token.clone());
                        continue;
                    }
                    TokenRole::Named(arg, inline) => {
                        let raw = match inline {
                            Some(raw) => Some(raw),
                            None if arg.flag => {
                                values.insert(&arg.name, BoundValue::Flag(true));
                                continue;
                            }
                            None => iter.next().map(String::as_str),
                        };
                        match raw {
                            Some(raw) => self.bind(arg, raw, &mut values, &mut errors),
                            None => unconsumed.push(token.clone()),
                        }
                        continue;
                    }
                    TokenRole::Free => {}
                }
            }

            match positionals.get(next_positional) {
                Some(arg) if arg.variadic => tail.push(token),
                Some(arg) => {
                    self.bind(arg, token, &mut values, &mut errors);
                    next_positional += 1;
                }
                None => unconsumed.push(token.clone()),
            }
        }

        if !tail.is_empty() {
            if let Some(arg) = positionals.get(next_positional) {
                self.bind(arg, &tail.join(" "), &mut values, &mut errors);
            }
        }

        let missing: Vec<&'r ArgumentSpec> = spec
            .arguments
            .iter()
            .filter(|arg| arg.required && !values.contains(&arg.name))
            .collect();
        if !missing.is_empty() {
            errors.push(self.missing_error(&missing));
        }
        if !unconsumed.is_empty() {
            errors.push(self.unhandled_error(&unconsumed));
        }

        ParseResult {
            command: Some(spec),
            values,
            missing,
            errors,
            unconsumed,
        }
    }

    fn classify<'t>(&self, spec: &'r CommandSpec, token: &'t str) -> TokenRole<'r, 't> {
        let long = self.config.long_prefix.as_str();
        let short = self.config.short_prefix.as_str();

        // The longer prefix wins when one is a prefix of the other.
        let long_first = long.len() >= short.len();
        let roles = if long_first {
            [self.classify_long(spec, token), self.classify_short(spec, token)]
        } else {
            [self.classify_short(spec, token), self.classify_long(spec, token)]
        };
        roles.into_iter().flatten().next().unwrap_or(TokenRole::Free)
    }

    fn classify_long<'t>(
        &self,
        spec: &'r CommandSpec,
        token: &'t str,
    ) -> Option<TokenRole<'r, 't>> {
        let body = token.strip_prefix(self.config.long_prefix.as_str())?;
        if body.is_empty() {
            return Some(TokenRole::EndOfOptions);
        }
        let (name, inline) = match body.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (body, None),
        };
        Some(match spec.find_long(name) {
            Some(arg) => TokenRole::Named(arg, inline),
            None => TokenRole::UnknownOption,
        })
    }

    fn classify_short<'t>(
        &self,
        spec: &'r CommandSpec,
        token: &'t str,
    ) -> Option<TokenRole<'r, 't>> {
        let body = token.strip_prefix(self.config.short_prefix.as_str())?;
        let mut chars = body.chars();
        let (Some(c), None) = (chars.next(), chars.next()) else {
            return None;
        };
        match spec.find_short(c) {
            Some(arg) => Some(TokenRole::Named(arg, None)),
            None if c.is_ascii_digit() => None,
            None => Some(TokenRole::UnknownOption),
        }
    }

    fn bind(
        &self,
        arg: &ArgumentSpec,
        raw: &str,
        values: &mut BoundValues,
        errors: &mut Vec<ParseError>,
    ) {
        match self.coerce(&arg.value_type, raw) {
            Ok(value) => values.insert(&arg.name, value),
            Err(cause) => {
                let label = type_label(&arg.value_type, self.text);
                let message = render(&self.text.resolve(keys::CONVERSION), &[
                    ("token", raw),
                    ("argument", arg.name.as_str()),
                    ("type", label.as_str()),
                ]);
                errors.push(ParseError::new(ErrorKind::TypeConversion, message).with_cause(cause));
            }
        }
    }

    fn coerce(&self, value_type: &ValueType, raw: &str) -> Result<BoundValue, String> {
        match value_type {
            ValueType::Flag => parse_bool(raw)
                .map(BoundValue::Flag)
                .ok_or_else(|| self.text.resolve(keys::NOT_A_BOOLEAN).into_owned()),
            ValueType::Integer => raw
                .parse::<i64>()
                .map(BoundValue::Integer)
                .map_err(|err| err.to_string()),
            ValueType::Text => Ok(BoundValue::Text(raw.to_string())),
            ValueType::Choice(choices) => choices
                .iter()
                .find(|choice| choice.eq_ignore_ascii_case(raw))
                .map(|choice| BoundValue::Choice(choice.clone()))
                .ok_or_else(|| self.text.resolve(keys::NOT_A_CHOICE).into_owned()),
        }
    }

    fn missing_error(&self, missing: &[&ArgumentSpec]) -> ParseError {
        let entry = self.text.resolve(keys::MISSING_ENTRY);
        let listed = missing
            .iter()
            .map(|arg| {
                let label = type_label(&arg.value_type, self.text);
                render(&entry, &[("argument", arg.name.as_str()), ("type", label.as_str())])
            })
            .collect::<Vec<_>>()
            .join(", ");
        let message = render(
            &self.text.resolve(keys::MISSING_ARGUMENTS),
            &[("arguments", listed.as_str())],
        );
        ParseError::new(ErrorKind::MissingArgument, message)
    }

    fn unhandled_error(&self, unconsumed: &[String]) -> ParseError {
        let listed = unconsumed
            .iter()
            .map(|token| {
                if token.is_empty() || token.contains(char::is_whitespace) {
                    format!("\"{token}\"")
                } else {
                    token.clone()
                }
            })
            .collect::<Vec<_>>()
            .join(" ");
        let message = render(&self.text.resolve(keys::UNHANDLED), &[("tokens", listed.as_str())]);
        ParseError::new(ErrorKind::UnhandledArgument, message)
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use crate::{Catalog, Command, CommandOutcome, ConsoleError};

    use super::*;

    struct Spec(CommandSpec);

    impl Command<()> for Spec {
        fn spec(&self) -> &CommandSpec {
            &self.0
        }

        fn execute(&self, _: &mut (), _: &BoundValues) -> CommandOutcome {
            CommandOutcome::silent()
        }
    }

    fn registry() -> Registry<()> {
        let mut registry = Registry::new();
        registry
            .register(Spec(
                CommandSpec::new("ban", "Ban a player")
                    .with_arg(ArgumentSpec::positional("player", ValueType::Text))
                    .with_arg(ArgumentSpec::positional("minutes", ValueType::Integer).optional())
                    .with_arg(ArgumentSpec::named("reason", ValueType::Text).short('r'))
                    .with_arg(ArgumentSpec::flag("silent").short('s'))
                    .with_help(),
            ))
            .unwrap();
        registry
            .register(Spec(
                CommandSpec::new("say", "Broadcast")
                    .with_arg(ArgumentSpec::rest("message"))
                    .with_arg(ArgumentSpec::flag("loud").short('l')),
            ))
            .unwrap();
        registry
            .register(Spec(
                CommandSpec::new("mode", "Switch mode").with_arg(ArgumentSpec::positional(
                    "mode",
                    ValueType::choice(["Fast", "Safe"]),
                )),
            ))
            .unwrap();
        registry
    }

    #[test]
    fn test_named_and_positional_mix() {
        let registry = registry();
        let result = CommandParser::new(&registry)
            .parse("ban -s bob --reason griefing 30")
            .unwrap();

        assert_eq!(result.values.text("player"), Some("bob"));
        assert_eq!(result.values.integer("minutes"), Some(30));
        assert_eq!(result.values.text("reason"), Some("griefing"));
        assert!(result.values.flag("silent"));
        assert!(result.errors.is_empty());
    }

    #[test]
    fn test_inline_long_value() {
        let registry = registry();
        let result = CommandParser::new(&registry)
            .parse("ban bob --reason=afk --silent=no")
            .unwrap();

        assert_eq!(result.values.text("reason"), Some("afk"));
        assert_eq!(result.values.get("silent"), Some(&BoundValue::Flag(false)));
    }

    #[test]
    fn test_conversion_failure_is_fatal_and_unbound() {
        let registry = registry();
        let result = CommandParser::new(&registry).parse("ban bob soon").unwrap();

        assert!(result.has_fatal());
        assert!(!result.values.contains("minutes"));
        let err = &result.errors[0];
        assert_eq!(err.kind, ErrorKind::TypeConversion);
        assert!(err.message.contains("'soon'"));
        assert!(err.message.contains("integer"));
        assert!(err.cause.is_some());
    }

    #[test]
    fn test_negative_number_is_positional() {
        let registry = registry();
        let result = CommandParser::new(&registry).parse("ban bob -5").unwrap();
        assert_eq!(result.values.integer("minutes"), Some(-5));
    }

    #[test]
    fn test_unknown_option_is_unconsumed() {
        let registry = registry();
        let result = CommandParser::new(&registry)
            .parse("ban bob --bogus -z")
            .unwrap();

        assert_eq!(result.unconsumed, vec!["--bogus", "-z"]);
        assert!(!result.has_fatal());
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].kind, ErrorKind::UnhandledArgument);
    }

    #[test]
    fn test_dangling_named_value_is_unconsumed() {
        let registry = registry();
        let result = CommandParser::new(&registry).parse("ban bob -r").unwrap();

        assert!(!result.values.contains("reason"));
        assert_eq!(result.unconsumed, vec!["-r"]);
    }

    #[test]
    fn test_end_of_options_marker() {
        let registry = registry();
        let result = CommandParser::new(&registry)
            .parse("say -- -l is not a flag")
            .unwrap();

        assert_eq!(result.values.text("message"), Some("-l is not a flag"));
        assert!(!result.values.flag("loud"));
    }

    #[test]
    fn test_variadic_skips_flags() {
        let registry = registry();
        let result = CommandParser::new(&registry)
            .parse("say hello   -l world")
            .unwrap();

        assert_eq!(result.values.text("message"), Some("hello world"));
        assert!(result.values.flag("loud"));
    }

    #[test]
    fn test_choice_binds_canonical_spelling() {
        let registry = registry();
        let parser = CommandParser::new(&registry);

        let result = parser.parse("mode FAST").unwrap();
        assert_eq!(result.values.choice("mode"), Some("Fast"));

        let result = parser.parse("mode turbo").unwrap();
        assert!(result.has_fatal());
        assert!(result.errors[0].message.contains("one of Fast|Safe"));
    }

    #[test]
    fn test_missing_message_lists_each_argument() {
        let registry = registry();
        let result = CommandParser::new(&registry).parse("mode").unwrap();

        assert_eq!(result.missing.len(), 1);
        assert_eq!(
            result.errors[0].message,
            "missing required arguments: mode (one of Fast|Safe)"
        );
        assert!(!result.errors[0].fatal);
    }

    #[test]
    fn test_conversion_message_quotes_token_verbatim() {
        let registry = registry();
        let parser = CommandParser::new(&registry);

        let result = parser.parse("ban bob {type}").unwrap();
        assert_eq!(
            result.errors[0].message,
            "invalid value '{type}' for 'minutes': expected integer"
        );

        let result = parser.parse("ban bob {argument}").unwrap();
        assert_eq!(
            result.errors[0].message,
            "invalid value '{argument}' for 'minutes': expected integer"
        );
    }

    #[test]
    fn test_with_config_rejects_invalid_prefixes() {
        let registry = registry();
        let config = ParserConfig {
            long_prefix: String::new(),
            short_prefix: "-".to_string(),
        };
        let err = CommandParser::new(&registry).with_config(config).err().unwrap();
        assert!(matches!(err, ConsoleError::InvalidConfig(_)));
    }

    #[test]
    fn test_repeated_named_argument_last_wins() {
        let registry = registry();
        let result = CommandParser::new(&registry)
            .parse("ban bob -r one --reason two")
            .unwrap();
        assert_eq!(result.values.text("reason"), Some("two"));
    }

    #[test]
    fn test_custom_prefixes() {
        let registry = registry();
        let config = ParserConfig::new("//", "/").unwrap();
        let parser = CommandParser::new(&registry).with_config(config).unwrap();

        let result = parser.parse("ban bob /s //reason afk").unwrap();
        assert!(result.values.flag("silent"));
        assert_eq!(result.values.text("reason"), Some("afk"));

        let result = parser.parse("ban bob 5 -s").unwrap();
        assert!(!result.values.flag("silent"));
        assert_eq!(result.unconsumed, vec!["-s"]);
    }

    #[test]
    fn test_catalog_translates_diagnostics() {
        let registry = registry();
        let mut catalog = Catalog::new();
        catalog.insert(keys::UNKNOWN_COMMAND, "commande inconnue : {token}");
        let parser = CommandParser::new(&registry).with_text(&catalog);

        let result = parser.parse("frob").unwrap();
        assert_eq!(result.errors[0].message, "commande inconnue : frob");
    }

    #[test]
    fn test_help_flag_is_bound() {
        let registry = registry();
        let result = CommandParser::new(&registry).parse("ban -h").unwrap();
        assert!(result.help_requested());
        assert_eq!(result.missing.len(), 1);
    }
}
