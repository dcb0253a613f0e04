use console_command_core::{
    ArgumentSpec, BoundValues, Command, CommandOutcome, CommandParser, CommandSpec, ConsoleError,
    ErrorKind, Registry, ValueType,
};

struct Fixed(CommandSpec);

impl Command<()> for Fixed {
    fn spec(&self) -> &CommandSpec {
        &self.0
    }

    fn execute(&self, _: &mut (), _: &BoundValues) -> CommandOutcome {
        CommandOutcome::silent()
    }
}

fn registry() -> Registry<()> {
    let mut registry = Registry::new();
    let specs = [
        CommandSpec::new("unban", "Lift a ban")
            .with_arg(ArgumentSpec::positional("player", ValueType::Text)),
        CommandSpec::new("list", "List online players")
            .with_arg(ArgumentSpec::flag("verbose").short('v')),
        CommandSpec::new("say", "Broadcast a message").with_arg(ArgumentSpec::rest("message")),
        CommandSpec::new("ban", "Ban a player")
            .with_arg(ArgumentSpec::positional("player", ValueType::Text))
            .with_arg(ArgumentSpec::positional("minutes", ValueType::Integer).optional())
            .with_arg(ArgumentSpec::named("reason", ValueType::Text).short('r'))
            .with_help(),
    ];
    for spec in specs {
        registry.register(Fixed(spec)).unwrap();
    }
    registry
}

#[test]
fn missing_required_positional_is_reported_but_not_fatal() {
    let registry = registry();
    let result = CommandParser::new(&registry).parse("unban").unwrap();

    assert_eq!(result.command.map(|c| c.name.as_str()), Some("unban"));
    assert_eq!(result.missing.len(), 1);
    assert_eq!(result.missing[0].name, "player");
    assert_eq!(result.fatal_errors().count(), 0);
    assert_eq!(result.errors[0].kind, ErrorKind::MissingArgument);
    assert_eq!(
        result.errors[0].message,
        "missing required arguments: player (text)"
    );
}

#[test]
fn missing_arguments_are_listed_together_in_declaration_order() {
    let mut registry = Registry::new();
    registry
        .register(Fixed(
            CommandSpec::new("grant", "Grant items")
                .with_arg(ArgumentSpec::positional("a", ValueType::Text))
                .with_arg(ArgumentSpec::named("n", ValueType::Integer).required()),
        ))
        .unwrap();

    let result = CommandParser::new(&registry).parse("grant").unwrap();

    let missing: Vec<&str> = result.missing.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(missing, vec!["a", "n"]);
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].kind, ErrorKind::MissingArgument);
    assert!(!result.errors[0].fatal);
    assert_eq!(
        result.errors[0].message,
        "missing required arguments: a (text), n (integer)"
    );
}

#[test]
fn short_and_long_flag_bind_the_same_value() {
    let registry = registry();
    let parser = CommandParser::new(&registry);

    for line in ["list -v", "list --verbose"] {
        let result = parser.parse(line).unwrap();
        assert!(result.values.flag("verbose"), "{line}");
        assert!(result.errors.is_empty(), "{line}");
    }
}

#[test]
fn unregistered_command_yields_single_fatal_error() {
    let registry = registry();
    let result = CommandParser::new(&registry)
        .parse("frobnicate --verbose 1 2")
        .unwrap();

    assert!(result.command.is_none());
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].kind, ErrorKind::MissingCommand);
    assert!(result.errors[0].fatal);
    assert!(result.errors[0].message.contains("frobnicate"));
    assert!(result.values.is_empty());
    assert!(result.unconsumed.is_empty());
}

#[test]
fn extra_tokens_are_warned_about_but_dispatchable() {
    let registry = registry();
    let result = CommandParser::new(&registry)
        .parse("list extra1 extra2")
        .unwrap();

    assert_eq!(result.unconsumed, vec!["extra1", "extra2"]);
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].kind, ErrorKind::UnhandledArgument);
    assert!(!result.errors[0].fatal);
    assert!(result.is_dispatchable());
}

#[test]
fn quoted_free_text_keeps_interior_spaces() {
    let registry = registry();
    let parser = CommandParser::new(&registry);

    let result = parser.parse(r#"say "hello world""#).unwrap();
    assert_eq!(result.values.text("message"), Some("hello world"));

    let result = parser.parse(r#"say "two  spaces" and more"#).unwrap();
    assert_eq!(result.values.text("message"), Some("two  spaces and more"));
}

#[test]
fn parsing_is_deterministic() {
    let registry = registry();
    let parser = CommandParser::new(&registry);
    let line = r#"ban bob soon -r "left early" --bogus extra"#;

    let first = parser.parse(line).unwrap();
    let second = parser.parse(line).unwrap();
    assert_eq!(first, second);
    assert!(first.has_fatal());
}

#[test]
fn duplicate_registration_fails_and_keeps_first() {
    let mut registry = registry();
    let err = registry
        .register(Fixed(CommandSpec::new("BAN", "Second ban")))
        .unwrap_err();

    assert!(matches!(err, ConsoleError::DuplicateCommand(_)));
    assert_eq!(err.kind(), Some(ErrorKind::DuplicateCommand));
    assert_eq!(registry.resolve("ban").unwrap().description, "Ban a player");
    assert_eq!(registry.len(), 4);
}

#[test]
fn conversion_failure_leaves_argument_unbound() {
    let registry = registry();
    let result = CommandParser::new(&registry).parse("ban bob soon").unwrap();

    assert!(!result.values.contains("minutes"));
    assert_eq!(result.values.text("player"), Some("bob"));
    let err = result.fatal_errors().next().unwrap();
    assert_eq!(err.kind, ErrorKind::TypeConversion);
    assert!(err.message.contains("soon") && err.message.contains("integer"));
}

#[test]
fn help_request_is_not_an_error() {
    let registry = registry();
    let result = CommandParser::new(&registry).parse("ban -h").unwrap();

    assert!(result.help_requested());
    assert!(!result.has_fatal());
}

#[test]
fn registry_lists_in_registration_order() {
    let registry = registry();
    let names: Vec<_> = registry.all().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["unban", "list", "say", "ban"]);
}
