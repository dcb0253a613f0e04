//! The console's command set.

use console_command_core::{
    ArgumentSpec, BoundValues, Catalog, Command, CommandOutcome, CommandSpec, HelpFormatter,
    ParserConfig, Registry, Result, ValueType,
};

use crate::service::{Ban, ServiceHandle, ServiceState};

/// Registers every command, with `help` last so it can list the others.
pub fn build_registry(
    config: &ParserConfig,
    catalog: &Catalog,
) -> Result<Registry<ServiceHandle>> {
    let mut registry = Registry::new();
    registry.register_default::<List>()?;
    registry.register_default::<Say>()?;
    registry.register_default::<Kick>()?;
    registry.register_default::<BanPlayer>()?;
    registry.register_default::<Unban>()?;
    registry.register_default::<Stop>()?;

    let help = Help::new(registry.all().cloned().collect(), config.clone(), catalog.clone());
    registry.register(help)?;
    Ok(registry)
}

/// Runs `f` against the locked service state.
fn with_state<F>(ctx: &ServiceHandle, f: F) -> CommandOutcome
where
    F: FnOnce(&mut ServiceState) -> CommandOutcome,
{
    match ctx.state() {
        Ok(mut state) => f(&mut state),
        Err(message) => CommandOutcome::Failed(message),
    }
}

pub struct List(CommandSpec);

impl Default for List {
    fn default() -> Self {
        Self(
            CommandSpec::new("list", "List online players")
                .with_arg(
                    ArgumentSpec::flag("verbose")
                        .short('v')
                        .with_description("Also list banned players"),
                )
                .with_help(),
        )
    }
}

impl Command<ServiceHandle> for List {
    fn spec(&self) -> &CommandSpec {
        &self.0
    }

    fn execute(&self, ctx: &mut ServiceHandle, values: &BoundValues) -> CommandOutcome {
        let verbose = values.flag("verbose");
        with_state(ctx, |state| {
            let online: Vec<&str> = state.online.iter().map(String::as_str).collect();
            let mut lines = vec![format!("{} online: {}", online.len(), online.join(", "))];
            if verbose {
                let banned: Vec<&str> = state.bans.keys().map(String::as_str).collect();
                lines.push(format!("{} banned: {}", banned.len(), banned.join(", ")));
            }
            CommandOutcome::Done(lines)
        })
    }
}

pub struct Say(CommandSpec);

impl Default for Say {
    fn default() -> Self {
        Self(
            CommandSpec::new("say", "Broadcast a message to every player")
                .with_arg(ArgumentSpec::rest("message").with_description("Text to broadcast"))
                .with_help(),
        )
    }
}

impl Command<ServiceHandle> for Say {
    fn spec(&self) -> &CommandSpec {
        &self.0
    }

    fn execute(&self, ctx: &mut ServiceHandle, values: &BoundValues) -> CommandOutcome {
        let Some(message) = values.text("message") else {
            return CommandOutcome::Failed("nothing to broadcast".to_string());
        };
        with_state(ctx, |state| {
            state.broadcasts.push(message.to_string());
            CommandOutcome::line(format!("[broadcast] {message}"))
        })
    }
}

pub struct Kick(CommandSpec);

impl Default for Kick {
    fn default() -> Self {
        Self(
            CommandSpec::new("kick", "Disconnect a player")
                .with_arg(
                    ArgumentSpec::positional("player", ValueType::Text)
                        .with_description("Player to disconnect"),
                )
                .with_arg(
                    ArgumentSpec::named("reason", ValueType::Text)
                        .short('r')
                        .with_description("Reason shown to the player"),
                )
                .with_help(),
        )
    }
}

impl Command<ServiceHandle> for Kick {
    fn spec(&self) -> &CommandSpec {
        &self.0
    }

    fn execute(&self, ctx: &mut ServiceHandle, values: &BoundValues) -> CommandOutcome {
        let Some(player) = values.text("player") else {
            return CommandOutcome::Failed("no player given".to_string());
        };
        with_state(ctx, |state| {
            if !state.online.remove(player) {
                return CommandOutcome::Failed(format!("{player} is not online"));
            }
            match values.text("reason") {
                Some(reason) => CommandOutcome::line(format!("kicked {player}: {reason}")),
                None => CommandOutcome::line(format!("kicked {player}")),
            }
        })
    }
}

pub struct BanPlayer(CommandSpec);

impl Default for BanPlayer {
    fn default() -> Self {
        Self(
            CommandSpec::new("ban", "Ban a player, permanently unless minutes are given")
                .with_arg(
                    ArgumentSpec::positional("player", ValueType::Text)
                        .with_description("Player to ban"),
                )
                .with_arg(
                    ArgumentSpec::positional("minutes", ValueType::Integer)
                        .optional()
                        .with_description("Ban length in minutes"),
                )
                .with_arg(
                    ArgumentSpec::named("reason", ValueType::Text)
                        .short('r')
                        .with_description("Reason recorded with the ban"),
                )
                .with_arg(
                    ArgumentSpec::flag("silent")
                        .short('s')
                        .with_description("Do not announce the ban"),
                )
                .with_help(),
        )
    }
}

impl Command<ServiceHandle> for BanPlayer {
    fn spec(&self) -> &CommandSpec {
        &self.0
    }

    fn execute(&self, ctx: &mut ServiceHandle, values: &BoundValues) -> CommandOutcome {
        let Some(player) = values.text("player") else {
            return CommandOutcome::Failed("no player given".to_string());
        };
        let minutes = values.integer("minutes");
        if minutes.is_some_and(|m| m <= 0) {
            return CommandOutcome::Failed("ban length must be positive".to_string());
        }
        let ban = Ban {
            minutes,
            reason: values.text("reason").map(String::from),
        };

        with_state(ctx, |state| {
            state.online.remove(player);
            let length = match ban.minutes {
                Some(m) => format!("{m} minutes"),
                None => "good".to_string(),
            };
            let mut lines = vec![format!("banned {player} for {length}")];
            if !values.flag("silent") {
                let notice = format!("{player} has been banned");
                state.broadcasts.push(notice.clone());
                lines.push(format!("[broadcast] {notice}"));
            }
            state.bans.insert(player.to_string(), ban);
            CommandOutcome::Done(lines)
        })
    }
}

pub struct Unban(CommandSpec);

impl Default for Unban {
    fn default() -> Self {
        Self(
            CommandSpec::new("unban", "Lift a ban")
                .with_arg(
                    ArgumentSpec::positional("player", ValueType::Text)
                        .with_description("Player to unban"),
                )
                .with_help(),
        )
    }
}

impl Command<ServiceHandle> for Unban {
    fn spec(&self) -> &CommandSpec {
        &self.0
    }

    fn execute(&self, ctx: &mut ServiceHandle, values: &BoundValues) -> CommandOutcome {
        let Some(player) = values.text("player") else {
            return CommandOutcome::Failed("no player given".to_string());
        };
        with_state(ctx, |state| match state.bans.remove(player) {
            Some(_) => CommandOutcome::line(format!("unbanned {player}")),
            None => CommandOutcome::Failed(format!("{player} is not banned")),
        })
    }
}

pub struct Stop(CommandSpec);

impl Default for Stop {
    fn default() -> Self {
        Self(CommandSpec::new("stop", "Shut the service down").with_help())
    }
}

impl Command<ServiceHandle> for Stop {
    fn spec(&self) -> &CommandSpec {
        &self.0
    }

    fn execute(&self, _: &mut ServiceHandle, _: &BoundValues) -> CommandOutcome {
        CommandOutcome::Shutdown
    }
}

/// Global help. Holds a snapshot of the registry taken at startup, which
/// stays accurate because the registry is fixed once the console starts.
pub struct Help {
    spec: CommandSpec,
    specs: Vec<CommandSpec>,
    config: ParserConfig,
    catalog: Catalog,
}

impl Help {
    pub fn new(mut specs: Vec<CommandSpec>, config: ParserConfig, catalog: Catalog) -> Self {
        let spec = CommandSpec::new("help", "List commands, or show help for one")
            .with_arg(
                ArgumentSpec::positional("command", ValueType::Text)
                    .optional()
                    .with_description("Command to describe"),
            )
            .with_help();
        specs.push(spec.clone());
        Self {
            spec,
            specs,
            config,
            catalog,
        }
    }
}

impl Command<ServiceHandle> for Help {
    fn spec(&self) -> &CommandSpec {
        &self.spec
    }

    fn execute(&self, _: &mut ServiceHandle, values: &BoundValues) -> CommandOutcome {
        let formatter = HelpFormatter::new(&self.config).with_text(&self.catalog);
        let text = match values.text("command") {
            Some(name) => match self.specs.iter().find(|spec| spec.is_named(name)) {
                Some(spec) => formatter.help(spec, None),
                None => return CommandOutcome::Failed(format!("no such command: {name}")),
            },
            None => formatter.command_list(self.specs.iter()),
        };
        CommandOutcome::Done(text.lines().map(String::from).collect())
    }
}
