//! The executable side of a console command.

use crate::{BoundValues, CommandSpec};

/// What a handler reports back to the console driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// The command ran; carries lines to show the operator.
    Done(Vec<String>),
    /// The command ran but could not do what was asked.
    Failed(String),
    /// The command asks the host service to shut down.
    Shutdown,
}

impl CommandOutcome {
    /// A successful outcome with a single line of output.
    pub fn line(text: impl Into<String>) -> Self {
        Self::Done(vec![text.into()])
    }

    /// A successful outcome with no output.
    pub fn silent() -> Self {
        Self::Done(Vec::new())
    }
}

/// A console command: its declarative spec plus a handler.
///
/// `C` is the host context handed to every handler; handlers that touch
/// shared service state synchronize through it themselves. Commands are
/// `Send + Sync` so a finished registry can be read from the console thread.
///
/// # Examples
///
/// ```
/// use console_command_core::*;
///
/// struct Echo(CommandSpec);
///
/// impl Default for Echo {
///     fn default() -> Self {
///         Self(CommandSpec::new("echo", "Print text back").with_arg(ArgumentSpec::rest("text")))
///     }
/// }
///
/// impl Command<()> for Echo {
///     fn spec(&self) -> &CommandSpec {
///         &self.0
///     }
///
///     fn execute(&self, _ctx: &mut (), values: &BoundValues) -> CommandOutcome {
///         CommandOutcome::line(values.text("text").unwrap_or_default())
///     }
/// }
///
/// let mut registry = Registry::new();
/// registry.register_default::<Echo>().unwrap();
/// let result = CommandParser::new(&registry).parse("echo hi there").unwrap();
/// let outcome = registry.get("echo").unwrap().execute(&mut (), &result.values);
/// assert_eq!(outcome, CommandOutcome::line("hi there"));
/// ```
pub trait Command<C>: Send + Sync {
    /// The command's grammar and help metadata.
    fn spec(&self) -> &CommandSpec;

    /// Runs the command with the values bound from one line.
    fn execute(&self, ctx: &mut C, values: &BoundValues) -> CommandOutcome;
}
