//! Command engine for line-oriented service consoles.
//!
//! An operator types a line; the engine resolves the first token to a
//! registered command, binds the remaining tokens to typed positional and
//! named arguments, classifies every problem it finds, and hands the
//! result to a driver that decides whether to run the handler.
//!
//! - [`ArgumentSpec`] / [`CommandSpec`] — declarative grammar and help
//!   metadata for one command.
//! - [`Command`] — a spec plus a handler, generic over the host context.
//! - [`Registry`] — registered commands, case-insensitive lookup,
//!   registration-order listing.
//! - [`tokenize`] — whitespace splitting with quoted substrings.
//! - [`CommandParser`] — matches tokens against a spec and produces a
//!   [`ParseResult`].
//! - [`HelpFormatter`] — usage lines, per-argument help tables, and
//!   command listings.
//! - [`Console`] — the read-parse-dispatch loop.
//!
//! Messages and labels go through a [`TextSource`]; [`IdentityText`]
//! (English) is the default and a [`Catalog`] can translate them.
//!
//! # Example
//!
//! ```
//! use console_command_core::*;
//!
//! struct Kick(CommandSpec);
//!
//! impl Default for Kick {
//!     fn default() -> Self {
//!         Self(
//!             CommandSpec::new("kick", "Disconnect a player")
//!                 .with_arg(ArgumentSpec::positional("player", ValueType::Text))
//!                 .with_arg(ArgumentSpec::flag("verbose").short('v'))
//!                 .with_help(),
//!         )
//!     }
//! }
//!
//! impl Command<Vec<String>> for Kick {
//!     fn spec(&self) -> &CommandSpec {
//!         &self.0
//!     }
//!
//!     fn execute(&self, kicked: &mut Vec<String>, values: &BoundValues) -> CommandOutcome {
//!         let Some(player) = values.text("player") else {
//!             return CommandOutcome::Failed("no player given".into());
//!         };
//!         kicked.push(player.to_string());
//!         CommandOutcome::silent()
//!     }
//! }
//!
//! let mut registry = Registry::new();
//! registry.register_default::<Kick>().unwrap();
//!
//! let parser = CommandParser::new(&registry);
//! let result = parser.parse("KICK bob -v extra").unwrap();
//! assert_eq!(result.command.unwrap().name, "kick");
//! assert!(result.values.flag("verbose"));
//! assert_eq!(result.unconsumed, vec!["extra"]);
//! assert!(result.is_dispatchable());
//!
//! let unknown = parser.parse("frobnicate").unwrap();
//! assert!(unknown.command.is_none());
//! assert!(unknown.has_fatal());
//! ```

mod command;
mod config;
mod driver;
mod error;
mod help;
mod matcher;
mod registry;
mod result;
mod text;
mod tokenizer;
mod types;
mod validate;

pub use command::{Command, CommandOutcome};
pub use config::{ConsoleConfig, ParserConfig};
pub use driver::{Console, ExitReason, LineOutcome};
pub use error::{ConsoleError, Result};
pub use help::HelpFormatter;
pub use matcher::CommandParser;
pub use registry::Registry;
pub use result::{BoundValue, BoundValues, ErrorKind, ParseError, ParseResult};
pub use text::{Catalog, IdentityText, TextSource, keys, render, type_label};
pub use tokenizer::tokenize;
pub use types::*;
pub use validate::{SpecError, validate_command_spec};
