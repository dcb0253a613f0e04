//! The read-parse-dispatch loop.
//!
//! [`Console`] reads one line at a time, parses it, prints diagnostics and
//! either renders help, rejects the line, or runs the handler. One line is
//! fully handled before the next is read. The loop ends at end of input,
//! when the shutdown flag is seen between lines, or when a handler asks
//! for shutdown.

use std::io::{self, BufRead, Write};
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, info, warn};

use crate::text::{keys, render};
use crate::{CommandOutcome, CommandParser, HelpFormatter, ParseError};

/// Why [`Console::run`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    /// The input stream closed.
    EndOfInput,
    /// The shutdown flag was set by someone else.
    ShutdownSignal,
    /// A command returned [`CommandOutcome::Shutdown`].
    ShutdownRequested,
}

/// What happened to a single line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    /// Blank line; nothing was parsed.
    Skipped,
    /// A fatal error kept the handler from running.
    Rejected,
    /// Help was printed instead of running the handler.
    HelpShown,
    /// The handler ran.
    Executed(CommandOutcome),
}

/// A console bound to a parser and a prompt.
///
/// # Examples
///
/// ```
/// use std::sync::atomic::AtomicBool;
/// use console_command_core::*;
///
/// struct Count(CommandSpec);
///
/// impl Command<u32> for Count {
///     fn spec(&self) -> &CommandSpec {
///         &self.0
///     }
///     fn execute(&self, total: &mut u32, values: &BoundValues) -> CommandOutcome {
///         *total += values.integer("n").unwrap_or(1) as u32;
///         CommandOutcome::line(format!("total {total}"))
///     }
/// }
///
/// let mut registry = Registry::new();
/// registry
///     .register(Count(
///         CommandSpec::new("add", "Add to the total")
///             .with_arg(ArgumentSpec::positional("n", ValueType::Integer).optional()),
///     ))
///     .unwrap();
///
/// let console = Console::new(CommandParser::new(&registry)).with_prompt("");
/// let mut total = 0;
/// let mut out = Vec::new();
/// let reason = console
///     .run("add 2\n\nadd\n".as_bytes(), &mut out, &mut total, &AtomicBool::new(false))
///     .unwrap();
///
/// assert_eq!(reason, ExitReason::EndOfInput);
/// assert_eq!(total, 3);
/// assert_eq!(String::from_utf8(out).unwrap(), "total 2\ntotal 3\n");
/// ```
pub struct Console<'r, C> {
    parser: CommandParser<'r, C>,
    prompt: String,
}

impl<'r, C> Console<'r, C> {
    /// Creates a console with the default `> ` prompt.
    pub fn new(parser: CommandParser<'r, C>) -> Self {
        Self {
            parser,
            prompt: "> ".to_string(),
        }
    }

    /// Sets the prompt; an empty prompt writes nothing.
    pub fn with_prompt(mut self, prompt: &str) -> Self {
        self.prompt = prompt.to_string();
        self
    }

    pub fn parser(&self) -> &CommandParser<'r, C> {
        &self.parser
    }

    /// A help formatter sharing the parser's prefixes and text source.
    pub fn formatter(&self) -> HelpFormatter<'_> {
        HelpFormatter::new(self.parser.config()).with_text(self.parser.text())
    }

    /// Handles one line, writing everything for the operator to `out`.
    pub fn process_line<W: Write>(
        &self,
        line: &str,
        ctx: &mut C,
        out: &mut W,
    ) -> io::Result<LineOutcome> {
        let Some(result) = self.parser.parse(line) else {
            return Ok(LineOutcome::Skipped);
        };

        let Some(spec) = result.command else {
            for err in &result.errors {
                self.report(out, err)?;
            }
            return Ok(LineOutcome::Rejected);
        };

        let formatter = self.formatter();
        if result.help_requested() {
            debug!(command = %spec.name, "showing command help");
            write!(out, "{}", formatter.help(spec, Some(&result.values)))?;
            return Ok(LineOutcome::HelpShown);
        }

        for err in &result.errors {
            self.report(out, err)?;
        }
        if result.has_fatal() {
            warn!(
                command = %spec.name,
                errors = result.fatal_errors().count(),
                "console line rejected"
            );
            writeln!(out, "{}", formatter.usage_line(spec))?;
            return Ok(LineOutcome::Rejected);
        }

        let Some(command) = self.parser.registry().get(&spec.name) else {
            return Ok(LineOutcome::Rejected);
        };
        info!(command = %spec.name, "dispatching console command");
        let outcome = command.execute(ctx, &result.values);
        match &outcome {
            CommandOutcome::Done(lines) => {
                for line in lines {
                    writeln!(out, "{line}")?;
                }
            }
            CommandOutcome::Failed(message) => {
                let template = self.parser.text().resolve(keys::ERROR_LINE);
                writeln!(out, "{}", render(&template, &[("message", message.as_str())]))?;
            }
            CommandOutcome::Shutdown => {}
        }
        Ok(LineOutcome::Executed(outcome))
    }

    /// Runs until end of input, a shutdown request, or `shutdown` is set.
    pub fn run<R: BufRead, W: Write>(
        &self,
        mut input: R,
        mut out: W,
        ctx: &mut C,
        shutdown: &AtomicBool,
    ) -> io::Result<ExitReason> {
        let mut line = String::new();
        loop {
            if shutdown.load(Ordering::SeqCst) {
                info!("console stopping on shutdown signal");
                return Ok(ExitReason::ShutdownSignal);
            }
            if !self.prompt.is_empty() {
                write!(out, "{}", self.prompt)?;
                out.flush()?;
            }

            line.clear();
            if input.read_line(&mut line)? == 0 {
                info!("console input closed");
                return Ok(ExitReason::EndOfInput);
            }

            let outcome = self.process_line(&line, ctx, &mut out)?;
            out.flush()?;
            if outcome == LineOutcome::Executed(CommandOutcome::Shutdown) {
                info!("console stopping on shutdown command");
                return Ok(ExitReason::ShutdownRequested);
            }
        }
    }

    fn report<W: Write>(&self, out: &mut W, err: &ParseError) -> io::Result<()> {
        let key = if err.fatal {
            keys::ERROR_LINE
        } else {
            keys::WARNING_LINE
        };
        let message = err.to_string();
        let template = self.parser.text().resolve(key);
        writeln!(out, "{}", render(&template, &[("message", message.as_str())]))
    }
}
