//! Usage lines and help tables rendered from command specs.
//!
//! Everything here is a pure function of spec metadata (plus, optionally,
//! the values bound from a line to mark what was supplied). Nothing is
//! executed and no parse result is modified.

use crate::text::{IdentityText, TextSource, keys, render, type_label};
use crate::{ArgumentSpec, BoundValues, CommandSpec, ParserConfig};

/// Renders usage and help text.
///
/// # Examples
///
/// ```
/// use console_command_core::*;
///
/// let spec = CommandSpec::new("ban", "Ban a player")
///     .with_arg(ArgumentSpec::positional("player", ValueType::Text))
///     .with_arg(ArgumentSpec::positional("minutes", ValueType::Integer).optional())
///     .with_arg(ArgumentSpec::named("reason", ValueType::Text).short('r'))
///     .with_arg(ArgumentSpec::flag("silent").short('s'));
///
/// let config = ParserConfig::default();
/// let help = HelpFormatter::new(&config);
/// assert_eq!(
///     help.usage(&spec),
///     "ban player [minutes] [--reason <text>] [--silent]"
/// );
/// ```
pub struct HelpFormatter<'a> {
    config: &'a ParserConfig,
    text: &'a dyn TextSource,
}

impl<'a> HelpFormatter<'a> {
    /// Creates a formatter with untranslated labels.
    pub fn new(config: &'a ParserConfig) -> Self {
        Self {
            config,
            text: &IdentityText,
        }
    }

    /// Uses a message catalog for labels.
    pub fn with_text(mut self, text: &'a dyn TextSource) -> Self {
        self.text = text;
        self
    }

    /// The command name followed by every argument; optional ones bracketed.
    pub fn usage(&self, spec: &CommandSpec) -> String {
        let mut parts = vec![spec.name.clone()];
        for arg in spec.positionals().chain(spec.named()) {
            let shown = self.usage_term(arg);
            parts.push(if arg.required {
                shown
            } else {
                format!("[{shown}]")
            });
        }
        parts.join(" ")
    }

    /// The usage string wrapped in the localized `usage: ...` template.
    pub fn usage_line(&self, spec: &CommandSpec) -> String {
        let usage = self.usage(spec);
        render(&self.text.resolve(keys::USAGE), &[("usage", usage.as_str())])
    }

    /// Usage, description and a row per argument. When `supplied` is given,
    /// arguments bound on the current line are marked with `*`.
    pub fn help(&self, spec: &CommandSpec, supplied: Option<&BoundValues>) -> String {
        let mut out = String::new();
        out.push_str(&self.usage_line(spec));
        out.push('\n');
        if !spec.description.is_empty() {
            out.push_str(&spec.description);
            out.push('\n');
        }
        if spec.arguments.is_empty() {
            return out;
        }

        let required = self.text.resolve(keys::REQUIRED);
        let optional = self.text.resolve(keys::OPTIONAL);
        let rows: Vec<[String; 4]> = spec
            .positionals()
            .chain(spec.named())
            .map(|arg| {
                let mark = match supplied {
                    Some(values) if values.contains(&arg.name) => "*",
                    _ => " ",
                };
                let marker = if arg.required { &required } else { &optional };
                [
                    format!("{mark} {}", self.display_name(arg)),
                    type_label(&arg.value_type, self.text),
                    marker.to_string(),
                    arg.description.clone(),
                ]
            })
            .collect();

        out.push('\n');
        out.push_str(&self.text.resolve(keys::ARGUMENTS_HEADER));
        out.push('\n');
        out.push_str(&table(&rows));
        out
    }

    /// One line per command, in the order given.
    pub fn command_list<'s>(&self, specs: impl Iterator<Item = &'s CommandSpec>) -> String {
        let rows: Vec<[String; 2]> = specs
            .map(|spec| [format!("  {}", spec.name), spec.description.clone()])
            .collect();

        let mut out = String::new();
        out.push_str(&self.text.resolve(keys::COMMANDS_HEADER));
        out.push('\n');
        out.push_str(&table(&rows));
        out
    }

    fn usage_term(&self, arg: &ArgumentSpec) -> String {
        if arg.positional {
            if arg.variadic {
                format!("{}...", arg.name)
            } else {
                arg.name.clone()
            }
        } else if arg.flag {
            format!("{}{}", self.config.long_prefix, arg.name)
        } else {
            format!(
                "{}{} <{}>",
                self.config.long_prefix,
                arg.name,
                type_label(&arg.value_type, self.text)
            )
        }
    }

    fn display_name(&self, arg: &ArgumentSpec) -> String {
        if arg.positional {
            return self.usage_term(arg);
        }
        let long = format!("{}{}", self.config.long_prefix, arg.name);
        match arg.short {
            Some(short) => format!("{}{short}, {long}", self.config.short_prefix),
            None => {
                let pad = " ".repeat(self.config.short_prefix.chars().count() + 3);
                format!("{pad}{long}")
            }
        }
    }
}

/// Left-aligns columns, two spaces apart; the last column is not padded.
fn table<const N: usize>(rows: &[[String; N]]) -> String {
    let mut widths = [0usize; N];
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    for row in rows {
        let mut line = String::new();
        for (i, cell) in row.iter().enumerate() {
            if i + 1 == N {
                line.push_str(cell);
            } else {
                let pad = widths[i] - cell.chars().count();
                line.push_str(cell);
                line.push_str(&" ".repeat(pad + 2));
            }
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}
