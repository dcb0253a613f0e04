//! The set of commands a console understands.
//!
//! Commands are registered once at startup and the registry is read-only
//! afterwards. Lookups are case-insensitive; listing preserves
//! registration order for global help.

use std::collections::HashMap;
use std::fmt;

use tracing::info;

use crate::error::{ConsoleError, Result};
use crate::{Command, CommandSpec, validate_command_spec};

/// Registered commands, indexed by lower-cased name.
pub struct Registry<C> {
    commands: Vec<Box<dyn Command<C>>>,
    by_name: HashMap<String, usize>,
}

impl<C> Registry<C> {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
            by_name: HashMap::new(),
        }
    }

    /// Registers a command.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::InvalidSpec`] if the spec fails validation, or
    /// [`ConsoleError::DuplicateCommand`] if a command with the same
    /// case-insensitive name exists. The registry is unchanged on error.
    ///
    /// # Examples
    ///
    /// ```
    /// use console_command_core::*;
    ///
    /// struct Stop(CommandSpec);
    ///
    /// impl Command<()> for Stop {
    ///     fn spec(&self) -> &CommandSpec {
    ///         &self.0
    ///     }
    ///     fn execute(&self, _: &mut (), _: &BoundValues) -> CommandOutcome {
    ///         CommandOutcome::Shutdown
    ///     }
    /// }
    ///
    /// let mut registry = Registry::new();
    /// registry.register(Stop(CommandSpec::new("stop", "Stop the service"))).unwrap();
    /// let err = registry.register(Stop(CommandSpec::new("STOP", ""))).unwrap_err();
    /// assert!(matches!(err, ConsoleError::DuplicateCommand(_)));
    /// assert_eq!(registry.len(), 1);
    /// ```
    pub fn register(&mut self, command: impl Command<C> + 'static) -> Result<()> {
        self.register_boxed(Box::new(command))
    }

    /// Registers a command type through its [`Default`] constructor.
    pub fn register_default<T>(&mut self) -> Result<()>
    where
        T: Command<C> + Default + 'static,
    {
        self.register(T::default())
    }

    /// Registers an already boxed command.
    pub fn register_boxed(&mut self, command: Box<dyn Command<C>>) -> Result<()> {
        let spec = command.spec();
        if let Some(source) = validate_command_spec(spec).into_iter().next() {
            return Err(ConsoleError::InvalidSpec {
                command: spec.name.clone(),
                source,
            });
        }

        let key = spec.name.to_lowercase();
        if self.by_name.contains_key(&key) {
            return Err(ConsoleError::DuplicateCommand(spec.name.clone()));
        }

        info!(
            command = %spec.name,
            arguments = spec.arguments.len(),
            "registered console command"
        );
        self.by_name.insert(key, self.commands.len());
        self.commands.push(command);
        Ok(())
    }

    /// Looks up a command's spec by case-insensitive name.
    pub fn resolve(&self, name: &str) -> Option<&CommandSpec> {
        self.get(name).map(|command| command.spec())
    }

    /// Looks up the executable command by case-insensitive name.
    pub fn get(&self, name: &str) -> Option<&dyn Command<C>> {
        self.by_name
            .get(&name.to_lowercase())
            .map(|&index| self.commands[index].as_ref())
    }

    /// All specs in registration order. The iterator is cheap to clone, so
    /// callers can walk it more than once.
    pub fn all(&self) -> impl Iterator<Item = &CommandSpec> + Clone + '_ {
        self.commands.iter().map(|command| command.spec())
    }

    /// Number of registered commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl<C> Default for Registry<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> fmt::Debug for Registry<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.all().map(|spec| &spec.name))
            .finish()
    }
}
