//! In-process command registry.
//!
//! # Responsibility
//! - Map command identifiers to callables.
//! - Resolve identifiers referenced by executable contributions.
//!
//! # Invariants
//! - Identifiers are stored trimmed and are unique.
//! - Resolution is a pure read.

use crate::contributions::validation::is_valid_command_id;
use log::debug;
use serde_json::Value;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// Failure reported by a command implementation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInvokeError {
    pub command: String,
    pub message: String,
}

impl CommandInvokeError {
    pub fn new(command: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            message: message.into(),
        }
    }
}

impl Display for CommandInvokeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "command `{}` failed: {}", self.command, self.message)
    }
}

impl Error for CommandInvokeError {}

/// Shared handle to a registered command implementation.
pub type CommandCallable =
    Arc<dyn Fn(&[Value]) -> Result<Value, CommandInvokeError> + Send + Sync>;

/// Command registration/lookup errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandRegistryError {
    InvalidCommandId(String),
    DuplicateCommandId(String),
    CommandNotFound(String),
}

impl Display for CommandRegistryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidCommandId(value) => write!(f, "command id is invalid: {value}"),
            Self::DuplicateCommandId(value) => {
                write!(f, "command id already registered: {value}")
            }
            Self::CommandNotFound(value) => write!(f, "command not found: {value}"),
        }
    }
}

impl Error for CommandRegistryError {}

/// Lookup seam used by executable contributions.
pub trait CommandResolver {
    fn resolve(&self, command_id: &str) -> Result<CommandCallable, CommandRegistryError>;
}

/// Runtime command registry.
#[derive(Default)]
pub struct CommandRegistry {
    commands: BTreeMap<String, CommandCallable>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers one command implementation.
    pub fn register(
        &mut self,
        command_id: &str,
        callable: CommandCallable,
    ) -> Result<(), CommandRegistryError> {
        let command_id = command_id.trim().to_string();
        if !is_valid_command_id(&command_id) {
            return Err(CommandRegistryError::InvalidCommandId(command_id));
        }
        if self.commands.contains_key(command_id.as_str()) {
            return Err(CommandRegistryError::DuplicateCommandId(command_id));
        }

        debug!("event=command_register module=registry status=ok command={command_id}");
        self.commands.insert(command_id, callable);
        Ok(())
    }

    /// Registers a plain closure.
    pub fn register_fn<F>(&mut self, command_id: &str, func: F) -> Result<(), CommandRegistryError>
    where
        F: Fn(&[Value]) -> Result<Value, CommandInvokeError> + Send + Sync + 'static,
    {
        self.register(command_id, Arc::new(func))
    }

    /// Removes one command, returning its callable when present.
    pub fn unregister(&mut self, command_id: &str) -> Option<CommandCallable> {
        let removed = self.commands.remove(command_id.trim());
        if removed.is_some() {
            debug!(
                "event=command_unregister module=registry status=ok command={}",
                command_id.trim()
            );
        }
        removed
    }

    pub fn contains(&self, command_id: &str) -> bool {
        self.commands.contains_key(command_id.trim())
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Returns sorted command ids.
    pub fn command_ids(&self) -> Vec<String> {
        self.commands.keys().cloned().collect()
    }
}

impl CommandResolver for CommandRegistry {
    fn resolve(&self, command_id: &str) -> Result<CommandCallable, CommandRegistryError> {
        let normalized = command_id.trim();
        self.commands
            .get(normalized)
            .cloned()
            .ok_or_else(|| CommandRegistryError::CommandNotFound(normalized.to_string()))
    }
}
