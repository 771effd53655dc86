//! Contributions that point at a registered command.
//!
//! # Responsibility
//! - Resolve a contribution's `command` into a callable.
//! - Define the optional widget autogeneration seam.
//!
//! # Invariants
//! - Registry failures are propagated unchanged, never masked.
//! - A missing autogenerator is reported as its own error.

use crate::registry::{CommandCallable, CommandInvokeError, CommandRegistryError, CommandResolver};
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Builds a widget callable from a plain command signature.
///
/// Hosts that ship a widget autogeneration backend provide one of these;
/// hosts that do not simply pass `None` where one is accepted.
pub trait WidgetAutogenerator {
    /// Backend name used in diagnostics.
    fn name(&self) -> &str;

    fn wrap(&self, command_id: &str, callable: CommandCallable) -> CommandCallable;
}

/// Errors raised while resolving or running an executable contribution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutableError {
    Registry(CommandRegistryError),
    MissingAutogenerator { command: String },
    Invocation(CommandInvokeError),
}

impl Display for ExecutableError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Registry(err) => write!(f, "{err}"),
            Self::MissingAutogenerator { command } => write!(
                f,
                "widget `{command}` requests autogeneration, but no widget autogenerator is installed; \
                 install one or set `autogenerate` to false"
            ),
            Self::Invocation(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ExecutableError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Registry(err) => Some(err),
            Self::MissingAutogenerator { .. } => None,
            Self::Invocation(err) => Some(err),
        }
    }
}

impl From<CommandRegistryError> for ExecutableError {
    fn from(value: CommandRegistryError) -> Self {
        Self::Registry(value)
    }
}

impl From<CommandInvokeError> for ExecutableError {
    fn from(value: CommandInvokeError) -> Self {
        Self::Invocation(value)
    }
}

/// A contribution backed by a registered command.
pub trait Executable {
    /// Command identifier, `<plugin_name>.<command>`.
    fn command(&self) -> &str;

    /// Plugin name prefix of the command identifier.
    fn plugin_name(&self) -> &str {
        let command = self.command().trim();
        command.split_once('.').map_or(command, |(plugin, _)| plugin)
    }

    fn get_callable(
        &self,
        registry: &dyn CommandResolver,
    ) -> Result<CommandCallable, ExecutableError> {
        Ok(registry.resolve(self.command())?)
    }

    /// Resolves and invokes the command with positional arguments.
    fn exec(&self, args: &[Value], registry: &dyn CommandResolver) -> Result<Value, ExecutableError> {
        let callable = self.get_callable(registry)?;
        Ok(callable(args)?)
    }
}
