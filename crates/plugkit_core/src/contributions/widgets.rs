//! Widget contributions.
//!
//! # Responsibility
//! - Point at a command that returns a dock widget instance.
//! - Optionally autogenerate the widget from the command signature.
//!
//! # Invariants
//! - `command` must resolve at use time; this is not checked on load.
//! - Without `autogenerate`, the resolved callable is returned untouched.
//! - With `autogenerate` and no autogenerator, resolution fails with
//!   `ExecutableError::MissingAutogenerator`.

use crate::contributions::validation::{require_command_id, require_non_empty, ContributionResult};
use crate::executable::{Executable, ExecutableError, WidgetAutogenerator};
use crate::registry::{CommandCallable, CommandResolver};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// Contribute a widget that can be added to the viewer.
///
/// The command either returns a widget instance, or, when `autogenerate` is
/// set, is any function an autogeneration backend can build a form for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WidgetContribution {
    pub command: String,
    /// Name shown in the UI.
    pub display_name: String,
    #[serde(default)]
    pub autogenerate: bool,
}

impl WidgetContribution {
    pub fn new(command: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            display_name: display_name.into(),
            autogenerate: false,
        }
    }

    /// Resolves the widget factory for this contribution.
    ///
    /// # Errors
    /// - `ExecutableError::Registry` when `command` does not resolve.
    /// - `ExecutableError::MissingAutogenerator` when `autogenerate` is set
    ///   and `autogenerator` is `None`.
    pub fn get_widget_callable(
        &self,
        registry: &dyn CommandResolver,
        autogenerator: Option<&dyn WidgetAutogenerator>,
    ) -> Result<CommandCallable, ExecutableError> {
        let callable = registry.resolve(&self.command)?;
        if !self.autogenerate {
            return Ok(callable);
        }

        let Some(autogenerator) = autogenerator else {
            warn!(
                "event=widget_resolve module=widgets status=error command={} reason=missing_autogenerator",
                self.command
            );
            return Err(ExecutableError::MissingAutogenerator {
                command: self.command.clone(),
            });
        };
        debug!(
            "event=widget_resolve module=widgets status=ok command={} autogenerator={}",
            self.command,
            autogenerator.name()
        );
        Ok(autogenerator.wrap(&self.command, callable))
    }

    pub(crate) fn validate(&self, path: &str) -> ContributionResult<()> {
        require_command_id(&format!("{path}.command"), &self.command)?;
        require_non_empty(&format!("{path}.display_name"), &self.display_name)
    }
}

impl Executable for WidgetContribution {
    fn command(&self) -> &str {
        &self.command
    }

    /// Same as `get_widget_callable` with no autogenerator.
    ///
    /// The trait has no autogenerator parameter, so a widget with
    /// `autogenerate: true` always fails here (and in `exec`) with
    /// `ExecutableError::MissingAutogenerator`, even when the host has one.
    /// Call `get_widget_callable` to pass the host's autogenerator.
    fn get_callable(
        &self,
        registry: &dyn CommandResolver,
    ) -> Result<CommandCallable, ExecutableError> {
        self.get_widget_callable(registry, None)
    }
}
