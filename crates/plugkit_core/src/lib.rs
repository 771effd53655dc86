//! Plugin contribution schema for the image viewer host.
//! This crate defines what a plugin may declare and how declared commands
//! are resolved; loading and running plugins is left to the host.

pub mod contributions;
pub mod executable;
pub mod logging;
pub mod registry;

pub use contributions::commands::{CommandContribution, Icon, ThemedIcon};
pub use contributions::configuration::{
    ConfigurationContribution, ConfigurationProperty, PropertyType, PropertyTypes,
};
pub use contributions::keybindings::{KeyBindingContribution, Platform};
pub use contributions::menus::{MenuCommand, MenuItem, SubmenuContribution, SubmenuItem};
pub use contributions::readers::{ReaderContribution, ReaderMatcher};
pub use contributions::sample_data::{SampleDataContribution, SampleDataGenerator, SampleDataUri};
pub use contributions::themes::{ThemeColors, ThemeContribution, ThemeType};
pub use contributions::validation::{ContributionError, ContributionResult};
pub use contributions::widgets::WidgetContribution;
pub use contributions::writers::{LayerTypeConstraint, WriterContribution};
pub use contributions::{normalize_configuration, ContributionPoints};
pub use executable::{Executable, ExecutableError, WidgetAutogenerator};
pub use logging::{default_log_level, init_logging, init_logging_from_env, logging_status};
pub use registry::{
    CommandCallable, CommandInvokeError, CommandRegistry, CommandRegistryError, CommandResolver,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
