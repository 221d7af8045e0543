//! OKVM Configuration Engine
//!
//! Schema-driven configuration for the daemon: raw trees merged from a
//! file, CLI overrides, and the embedded override block are resolved
//! against a declarative schema into a typed, strictly validated tree.
//! Pluggable subsystems contribute their options through the two-phase
//! bootstrap in [`bootstrap`].

pub mod bootstrap;
pub mod dumper;
pub mod error;
pub mod merge;
pub mod overrides;
pub mod resolver;
pub mod schema;
pub mod section;

pub use bootstrap::{
    resolve_with_plugins, PluginDescriptor, PluginRegistry, PluginSlot, UnknownPluginError,
    TYPE_KEY,
};
pub use dumper::make_config_dump;
pub use error::{ConfigError, SchemaError};
pub use merge::{apply_override_block, deep_merge, OVERRIDE_KEY};
pub use overrides::build_raw_from_overrides;
pub use resolver::resolve;
pub use schema::{CoerceFn, Condition, OptionDef, Schema, SchemaEntry};
pub use section::{ConfigEntry, ConfigSection, OptionMeta};
