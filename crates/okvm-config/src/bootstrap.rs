//! Two-phase plugin schema bootstrap.
//!
//! Pluggable subsystems declare only a discriminator in the base schema.
//! Phase one resolves the raw tree against that base to learn which
//! plugin each slot selected, the registry supplies each plugin's extra
//! options, the schema is extended, and phase two resolves the same raw
//! tree against the enlarged schema. The extension also seals the slot
//! section, so phase two rejects keys no plugin ever declared.

use std::fmt;

use serde_json::Value;
use thiserror::Error;

use crate::error::{ConfigError, SchemaError};
use crate::resolver::resolve;
use crate::schema::Schema;
use crate::section::{ConfigEntry, ConfigSection};

/// Discriminator option naming the plugin that configures a slot.
pub const TYPE_KEY: &str = "type";

#[derive(Debug, Error)]
#[error("unknown plugin {name:?} for subsystem {subsystem:?}")]
pub struct UnknownPluginError {
    pub subsystem: String,
    pub name: String,
}

/// Contributes additional options to a plugin slot.
pub trait PluginDescriptor {
    fn option_schema(&self) -> Schema;
}

impl fmt::Debug for dyn PluginDescriptor + '_ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PluginDescriptor")
    }
}

/// Looks up plugin descriptors by subsystem and discriminator value.
pub trait PluginRegistry {
    fn lookup(
        &self,
        subsystem: &str,
        name: &str,
    ) -> Result<&dyn PluginDescriptor, UnknownPluginError>;
}

/// One pluggable subsystem section in the schema.
#[derive(Debug, Clone)]
pub struct PluginSlot {
    subsystem: String,
    path: Vec<String>,
    optional: bool,
}

impl PluginSlot {
    /// Slot that must always name a registered plugin.
    pub fn required(subsystem: &str, path: &[&str]) -> Self {
        Self {
            subsystem: subsystem.to_string(),
            path: path.iter().map(|segment| segment.to_string()).collect(),
            optional: false,
        }
    }

    /// Slot that is skipped entirely when its discriminator is empty.
    pub fn optional(subsystem: &str, path: &[&str]) -> Self {
        Self {
            optional: true,
            ..Self::required(subsystem, path)
        }
    }
}

/// Resolve against the base schema, extend it with the options of every
/// selected plugin, then resolve again against the full schema.
pub fn resolve_with_plugins(
    raw: &Value,
    base: &Schema,
    slots: &[PluginSlot],
    registry: &dyn PluginRegistry,
) -> Result<ConfigSection, ConfigError> {
    let first = resolve(raw, base)?;
    let mut schema = base.clone();
    let mut extended = false;
    for slot in slots {
        let name = discriminator(&first, slot)?;
        if slot.optional && name.is_empty() {
            continue;
        }
        let descriptor = registry.lookup(&slot.subsystem, &name)?;
        schema = schema.extend_at(&slot.path, descriptor.option_schema())?;
        extended = true;
    }
    if extended {
        resolve(raw, &schema)
    } else {
        Ok(first)
    }
}

fn discriminator(config: &ConfigSection, slot: &PluginSlot) -> Result<String, ConfigError> {
    let path = slot.path.join("/");
    let section = match config.lookup(&path) {
        Some(ConfigEntry::Section(section)) => section,
        _ => return Err(SchemaError::BadSlot { path }.into()),
    };
    match section.value(TYPE_KEY) {
        Some(Value::String(name)) => Ok(name.clone()),
        Some(_) => Err(SchemaError::BadDiscriminator { path }.into()),
        None => Err(SchemaError::BadSlot { path }.into()),
    }
}
