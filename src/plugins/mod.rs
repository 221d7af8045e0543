//! Built-in plugin catalog.
//!
//! Each pluggable subsystem ships a fixed set of backends compiled into
//! the daemon. The registry maps (subsystem, discriminator) pairs to the
//! descriptor that contributes the backend's configuration options.

pub mod atx;
pub mod auth;
pub mod hid;
pub mod msd;

use okvm_config::{PluginDescriptor, PluginRegistry, UnknownPluginError};

/// Registry over the plugins compiled into this binary.
pub struct BuiltinRegistry;

impl PluginRegistry for BuiltinRegistry {
    fn lookup(
        &self,
        subsystem: &str,
        name: &str,
    ) -> Result<&dyn PluginDescriptor, UnknownPluginError> {
        match (subsystem, name) {
            ("auth", "htpasswd") => Ok(&auth::Htpasswd),
            ("auth", "http") => Ok(&auth::Http),
            ("hid", "serial") => Ok(&hid::Serial),
            ("hid", "otg") => Ok(&hid::Otg),
            ("atx", "gpio") => Ok(&atx::Gpio),
            ("atx", "disabled") => Ok(&atx::Disabled),
            ("msd", "relay") => Ok(&msd::Relay),
            ("msd", "disabled") => Ok(&msd::Disabled),
            _ => Err(UnknownPluginError {
                subsystem: subsystem.to_string(),
                name: name.to_string(),
            }),
        }
    }
}
