//! Configuration error types.
//!
//! `ConfigError` covers everything that can go wrong between reading raw
//! input and producing a resolved tree. `SchemaError` is reserved for
//! mistakes in schema declarations themselves, which are authoring bugs
//! rather than bad user input.

use thiserror::Error;

use okvm_validators::ValidatorError;

use crate::bootstrap::UnknownPluginError;

/// Mistakes in a schema declaration, as opposed to bad configuration input.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("option {path:?} depends on missing key {target:?}")]
    MissingDependency { path: String, target: String },

    #[error("option {path:?} depends on {target:?} which is a section, not an option")]
    SectionDependency { path: String, target: String },

    #[error("option {path:?} is both conditional and a dependency target")]
    ChainedDependency { path: String },

    #[error("schema path {path:?} does not name a section")]
    BadExtensionPath { path: String },

    #[error("schema extension at {path:?} collides with existing key {key:?}")]
    ExtensionCollision { path: String, key: String },

    #[error("plugin slot {path:?} does not name a section with a 'type' option")]
    BadSlot { path: String },

    #[error("plugin type at {path:?} must be a string")]
    BadDiscriminator { path: String },
}

/// Any failure while building or resolving a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("empty option key (expected 'key=value', got {token:?})")]
    EmptyOptionKey { token: String },

    #[error("no value for option key {key:?}")]
    MissingOptionValue { key: String },

    #[error("invalid literal {literal:?} for option key {key:?}")]
    BadOptionLiteral { key: String, literal: String },

    #[error("the node {path:?} must be a mapping")]
    NotMapping { path: String },

    #[error("invalid value {value} for key {path:?}: {reason}")]
    Validation {
        path: String,
        value: String,
        reason: ValidatorError,
    },

    #[error("unknown key {path:?}")]
    UnknownKey { path: String },

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    UnknownPlugin(#[from] UnknownPluginError),
}
