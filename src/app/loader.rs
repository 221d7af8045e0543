//! Config file loading.
//!
//! Reads a YAML file into a raw tree for the resolver. Parsing stops
//! here; everything after this point works on plain JSON values.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("config file {0:?} does not exist")]
    NotFound(PathBuf),

    #[error("unable to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid YAML: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("config file {0:?} must contain a mapping")]
    NotMapping(PathBuf),
}

/// Load a YAML file as a raw config tree.
///
/// An empty file yields an empty tree; any other non-mapping document
/// is an error here rather than a confusing one later in resolution.
pub fn load_yaml_file(path: &Path) -> Result<Value, LoaderError> {
    if !path.exists() {
        return Err(LoaderError::NotFound(path.to_path_buf()));
    }
    let text = fs::read_to_string(path)?;
    let value: Value = serde_yaml::from_str(&text)?;
    match value {
        Value::Null => Ok(Value::Object(serde_json::Map::new())),
        value @ Value::Object(_) => Ok(value),
        _ => Err(LoaderError::NotMapping(path.to_path_buf())),
    }
}
