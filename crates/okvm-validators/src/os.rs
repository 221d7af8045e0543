//! Filesystem and process validators.

use std::path::Path;

use serde_json::Value;

use crate::basic::valid_number;
use crate::{check_not_none_string, ValidatorError};

/// Absolute path, lexically normalized.
pub fn valid_abs_path(arg: &Value) -> Result<Value, ValidatorError> {
    abs_path(arg, "absolute path", false)
}

/// Absolute path that exists on this machine.
pub fn valid_abs_path_exists(arg: &Value) -> Result<Value, ValidatorError> {
    abs_path(arg, "existent absolute path", true)
}

fn abs_path(arg: &Value, name: &str, must_exist: bool) -> Result<Value, ValidatorError> {
    let text = check_not_none_string(arg, name, true)?;
    if !text.starts_with('/') {
        return Err(ValidatorError::new(arg, name));
    }
    let path = normalize(&text);
    if must_exist && !Path::new(&path).exists() {
        return Err(ValidatorError::new(arg, name));
    }
    Ok(Value::String(path))
}

/// Collapses `.`, `..` and repeated slashes without touching the filesystem.
fn normalize(path: &str) -> String {
    let mut parts: Vec<&str> = Vec::new();
    for part in path.split('/') {
        match part {
            "" | "." => {}
            ".." => {
                parts.pop();
            }
            part => parts.push(part),
        }
    }
    format!("/{}", parts.join("/"))
}

/// Numeric UNIX file mode.
pub fn valid_unix_mode(arg: &Value) -> Result<Value, ValidatorError> {
    valid_number(arg, Some(0), None, "UNIX mode").map(Value::from)
}

/// Command line as a list of strings (or one whitespace-separated string)
/// whose first element is an absolute executable path.
pub fn valid_command(arg: &Value) -> Result<Value, ValidatorError> {
    let name = "command";
    let parts: Vec<String> = match arg {
        Value::String(text) => text.split_whitespace().map(str::to_string).collect(),
        Value::Array(items) => {
            let mut parts = Vec::with_capacity(items.len());
            for item in items {
                parts.push(check_not_none_string(item, name, true)?);
            }
            parts
        }
        _ => return Err(ValidatorError::new(arg, name)),
    };
    if parts.is_empty() {
        return Err(ValidatorError::new(arg, name));
    }
    let mut command = Vec::with_capacity(parts.len());
    command.push(valid_abs_path(&Value::String(parts[0].clone()))?);
    command.extend(parts.into_iter().skip(1).map(Value::String));
    Ok(Value::Array(command))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_valid_abs_path_normalizes() {
        assert_eq!(valid_abs_path(&json!("/run/okvmd.sock")).unwrap(), json!("/run/okvmd.sock"));
        assert_eq!(valid_abs_path(&json!("/a/./b/../c/")).unwrap(), json!("/a/c"));
        assert_eq!(valid_abs_path(&json!("  /tmp  ")).unwrap(), json!("/tmp"));
    }

    #[test]
    fn test_valid_abs_path_rejects_relative_and_empty() {
        assert!(valid_abs_path(&json!("relative/path")).is_err());
        assert!(valid_abs_path(&json!("")).is_err());
        assert!(valid_abs_path(&json!(null)).is_err());
    }

    #[test]
    fn test_valid_abs_path_exists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().to_str().unwrap().to_string();
        assert_eq!(valid_abs_path_exists(&json!(path)).unwrap(), json!(path));
        let missing = format!("{}/missing", path);
        let err = valid_abs_path_exists(&json!(missing)).unwrap_err();
        assert!(err.to_string().contains("existent absolute path"));
    }

    #[test]
    fn test_valid_unix_mode() {
        assert_eq!(valid_unix_mode(&json!(0)).unwrap(), json!(0));
        assert_eq!(valid_unix_mode(&json!("493")).unwrap(), json!(493));
        assert!(valid_unix_mode(&json!(-1)).is_err());
    }

    #[test]
    fn test_valid_command_from_list() {
        let command = valid_command(&json!(["/usr/bin/env", "FOO=1"])).unwrap();
        assert_eq!(command, json!(["/usr/bin/env", "FOO=1"]));
    }

    #[test]
    fn test_valid_command_from_string() {
        let command = valid_command(&json!("/bin/sh -c ls")).unwrap();
        assert_eq!(command, json!(["/bin/sh", "-c", "ls"]));
    }

    #[test]
    fn test_valid_command_rejects_relative_and_empty() {
        assert!(valid_command(&json!([])).is_err());
        assert!(valid_command(&json!(["sh", "-c"])).is_err());
        assert!(valid_command(&json!(42)).is_err());
    }
}
