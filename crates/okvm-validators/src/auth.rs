//! User and credential validators.

use regex_lite::Regex;
use serde_json::Value;

use crate::{check_re_match, ValidatorError};

/// Lowercase POSIX-style user name.
pub fn valid_user(arg: &Value) -> Result<Value, ValidatorError> {
    let pattern = Regex::new(r"^[a-z_][a-z0-9_\-]*$").unwrap();
    check_re_match(arg, "username characters", &pattern, true, false).map(Value::String)
}

/// List of user names, given as a list or one whitespace-separated string.
pub fn valid_users_list(arg: &Value) -> Result<Value, ValidatorError> {
    let name = "users list";
    let items: Vec<Value> = match arg {
        Value::String(text) => text
            .split_whitespace()
            .map(|user| Value::String(user.to_string()))
            .collect(),
        Value::Array(items) => items.clone(),
        _ => return Err(ValidatorError::new(arg, name)),
    };
    let mut users = Vec::with_capacity(items.len());
    for item in &items {
        users.push(valid_user(item)?);
    }
    Ok(Value::Array(users))
}

/// Printable-ASCII password. Failures never echo the value.
pub fn valid_passwd(arg: &Value) -> Result<Value, ValidatorError> {
    let pattern = Regex::new(r"^[\x20-\x7e]*$").unwrap();
    check_re_match(arg, "passwd characters", &pattern, false, true).map(Value::String)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_valid_user() {
        assert_eq!(valid_user(&json!("admin")).unwrap(), json!("admin"));
        assert_eq!(valid_user(&json!("_kvm-user2")).unwrap(), json!("_kvm-user2"));
        assert!(valid_user(&json!("Admin")).is_err());
        assert!(valid_user(&json!("9name")).is_err());
        assert!(valid_user(&json!("")).is_err());
    }

    #[test]
    fn test_valid_users_list_from_array() {
        let users = valid_users_list(&json!(["admin", "guest"])).unwrap();
        assert_eq!(users, json!(["admin", "guest"]));
        assert_eq!(valid_users_list(&json!([])).unwrap(), json!([]));
    }

    #[test]
    fn test_valid_users_list_from_string() {
        let users = valid_users_list(&json!("admin guest")).unwrap();
        assert_eq!(users, json!(["admin", "guest"]));
    }

    #[test]
    fn test_valid_users_list_rejects_bad_member() {
        assert!(valid_users_list(&json!(["admin", "BAD"])).is_err());
        assert!(valid_users_list(&json!(42)).is_err());
    }

    #[test]
    fn test_valid_passwd_conceals_value() {
        assert_eq!(valid_passwd(&json!("hunter2")).unwrap(), json!("hunter2"));
        assert_eq!(valid_passwd(&json!("")).unwrap(), json!(""));
        let err = valid_passwd(&json!("p\u{0444}ss")).unwrap_err();
        assert!(err.is_secret());
        assert_eq!(err.to_string(), "the argument is not a valid passwd characters");
    }
}
