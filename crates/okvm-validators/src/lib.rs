//! Value validators for okvmd configuration options.
//!
//! Every validator accepts a raw `serde_json::Value` and either returns the
//! normalized value or fails with [`ValidatorError`]. The config engine uses
//! them as option coercion functions; daemon code can call them directly on
//! API arguments.

pub mod auth;
pub mod basic;
pub mod hw;
pub mod kvm;
pub mod net;
pub mod os;

use regex_lite::Regex;
use serde_json::Value;
use thiserror::Error;

/// Uniform validation failure.
///
/// The message always reads `the argument <value> is not a valid <what>`.
/// Validators for credentials omit the value and set the secret flag so
/// callers can redact it from their own reports too.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidatorError {
    message: String,
    secret: bool,
}

impl ValidatorError {
    /// Failure naming the offending value.
    pub fn new(arg: &Value, name: &str) -> Self {
        Self {
            message: format!("the argument {} is not a valid {}", render_arg(arg), name),
            secret: false,
        }
    }

    /// Failure for a `null` argument.
    pub fn empty(name: &str) -> Self {
        Self {
            message: format!("empty argument is not a valid {}", name),
            secret: false,
        }
    }

    /// Failure that conceals the offending value.
    pub fn hidden(name: &str) -> Self {
        Self {
            message: format!("the argument is not a valid {}", name),
            secret: true,
        }
    }

    /// True when the offending value must not be echoed anywhere.
    pub fn is_secret(&self) -> bool {
        self.secret
    }
}

/// Renders an argument for an error message: strings keep their quotes,
/// everything else is shown as single-quoted JSON.
fn render_arg(arg: &Value) -> String {
    match arg {
        Value::String(_) => arg.to_string(),
        other => format!("'{}'", other),
    }
}

/// Python-style stringification: strings pass through, other values render
/// as JSON text.
fn stringify(arg: &Value) -> String {
    match arg {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// A plain validator usable with [`check_any`] and as an option coercion.
pub type Validator = fn(&Value) -> Result<Value, ValidatorError>;

/// Rejects `null`, passes everything else through.
pub fn check_not_none(arg: &Value, name: &str) -> Result<Value, ValidatorError> {
    if arg.is_null() {
        return Err(ValidatorError::empty(name));
    }
    Ok(arg.clone())
}

/// Stringifies any non-null value, optionally trimming surrounding whitespace.
pub fn check_not_none_string(arg: &Value, name: &str, strip: bool) -> Result<String, ValidatorError> {
    let value = check_not_none(arg, name)?;
    let text = stringify(&value);
    if strip {
        Ok(text.trim().to_string())
    } else {
        Ok(text)
    }
}

/// Membership test against an allowed set, without normalization.
pub fn check_in_list(arg: &Value, name: &str, variants: &[Value]) -> Result<Value, ValidatorError> {
    if variants.contains(arg) {
        Ok(arg.clone())
    } else {
        Err(ValidatorError::new(arg, name))
    }
}

/// Membership test after stringification and optional case folding.
pub fn check_string_in_list(
    arg: &Value,
    name: &str,
    variants: &[&str],
    lower: bool,
) -> Result<String, ValidatorError> {
    let mut text = check_not_none_string(arg, name, true)?;
    if lower {
        text = text.to_lowercase();
    }
    if variants.contains(&text.as_str()) {
        Ok(text)
    } else {
        Err(ValidatorError::new(arg, name))
    }
}

/// Regular-expression match over the stringified argument.
///
/// Pass `secret` for credentials; failures then conceal the value.
pub fn check_re_match(
    arg: &Value,
    name: &str,
    pattern: &Regex,
    strip: bool,
    secret: bool,
) -> Result<String, ValidatorError> {
    let text = match check_not_none_string(arg, name, strip) {
        Ok(text) => text,
        Err(_) if secret => return Err(ValidatorError::hidden(name)),
        Err(err) => return Err(err),
    };
    if pattern.is_match(&text) {
        Ok(text)
    } else if secret {
        Err(ValidatorError::hidden(name))
    } else {
        Err(ValidatorError::new(arg, name))
    }
}

/// Tries validators in order and returns the first success.
///
/// When every attempt fails, the error lists each attempt's reason instead
/// of discarding them.
pub fn check_any(arg: &Value, name: &str, validators: &[Validator]) -> Result<Value, ValidatorError> {
    let mut reasons = Vec::with_capacity(validators.len());
    let mut secret = false;
    for validator in validators {
        match validator(arg) {
            Ok(value) => return Ok(value),
            Err(err) => {
                secret = secret || err.is_secret();
                reasons.push(err.to_string());
            }
        }
    }
    let lead = if secret {
        format!("the argument is not a valid {}", name)
    } else {
        format!("the argument {} is not a valid {}", render_arg(arg), name)
    };
    let message = if reasons.is_empty() {
        lead
    } else {
        format!("{}: {}", lead, reasons.join("; "))
    };
    Err(ValidatorError { message, secret })
}
