//! General-purpose scalar validators.

use serde_json::Value;

use crate::{check_not_none_string, check_string_in_list, ValidatorError};

const TRUE_WORDS: [&str; 3] = ["1", "true", "yes"];
const FALSE_WORDS: [&str; 3] = ["0", "false", "no"];

/// Boolean from a bool literal or the usual spellings, case-insensitive.
pub fn valid_bool(arg: &Value) -> Result<Value, ValidatorError> {
    let name = "bool (1/true/yes or 0/false/no)";
    let all = [
        TRUE_WORDS[0], TRUE_WORDS[1], TRUE_WORDS[2],
        FALSE_WORDS[0], FALSE_WORDS[1], FALSE_WORDS[2],
    ];
    let word = check_string_in_list(arg, name, &all, true)?;
    Ok(Value::Bool(TRUE_WORDS.contains(&word.as_str())))
}

/// Integer with optional bounds. Accepts numeric strings; rejects anything
/// with a fractional part.
pub fn valid_number(
    arg: &Value,
    min: Option<i64>,
    max: Option<i64>,
    name: &str,
) -> Result<i64, ValidatorError> {
    let text = check_not_none_string(arg, name, true)?;
    let number: i64 = text.parse().map_err(|_| ValidatorError::new(arg, name))?;
    if let Some(min) = min {
        if number < min {
            return Err(ValidatorError::new(arg, &format!("{}: min={}", name, min)));
        }
    }
    if let Some(max) = max {
        if number > max {
            return Err(ValidatorError::new(arg, &format!("{}: max={}", name, max)));
        }
    }
    Ok(number)
}

/// Finite float with optional bounds. Accepts numeric strings and integers.
pub fn valid_float(
    arg: &Value,
    min: Option<f64>,
    max: Option<f64>,
    name: &str,
) -> Result<f64, ValidatorError> {
    let text = check_not_none_string(arg, name, true)?;
    let number: f64 = text.parse().map_err(|_| ValidatorError::new(arg, name))?;
    if !number.is_finite() {
        return Err(ValidatorError::new(arg, name));
    }
    if let Some(min) = min {
        if number < min {
            return Err(ValidatorError::new(arg, &format!("{}: min={}", name, min)));
        }
    }
    if let Some(max) = max {
        if number > max {
            return Err(ValidatorError::new(arg, &format!("{}: max={}", name, max)));
        }
    }
    Ok(number)
}

/// Integer >= 0.
pub fn valid_int_f0(arg: &Value) -> Result<Value, ValidatorError> {
    valid_number(arg, Some(0), None, "number").map(Value::from)
}

/// Integer >= 1.
pub fn valid_int_f1(arg: &Value) -> Result<Value, ValidatorError> {
    valid_number(arg, Some(1), None, "number").map(Value::from)
}

/// Float >= 0.
pub fn valid_float_f0(arg: &Value) -> Result<Value, ValidatorError> {
    let number = valid_float(arg, Some(0.0), None, "number")?;
    float_value(arg, number)
}

/// Float >= 0.1.
pub fn valid_float_f01(arg: &Value) -> Result<Value, ValidatorError> {
    let number = valid_float(arg, Some(0.1), None, "number")?;
    float_value(arg, number)
}

/// Integer with no bounds.
pub fn valid_int_any(arg: &Value) -> Result<Value, ValidatorError> {
    valid_number(arg, None, None, "number").map(Value::from)
}

/// Finite float with no bounds.
pub fn valid_float_any(arg: &Value) -> Result<Value, ValidatorError> {
    let number = valid_float(arg, None, None, "number")?;
    float_value(arg, number)
}

fn float_value(arg: &Value, number: f64) -> Result<Value, ValidatorError> {
    serde_json::Number::from_f64(number)
        .map(Value::Number)
        .ok_or_else(|| ValidatorError::new(arg, "number"))
}
