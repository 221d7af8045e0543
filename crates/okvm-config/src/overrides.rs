//! Command-line override parsing.
//!
//! Turns flat `section/sub/key=value` tokens into a nested raw tree.
//! Values get JSON-typed inference: digit runs become numbers, the
//! reserved words true/false/null parse as themselves, anything opening
//! with `{`, `[`, or `"` parses as a structured literal, and everything
//! else is taken as a plain string.

use serde_json::{Map, Value};

use crate::error::ConfigError;

/// Parse override tokens into a raw tree, later tokens winning on the
/// same exact path.
pub fn build_raw_from_overrides(overrides: &[String]) -> Result<Value, ConfigError> {
    let mut raw = Map::new();
    for token in overrides {
        let (key, literal) = match token.split_once('=') {
            Some((key, literal)) => (key, Some(literal)),
            None => (token.as_str(), None),
        };
        if key.trim().is_empty() {
            return Err(ConfigError::EmptyOptionKey {
                token: token.clone(),
            });
        }
        let literal = literal.ok_or_else(|| ConfigError::MissingOptionValue {
            key: key.to_string(),
        })?;
        let value = parse_literal(literal).map_err(|_| ConfigError::BadOptionLiteral {
            key: key.to_string(),
            literal: literal.to_string(),
        })?;
        let segments: Vec<String> = key
            .split('/')
            .map(|segment| segment.trim().to_string())
            .collect();
        insert_path(&mut raw, &segments, value);
    }
    Ok(Value::Object(raw))
}

fn parse_literal(literal: &str) -> Result<Value, serde_json::Error> {
    let text = literal.trim();
    let digits = !text.is_empty() && text.bytes().all(|byte| byte.is_ascii_digit());
    let reserved = matches!(text, "true" | "false" | "null");
    let structured = text.starts_with(['{', '[', '"']);
    if digits || reserved || structured {
        serde_json::from_str(text)
    } else {
        serde_json::from_str(&format!("\"{text}\""))
    }
}

fn insert_path(map: &mut Map<String, Value>, segments: &[String], value: Value) {
    match segments {
        [] => {}
        [last] => {
            map.insert(last.clone(), value);
        }
        [head, rest @ ..] => {
            let slot = map
                .entry(head.clone())
                .or_insert_with(|| Value::Object(Map::new()));
            if !slot.is_object() {
                // An earlier token claimed this path as a leaf.
                *slot = Value::Object(Map::new());
            }
            if let Value::Object(inner) = slot {
                insert_path(inner, rest, value);
            }
        }
    }
}
