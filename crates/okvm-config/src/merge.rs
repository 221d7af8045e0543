//! Raw tree merging.
//!
//! One primitive, `deep_merge`, assembles the working raw tree before
//! resolution: maps merge by key, everything else is replaced by the
//! overlay. The reserved root `override` block is merged last and
//! therefore beats both the file's plain values and CLI overrides.

use serde_json::Value;

/// Reserved root key whose contents take highest merge precedence.
pub const OVERRIDE_KEY: &str = "override";

/// Deep merge two raw trees, overlay winning on any conflict.
///
/// Maps merge recursively by key. Arrays are replaced whole, never
/// concatenated. A scalar overlay replaces a map and vice versa.
pub fn deep_merge(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (Value::Object(mut base_map), Value::Object(overlay_map)) => {
            for (key, overlay_value) in overlay_map {
                let merged = if let Some(base_value) = base_map.remove(&key) {
                    deep_merge(base_value, overlay_value)
                } else {
                    overlay_value
                };
                base_map.insert(key, merged);
            }
            Value::Object(base_map)
        }
        (_, overlay) => overlay,
    }
}

/// Merge the root `override` block back into the tree it came from.
///
/// The block stays in the tree afterwards; the schema declares it so it
/// survives resolution. A missing, null, or non-map block changes
/// nothing here (a non-map block is rejected later, during resolution).
pub fn apply_override_block(raw: Value) -> Value {
    let block = match &raw {
        Value::Object(map) => match map.get(OVERRIDE_KEY) {
            Some(block @ Value::Object(_)) => block.clone(),
            _ => return raw,
        },
        _ => return raw,
    };
    deep_merge(raw, block)
}
