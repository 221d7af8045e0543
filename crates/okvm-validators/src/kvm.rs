//! Video stream parameter validators.

use serde_json::Value;

use crate::basic::valid_number;
use crate::ValidatorError;

/// JPEG quality percentage.
pub fn valid_stream_quality(arg: &Value) -> Result<Value, ValidatorError> {
    valid_number(arg, Some(1), Some(100), "stream quality").map(Value::from)
}

/// Stream FPS limit, 0 meaning unlimited.
pub fn valid_stream_fps(arg: &Value) -> Result<Value, ValidatorError> {
    valid_number(arg, Some(0), Some(120), "stream FPS").map(Value::from)
}
