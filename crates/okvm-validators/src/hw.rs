//! Hardware wiring validators.
//!
//! Pin numbers and serial line speeds for the boards the daemon drives.

use serde_json::Value;

use crate::basic::valid_number;
use crate::{check_in_list, ValidatorError};

const TTY_SPEEDS: [i64; 8] = [1200, 2400, 4800, 9600, 19200, 38400, 57600, 115200];

/// GPIO pin number.
pub fn valid_gpio_pin(arg: &Value) -> Result<Value, ValidatorError> {
    valid_number(arg, Some(0), None, "GPIO pin").map(Value::from)
}

/// GPIO pin number with -1 meaning unconnected.
pub fn valid_gpio_pin_optional(arg: &Value) -> Result<Value, ValidatorError> {
    valid_number(arg, Some(-1), None, "GPIO pin").map(Value::from)
}

/// Baud rate from the standard termios set.
pub fn valid_tty_speed(arg: &Value) -> Result<Value, ValidatorError> {
    let speed = valid_number(arg, None, None, "TTY speed")?;
    let allowed: Vec<Value> = TTY_SPEEDS.iter().copied().map(Value::from).collect();
    check_in_list(&Value::from(speed), "TTY speed", &allowed)
}
