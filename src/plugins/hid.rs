//! HID backends for keyboard and mouse forwarding.

use okvm_config::{OptionDef, PluginDescriptor, Schema};
use okvm_validators::basic::valid_float_f01;
use okvm_validators::hw::{valid_gpio_pin, valid_tty_speed};
use okvm_validators::os::valid_abs_path;
use serde_json::json;

/// Talks to a microcontroller over a serial line.
pub struct Serial;

impl PluginDescriptor for Serial {
    fn option_schema(&self) -> Schema {
        Schema::new()
            .option(
                "device",
                OptionDef::new(json!("/dev/ttyAMA0"))
                    .coerce(valid_abs_path)
                    .unpack_as("device_path")
                    .help("serial device path"),
            )
            .option(
                "speed",
                OptionDef::new(json!(115200)).coerce(valid_tty_speed),
            )
            .option("reset_pin", OptionDef::new(json!(4)).coerce(valid_gpio_pin))
            .option(
                "reset_delay",
                OptionDef::new(json!(0.1)).coerce(valid_float_f01),
            )
    }
}

/// Emulates USB gadgets through the OTG port.
pub struct Otg;

impl PluginDescriptor for Otg {
    fn option_schema(&self) -> Schema {
        Schema::new()
            .option("udc", OptionDef::new(json!("")).help("UDC device name"))
            .section(
                "keyboard",
                Schema::new().option(
                    "device",
                    OptionDef::new(json!("/dev/hidg0"))
                        .coerce(valid_abs_path)
                        .unpack_as("device_path"),
                ),
            )
            .section(
                "mouse",
                Schema::new().option(
                    "device",
                    OptionDef::new(json!("/dev/hidg1"))
                        .coerce(valid_abs_path)
                        .unpack_as("device_path"),
                ),
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use okvm_config::resolve;

    #[test]
    fn test_serial_rejects_odd_speed() {
        let err = resolve(&json!({"speed": 9601}), &Serial.option_schema()).unwrap_err();
        assert!(err.to_string().contains("not a valid TTY speed"));
    }

    #[test]
    fn test_otg_nested_sections_resolve() {
        let config = resolve(&json!({"keyboard": {"device": "/dev/hidg7"}}), &Otg.option_schema())
            .unwrap();
        let keyboard = config.section("keyboard").unwrap();
        assert_eq!(keyboard.get_str("device"), Some("/dev/hidg7"));
        let mouse = config.section("mouse").unwrap();
        assert_eq!(mouse.get_str("device"), Some("/dev/hidg1"));
    }
}
