//! ATX power control backends.

use okvm_config::{OptionDef, PluginDescriptor, Schema};
use okvm_validators::basic::valid_float_f01;
use okvm_validators::hw::{valid_gpio_pin, valid_gpio_pin_optional};
use serde_json::json;

/// Drives the motherboard power and reset lines over GPIO.
pub struct Gpio;

impl PluginDescriptor for Gpio {
    fn option_schema(&self) -> Schema {
        Schema::new()
            .option(
                "power_led_pin",
                OptionDef::new(json!(16))
                    .coerce(valid_gpio_pin_optional)
                    .help("-1 means unused"),
            )
            .option(
                "hdd_led_pin",
                OptionDef::new(json!(22))
                    .coerce(valid_gpio_pin_optional)
                    .help("-1 means unused"),
            )
            .option(
                "power_switch_pin",
                OptionDef::new(json!(23)).coerce(valid_gpio_pin),
            )
            .option(
                "reset_switch_pin",
                OptionDef::new(json!(27)).coerce(valid_gpio_pin),
            )
            .option(
                "click_delay",
                OptionDef::new(json!(0.1)).coerce(valid_float_f01),
            )
            .option(
                "long_click_delay",
                OptionDef::new(json!(5.5)).coerce(valid_float_f01),
            )
            .option(
                "state_poll",
                OptionDef::new(json!(0.1)).coerce(valid_float_f01),
            )
    }
}

/// Stub for machines without ATX wiring.
pub struct Disabled;

impl PluginDescriptor for Disabled {
    fn option_schema(&self) -> Schema {
        Schema::new()
    }
}
