//! Mass storage drive backends.

use okvm_config::{OptionDef, PluginDescriptor, Schema};
use okvm_validators::basic::{valid_float_f01, valid_int_f1};
use okvm_validators::hw::valid_gpio_pin;
use okvm_validators::os::valid_abs_path;
use serde_json::json;

/// Switches a physical drive between host and server with a relay.
pub struct Relay;

impl PluginDescriptor for Relay {
    fn option_schema(&self) -> Schema {
        Schema::new()
            .option(
                "target_pin",
                OptionDef::new(json!(5)).coerce(valid_gpio_pin),
            )
            .option("reset_pin", OptionDef::new(json!(6)).coerce(valid_gpio_pin))
            .option(
                "device",
                OptionDef::new(json!("/dev/sda"))
                    .coerce(valid_abs_path)
                    .unpack_as("device_path")
                    .help("block device path"),
            )
            .option(
                "init_delay",
                OptionDef::new(json!(1.0)).coerce(valid_float_f01),
            )
            .option(
                "init_retries",
                OptionDef::new(json!(5)).coerce(valid_int_f1),
            )
            .option(
                "reset_delay",
                OptionDef::new(json!(1.0)).coerce(valid_float_f01),
            )
    }
}

/// Stub for machines without a managed drive.
pub struct Disabled;

impl PluginDescriptor for Disabled {
    fn option_schema(&self) -> Schema {
        Schema::new()
    }
}
