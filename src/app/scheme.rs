//! Base configuration schema.
//!
//! Declares every always-present option of the daemon and its IPMI
//! bridge. Pluggable subsystems (auth, hid, atx, msd) declare only
//! their `type` discriminator here and stay extensible until the
//! selected plugin contributes the rest through the bootstrap.

use serde_json::json;

use okvm_config::{OptionDef, PluginSlot, Schema, OVERRIDE_KEY};
use okvm_validators::auth::valid_users_list;
use okvm_validators::basic::{valid_bool, valid_float_f0, valid_float_f01};
use okvm_validators::hw::valid_gpio_pin_optional;
use okvm_validators::kvm::{valid_stream_fps, valid_stream_quality};
use okvm_validators::net::{valid_ip_or_host, valid_port};
use okvm_validators::os::{valid_abs_path, valid_command, valid_unix_mode};

/// Scheme retaining only the requested root sections.
///
/// The reserved `override` and `logging` entries always stay, so a
/// config file carrying them resolves no matter which daemon loads it.
pub fn base_scheme(sections: &[&str]) -> Schema {
    let full = full_scheme();
    if sections.is_empty() {
        return full;
    }
    let mut filtered = Schema::new();
    for (name, entry) in full.entries() {
        if name == OVERRIDE_KEY || name == "logging" || sections.contains(&name) {
            filtered = filtered.entry(name, entry.clone());
        }
    }
    // A shared config file carries every daemon's sections. Tolerate the
    // ones this daemon does not own while staying strict inside its own.
    filtered.extensible()
}

/// Plugin slots that apply to the requested sections.
pub fn plugin_slots(sections: &[&str]) -> Vec<PluginSlot> {
    if !sections.is_empty() && !sections.contains(&"okvmd") {
        return Vec::new();
    }
    vec![
        PluginSlot::required("auth", &["okvmd", "auth", "internal"]),
        PluginSlot::optional("auth", &["okvmd", "auth", "external"]),
        PluginSlot::required("hid", &["okvmd", "hid"]),
        PluginSlot::required("atx", &["okvmd", "atx"]),
        PluginSlot::required("msd", &["okvmd", "msd"]),
    ]
}

fn full_scheme() -> Schema {
    Schema::new()
        .option(OVERRIDE_KEY, OptionDef::new(json!({})))
        .option("logging", OptionDef::new(json!({})))
        .section(
            "okvmd",
            Schema::new()
                .section(
                    "server",
                    Schema::new()
                        .option(
                            "host",
                            OptionDef::new(json!("localhost")).coerce(valid_ip_or_host),
                        )
                        .option("port", OptionDef::new(json!(0)).coerce(valid_port))
                        .option(
                            "unix",
                            OptionDef::new(json!("/run/okvmd/okvmd.sock"))
                                .coerce(valid_abs_path)
                                .only_if_not("port")
                                .unpack_as("unix_path")
                                .help("UNIX socket path, used while no TCP port is set"),
                        )
                        .option("unix_rm", OptionDef::new(json!(false)).coerce(valid_bool))
                        .option("unix_mode", OptionDef::new(json!(0)).coerce(valid_unix_mode))
                        .option(
                            "heartbeat",
                            OptionDef::new(json!(3.0)).coerce(valid_float_f01),
                        )
                        .option(
                            "access_log_format",
                            OptionDef::new(json!(concat!(
                                "[%P / %{X-Real-IP}i] '%r' => %s; size=%b ---",
                                " referer='%{Referer}i'; user_agent='%{User-Agent}i'",
                            ))),
                        ),
                )
                .section(
                    "auth",
                    Schema::new()
                        .section(
                            "internal",
                            Schema::new()
                                .option("type", OptionDef::new(json!("htpasswd")))
                                .option(
                                    "force_users",
                                    OptionDef::new(json!([])).coerce(valid_users_list),
                                )
                                .extensible(),
                        )
                        .section(
                            "external",
                            Schema::new()
                                .option("type", OptionDef::new(json!("")))
                                .extensible(),
                        ),
                )
                .section(
                    "info",
                    Schema::new()
                        .option(
                            "meta",
                            OptionDef::new(json!("/etc/okvmd/meta.yaml"))
                                .coerce(valid_abs_path)
                                .unpack_as("meta_path"),
                        )
                        .option(
                            "extras",
                            OptionDef::new(json!("/usr/share/okvmd/extras"))
                                .coerce(valid_abs_path)
                                .unpack_as("extras_path"),
                        ),
                )
                .section(
                    "hid",
                    Schema::new()
                        .option("type", OptionDef::new(json!("serial")))
                        .extensible(),
                )
                .section(
                    "atx",
                    Schema::new()
                        .option("type", OptionDef::new(json!("gpio")))
                        .extensible(),
                )
                .section(
                    "msd",
                    Schema::new()
                        .option("type", OptionDef::new(json!("relay")))
                        .extensible(),
                )
                .section(
                    "streamer",
                    Schema::new()
                        .option(
                            "cap_pin",
                            OptionDef::new(json!(-1)).coerce(valid_gpio_pin_optional),
                        )
                        .option(
                            "conv_pin",
                            OptionDef::new(json!(-1)).coerce(valid_gpio_pin_optional),
                        )
                        .option(
                            "sync_delay",
                            OptionDef::new(json!(1.0)).coerce(valid_float_f01),
                        )
                        .option(
                            "init_delay",
                            OptionDef::new(json!(3.0)).coerce(valid_float_f01),
                        )
                        .option(
                            "init_restart_after",
                            OptionDef::new(json!(0.0)).coerce(valid_float_f0),
                        )
                        .option(
                            "shutdown_delay",
                            OptionDef::new(json!(10.0)).coerce(valid_float_f01),
                        )
                        .option(
                            "state_poll",
                            OptionDef::new(json!(1.0)).coerce(valid_float_f01),
                        )
                        .option(
                            "quality",
                            OptionDef::new(json!(80))
                                .coerce(valid_stream_quality)
                                .help("JPEG quality percent"),
                        )
                        .option(
                            "desired_fps",
                            OptionDef::new(json!(0))
                                .coerce(valid_stream_fps)
                                .help("0 means unlimited"),
                        )
                        .option("max_fps", OptionDef::new(json!(120)).coerce(valid_stream_fps))
                        .option(
                            "host",
                            OptionDef::new(json!("localhost")).coerce(valid_ip_or_host),
                        )
                        .option("port", OptionDef::new(json!(0)).coerce(valid_port))
                        .option(
                            "unix",
                            OptionDef::new(json!("/run/okvmd/streamer.sock"))
                                .coerce(valid_abs_path)
                                .only_if_not("port")
                                .unpack_as("unix_path"),
                        )
                        .option("timeout", OptionDef::new(json!(2.0)).coerce(valid_float_f01))
                        .option(
                            "cmd",
                            OptionDef::new(json!(["/bin/true"])).coerce(valid_command),
                        ),
                ),
        )
        .section(
            "ipmi",
            Schema::new()
                .section(
                    "server",
                    Schema::new()
                        .option("host", OptionDef::new(json!("::")).coerce(valid_ip_or_host))
                        .option("port", OptionDef::new(json!(623)).coerce(valid_port))
                        .option(
                            "timeout",
                            OptionDef::new(json!(10.0)).coerce(valid_float_f01),
                        ),
                )
                .section(
                    "okvmd",
                    Schema::new()
                        .option(
                            "host",
                            OptionDef::new(json!("localhost"))
                                .coerce(valid_ip_or_host)
                                .unpack_as("okvmd_host"),
                        )
                        .option(
                            "port",
                            OptionDef::new(json!(0))
                                .coerce(valid_port)
                                .unpack_as("okvmd_port"),
                        )
                        .option(
                            "unix",
                            OptionDef::new(json!("/run/okvmd/okvmd.sock"))
                                .coerce(valid_abs_path)
                                .only_if_not("port")
                                .unpack_as("okvmd_unix_path"),
                        )
                        .option(
                            "timeout",
                            OptionDef::new(json!(5.0))
                                .coerce(valid_float_f01)
                                .unpack_as("okvmd_timeout"),
                        ),
                )
                .section(
                    "auth",
                    Schema::new().option(
                        "file",
                        OptionDef::new(json!("/etc/okvmd/ipmipasswd"))
                            .coerce(valid_abs_path)
                            .unpack_as("path"),
                    ),
                ),
        )
}
