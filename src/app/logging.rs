//! Logging setup.
//!
//! The `logging` config entry is a free-form map kept out of schema
//! validation; `level` and `format` are read from it here. RUST_LOG
//! still wins when set, so operators can raise verbosity without
//! touching the config file.

use serde_json::Value;
use tracing_subscriber::EnvFilter;

use okvm_config::ConfigSection;

/// Initialize the tracing subscriber from the resolved config.
pub fn init_logging(config: &ConfigSection) {
    let logging = config.value("logging");
    let level = logging
        .and_then(|value| value.get("level"))
        .and_then(Value::as_str)
        .unwrap_or("info");
    let json = logging
        .and_then(|value| value.get("format"))
        .and_then(Value::as_str)
        == Some("json");

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .with_target(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .init();
    }
}
