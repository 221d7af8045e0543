//! Authentication backends.

use okvm_config::{OptionDef, PluginDescriptor, Schema};
use okvm_validators::{auth::valid_passwd, basic, os::valid_abs_path};
use serde_json::json;

/// Checks credentials against an htpasswd file.
pub struct Htpasswd;

impl PluginDescriptor for Htpasswd {
    fn option_schema(&self) -> Schema {
        Schema::new().option(
            "file",
            OptionDef::new(json!("/etc/okvmd/htpasswd"))
                .coerce(valid_abs_path)
                .unpack_as("path")
                .help("htpasswd file path"),
        )
    }
}

/// Delegates credential checks to an external HTTP service.
pub struct Http;

impl PluginDescriptor for Http {
    fn option_schema(&self) -> Schema {
        Schema::new()
            .option("url", OptionDef::new(json!("http://localhost/auth")))
            .option("verify", OptionDef::new(json!(true)))
            .option("user", OptionDef::new(json!("")))
            .option("passwd", OptionDef::new(json!("")).coerce(valid_passwd))
            .option(
                "timeout",
                OptionDef::new(json!(5.0)).coerce(basic::valid_float_f01),
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use okvm_config::resolve;

    #[test]
    fn test_htpasswd_schema_resolves() {
        let config = resolve(&json!({"file": "/tmp/htpasswd"}), &Htpasswd.option_schema()).unwrap();
        assert_eq!(config.get_str("file"), Some("/tmp/htpasswd"));
        assert_eq!(
            config.meta("file").unwrap().unpack_as.as_deref(),
            Some("path")
        );
    }

    #[test]
    fn test_http_rejects_tiny_timeout() {
        let err = resolve(&json!({"timeout": 0.01}), &Http.option_schema()).unwrap_err();
        assert!(err.to_string().contains("for key \"timeout\""));
    }
}
