//! Raw tree resolution.
//!
//! Walks a raw tree against a `Schema` and produces a `ConfigSection`
//! with every declared option present exactly once. Missing options take
//! their default (which still goes through coercion), conditional
//! options whose dependency is unsatisfied take their default verbatim,
//! and any raw key the schema does not declare is rejected.

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::error::{ConfigError, SchemaError};
use crate::schema::{OptionDef, Schema, SchemaEntry};
use crate::section::{ConfigSection, OptionMeta};

/// Resolve a raw tree against a schema.
pub fn resolve(raw: &Value, schema: &Schema) -> Result<ConfigSection, ConfigError> {
    let mut path = Vec::new();
    resolve_node(Some(raw), schema, &mut path)
}

fn resolve_node<'a>(
    raw: Option<&'a Value>,
    schema: &'a Schema,
    path: &mut Vec<&'a str>,
) -> Result<ConfigSection, ConfigError> {
    // A missing node resolves as an empty map, an explicit null does not.
    let raw_map = match raw {
        None => None,
        Some(Value::Object(map)) => Some(map),
        Some(_) => {
            return Err(ConfigError::NotMapping {
                path: node_path(path),
            })
        }
    };

    let mut config = ConfigSection::new();
    let mut memo: IndexMap<String, Value> = IndexMap::new();

    for (name, entry) in schema.entries() {
        match entry {
            SchemaEntry::Option(def) => {
                let value = resolve_option(name, def, schema, raw_map, path, &mut memo, false)?;
                config.insert_value(
                    name,
                    value,
                    OptionMeta {
                        default: def.default().clone(),
                        unpack_as: def.unpack_name().map(str::to_string),
                        help: def.help_text().to_string(),
                    },
                );
            }
            SchemaEntry::Section(inner) => {
                path.push(name);
                let section = resolve_node(raw_map.and_then(|map| map.get(name)), inner, path)?;
                path.pop();
                config.insert_section(name, section);
            }
        }
    }

    if !schema.is_extensible() {
        if let Some(map) = raw_map {
            for key in map.keys() {
                if schema.get(key).is_none() {
                    return Err(ConfigError::UnknownKey {
                        path: key_path(path, key),
                    });
                }
            }
        }
    }
    Ok(config)
}

/// Resolve one option, memoized so a dependency target is evaluated once
/// no matter how early a dependent sibling forces it.
fn resolve_option(
    name: &str,
    def: &OptionDef,
    schema: &Schema,
    raw_map: Option<&Map<String, Value>>,
    path: &[&str],
    memo: &mut IndexMap<String, Value>,
    resolving_dependency: bool,
) -> Result<Value, ConfigError> {
    if let Some(value) = memo.get(name) {
        return Ok(value.clone());
    }
    let value = match def.condition() {
        Some(_) if resolving_dependency => {
            return Err(SchemaError::ChainedDependency {
                path: key_path(path, name),
            }
            .into())
        }
        Some(condition) => {
            let target = match schema.get(condition.key()) {
                None => {
                    return Err(SchemaError::MissingDependency {
                        path: key_path(path, name),
                        target: condition.key().to_string(),
                    }
                    .into())
                }
                Some(SchemaEntry::Section(_)) => {
                    return Err(SchemaError::SectionDependency {
                        path: key_path(path, name),
                        target: condition.key().to_string(),
                    }
                    .into())
                }
                Some(SchemaEntry::Option(target_def)) => resolve_option(
                    condition.key(),
                    target_def,
                    schema,
                    raw_map,
                    path,
                    memo,
                    true,
                )?,
            };
            if truthy(&target) != condition.invert() {
                coerce_value(name, def, raw_map, path)?
            } else {
                def.default().clone()
            }
        }
        None => coerce_value(name, def, raw_map, path)?,
    };
    memo.insert(name.to_string(), value.clone());
    Ok(value)
}

fn coerce_value(
    name: &str,
    def: &OptionDef,
    raw_map: Option<&Map<String, Value>>,
    path: &[&str],
) -> Result<Value, ConfigError> {
    let value = raw_map.and_then(|map| map.get(name)).unwrap_or(def.default());
    def.apply(value).map_err(|reason| {
        let rendered = render_offender(value, reason.is_secret());
        ConfigError::Validation {
            path: key_path(path, name),
            value: rendered,
            reason,
        }
    })
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().map(|x| x != 0.0).unwrap_or(true),
        Value::String(text) => !text.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

fn node_path(path: &[&str]) -> String {
    if path.is_empty() {
        "/".to_string()
    } else {
        path.join("/")
    }
}

fn key_path(path: &[&str], name: &str) -> String {
    if path.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", path.join("/"), name)
    }
}

fn render_offender(value: &Value, secret: bool) -> String {
    if secret {
        "[REDACTED]".to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use okvm_validators::auth::valid_passwd;
    use okvm_validators::net::valid_port;
    use okvm_validators::ValidatorError;
    use serde_json::json;

    use crate::schema::OptionDef;

    fn server_schema() -> Schema {
        Schema::new().section(
            "server",
            Schema::new()
                .option("host", OptionDef::new(json!("localhost")))
                .option("port", OptionDef::new(json!(0)).coerce(valid_port))
                .option(
                    "unix",
                    OptionDef::new(json!("")).only_if_not("port").unpack_as("unix_path"),
                ),
        )
    }

    #[test]
    fn test_defaults_fill_omitted() {
        let config = resolve(&json!({}), &server_schema()).unwrap();
        let server = config.section("server").unwrap();
        assert_eq!(server.get_str("host"), Some("localhost"));
        assert_eq!(server.get_u64("port"), Some(0));
        assert_eq!(server.get_str("unix"), Some(""));
        assert_eq!(server.len(), 3);
    }

    #[test]
    fn test_raw_values_coerced() {
        let raw = json!({"server": {"host": "kvm.local", "port": "8080"}});
        let config = resolve(&raw, &server_schema()).unwrap();
        let server = config.section("server").unwrap();
        assert_eq!(server.get_u64("port"), Some(8080));
        assert_eq!(server.get_str("host"), Some("kvm.local"));
    }

    #[test]
    fn test_defaults_are_coerced_too() {
        let schema = Schema::new().option("port", OptionDef::new(json!("80")).coerce(valid_port));
        let config = resolve(&json!({}), &schema).unwrap();
        assert_eq!(config.value("port"), Some(&json!(80)));
    }

    #[test]
    fn test_meta_recorded() {
        let config = resolve(&json!({"server": {"port": 443}}), &server_schema()).unwrap();
        let server = config.section("server").unwrap();
        let meta = server.meta("unix").unwrap();
        assert_eq!(meta.default, json!(""));
        assert_eq!(meta.unpack_as.as_deref(), Some("unix_path"));
        assert!(server.meta("host").unwrap().unpack_as.is_none());
    }

    #[test]
    fn test_not_mapping() {
        let err = resolve(&json!(5), &server_schema()).unwrap_err();
        assert_eq!(err.to_string(), "the node \"/\" must be a mapping");
        let err = resolve(&json!({"server": "x"}), &server_schema()).unwrap_err();
        assert_eq!(err.to_string(), "the node \"server\" must be a mapping");
        // Explicit null is not the same as a missing section.
        let err = resolve(&json!({"server": null}), &server_schema()).unwrap_err();
        assert_eq!(err.to_string(), "the node \"server\" must be a mapping");
    }

    #[test]
    fn test_unknown_key_names_full_path() {
        let schema = Schema::new().section(
            "kvm",
            Schema::new().section(
                "hid",
                Schema::new().option("type", OptionDef::new(json!("serial"))),
            ),
        );
        let err = resolve(&json!({"kvm": {"hid": {"typo": "x"}}}), &schema).unwrap_err();
        assert_eq!(err.to_string(), "unknown key \"kvm/hid/typo\"");
        let err = resolve(&json!({"stray": 1}), &schema).unwrap_err();
        assert_eq!(err.to_string(), "unknown key \"stray\"");
    }

    #[test]
    fn test_declared_keys_processed_before_unknown_scan() {
        let raw = json!({"server": {"port": "bad", "typo": 1}});
        let err = resolve(&raw, &server_schema()).unwrap_err();
        assert!(matches!(err, ConfigError::Validation { .. }), "{err}");
    }

    #[test]
    fn test_extensible_section_keeps_unknown_keys() {
        let schema = Schema::new().section(
            "hid",
            Schema::new()
                .option("type", OptionDef::new(json!("serial")))
                .extensible(),
        );
        let raw = json!({"hid": {"type": "otg", "device": "/dev/hidg0"}});
        let config = resolve(&raw, &schema).unwrap();
        // Undeclared keys pass the scan but are not resolved.
        assert!(config.section("hid").unwrap().value("device").is_none());
    }

    #[test]
    fn test_validation_error_names_path_and_reason() {
        let err = resolve(&json!({"server": {"port": 99999}}), &server_schema()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid value 99999 for key \"server/port\": the argument '99999' is not a valid port: max=65535"
        );
    }

    #[test]
    fn test_secret_value_redacted() {
        let schema = Schema::new().option("passwd", OptionDef::new(json!("")).coerce(valid_passwd));
        let err = resolve(&json!({"passwd": "пароль"}), &schema).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("[REDACTED]"), "{message}");
        assert!(!message.contains("пароль"), "{message}");
    }

    #[test]
    fn test_dependency_satisfied_coerces_raw() {
        let raw = json!({"server": {"unix": "/run/kvm.sock"}});
        let config = resolve(&raw, &server_schema()).unwrap();
        assert_eq!(
            config.section("server").unwrap().get_str("unix"),
            Some("/run/kvm.sock")
        );
    }

    #[test]
    fn test_dependency_unsatisfied_keeps_default_unvalidated() {
        fn rejects_everything(_: &serde_json::Value) -> Result<serde_json::Value, ValidatorError> {
            Err(ValidatorError::empty("never"))
        }
        let schema = Schema::new()
            .option("port", OptionDef::new(json!(0)))
            .option(
                "unix",
                OptionDef::new(json!("/run/default.sock"))
                    .only_if_not("port")
                    .coerce(rejects_everything),
            );
        // Port is truthy, so the coercion must never run and the default
        // lands verbatim even though raw supplies a value.
        let raw = json!({"port": 443, "unix": "/run/ignored.sock"});
        let config = resolve(&raw, &schema).unwrap();
        assert_eq!(config.get_str("unix"), Some("/run/default.sock"));
    }

    #[test]
    fn test_dependency_truthiness() {
        let schema = Schema::new()
            .option("gate", OptionDef::new(json!("")))
            .option("dependent", OptionDef::new(json!("off")).only_if("gate"));
        let config = resolve(&json!({"gate": "", "dependent": "on"}), &schema).unwrap();
        assert_eq!(config.get_str("dependent"), Some("off"));
        let config = resolve(&json!({"gate": "x", "dependent": "on"}), &schema).unwrap();
        assert_eq!(config.get_str("dependent"), Some("on"));
    }

    #[test]
    fn test_dependency_forces_target_validation() {
        // The dependent is declared first, so the bad port is reached
        // through the dependency lookup rather than its own turn.
        let schema = Schema::new()
            .option("unix", OptionDef::new(json!("")).only_if_not("port"))
            .option("port", OptionDef::new(json!(0)).coerce(valid_port));
        let err = resolve(&json!({"port": "not-a-port"}), &schema).unwrap_err();
        assert!(err.to_string().contains("for key \"port\""), "{err}");
    }

    #[test]
    fn test_chained_dependency_is_fatal() {
        let schema = Schema::new()
            .option("a", OptionDef::new(json!("")).only_if("b"))
            .option("b", OptionDef::new(json!("")).only_if("c"))
            .option("c", OptionDef::new(json!("")));
        let err = resolve(&json!({}), &schema).unwrap_err();
        assert_eq!(
            err.to_string(),
            "option \"b\" is both conditional and a dependency target"
        );
    }

    #[test]
    fn test_missing_dependency_target() {
        let schema = Schema::new().option("a", OptionDef::new(json!("")).only_if("nope"));
        let err = resolve(&json!({}), &schema).unwrap_err();
        assert_eq!(err.to_string(), "option \"a\" depends on missing key \"nope\"");
    }

    #[test]
    fn test_section_dependency_target() {
        let schema = Schema::new()
            .section("sub", Schema::new())
            .option("a", OptionDef::new(json!("")).only_if("sub"));
        let err = resolve(&json!({}), &schema).unwrap_err();
        assert_eq!(
            err.to_string(),
            "option \"a\" depends on \"sub\" which is a section, not an option"
        );
    }

    #[test]
    fn test_declaration_order_survives_early_dependency() {
        // The dependent comes first, so its target resolves early; the
        // output must still follow declaration order.
        let schema = Schema::new()
            .option("unix", OptionDef::new(json!("")).only_if_not("port"))
            .option("port", OptionDef::new(json!(0)));
        let config = resolve(&json!({"port": 1}), &schema).unwrap();
        let names: Vec<&str> = config.keys().collect();
        assert_eq!(names, ["unix", "port"]);
    }
}
