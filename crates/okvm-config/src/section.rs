//! Resolved configuration trees.
//!
//! A `ConfigSection` is the output of resolution: typed values in schema
//! declaration order plus a metadata side table (default, unpack alias,
//! help) keyed by the original option name. The tree is read-only for
//! consumers; nothing here re-validates.

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Metadata recorded for each resolved option.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionMeta {
    pub default: Value,
    pub unpack_as: Option<String>,
    pub help: String,
}

/// One resolved entry: a final value or a nested section.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigEntry {
    Value(Value),
    Section(ConfigSection),
}

/// Fully resolved configuration section.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigSection {
    entries: IndexMap<String, ConfigEntry>,
    meta: IndexMap<String, OptionMeta>,
}

impl ConfigSection {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert_value(&mut self, name: &str, value: Value, meta: OptionMeta) {
        self.entries.insert(name.to_string(), ConfigEntry::Value(value));
        self.meta.insert(name.to_string(), meta);
    }

    pub(crate) fn insert_section(&mut self, name: &str, section: ConfigSection) {
        self.entries
            .insert(name.to_string(), ConfigEntry::Section(section));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Entries in schema declaration order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &ConfigEntry)> {
        self.entries
            .iter()
            .map(|(name, entry)| (name.as_str(), entry))
    }

    pub fn get(&self, name: &str) -> Option<&ConfigEntry> {
        self.entries.get(name)
    }

    /// Leaf value under `name`, if present and not a section.
    pub fn value(&self, name: &str) -> Option<&Value> {
        match self.entries.get(name)? {
            ConfigEntry::Value(value) => Some(value),
            ConfigEntry::Section(_) => None,
        }
    }

    /// Nested section under `name`, if present and not a leaf.
    pub fn section(&self, name: &str) -> Option<&ConfigSection> {
        match self.entries.get(name)? {
            ConfigEntry::Section(section) => Some(section),
            ConfigEntry::Value(_) => None,
        }
    }

    /// Entry under a slash-separated path like `server/unix`.
    pub fn lookup(&self, path: &str) -> Option<&ConfigEntry> {
        let mut segments = path.split('/');
        let mut entry = self.entries.get(segments.next()?)?;
        for segment in segments {
            match entry {
                ConfigEntry::Section(section) => entry = section.entries.get(segment)?,
                ConfigEntry::Value(_) => return None,
            }
        }
        Some(entry)
    }

    /// Leaf value under a slash-separated path.
    pub fn lookup_value(&self, path: &str) -> Option<&Value> {
        match self.lookup(path)? {
            ConfigEntry::Value(value) => Some(value),
            ConfigEntry::Section(_) => None,
        }
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.value(name).and_then(Value::as_str)
    }

    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.value(name).and_then(Value::as_bool)
    }

    pub fn get_u64(&self, name: &str) -> Option<u64> {
        self.value(name).and_then(Value::as_u64)
    }

    pub fn get_i64(&self, name: &str) -> Option<i64> {
        self.value(name).and_then(Value::as_i64)
    }

    pub fn get_f64(&self, name: &str) -> Option<f64> {
        self.value(name).and_then(Value::as_f64)
    }

    /// Metadata for the option originally declared under `name`.
    pub fn meta(&self, name: &str) -> Option<&OptionMeta> {
        self.meta.get(name)
    }

    /// Plain JSON object with `unpack_as` aliases applied to leaf keys.
    ///
    /// Section keys are never aliased, only leaves.
    pub fn unpack(&self) -> Value {
        let mut map = serde_json::Map::new();
        for (name, entry) in &self.entries {
            match entry {
                ConfigEntry::Section(section) => {
                    map.insert(name.clone(), section.unpack());
                }
                ConfigEntry::Value(value) => {
                    let key = self
                        .meta
                        .get(name)
                        .and_then(|meta| meta.unpack_as.clone())
                        .unwrap_or_else(|| name.clone());
                    map.insert(key, value.clone());
                }
            }
        }
        Value::Object(map)
    }

    /// Deserialize the unpacked section into a typed struct.
    pub fn unpack_into<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_value(self.unpack())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    fn plain_meta(default: Value) -> OptionMeta {
        OptionMeta {
            default,
            unpack_as: None,
            help: String::new(),
        }
    }

    fn sample() -> ConfigSection {
        let mut server = ConfigSection::new();
        server.insert_value("port", json!(0), plain_meta(json!(0)));
        server.insert_value(
            "unix",
            json!("/run/server.sock"),
            OptionMeta {
                default: json!(""),
                unpack_as: Some("unix_path".to_string()),
                help: "socket path".to_string(),
            },
        );
        let mut root = ConfigSection::new();
        root.insert_section("server", server);
        root.insert_value("debug", json!(true), plain_meta(json!(false)));
        root
    }

    #[test]
    fn test_accessors() {
        let config = sample();
        assert_eq!(config.len(), 2);
        assert_eq!(config.get_bool("debug"), Some(true));
        assert!(config.value("server").is_none());
        assert!(config.section("debug").is_none());
        let server = config.section("server").unwrap();
        assert_eq!(server.get_u64("port"), Some(0));
        assert_eq!(server.get_str("unix"), Some("/run/server.sock"));
        assert_eq!(server.meta("unix").unwrap().help, "socket path");
        assert_eq!(server.meta("unix").unwrap().default, json!(""));
    }

    #[test]
    fn test_lookup_by_path() {
        let config = sample();
        assert_eq!(config.lookup_value("server/unix"), Some(&json!("/run/server.sock")));
        assert!(config.lookup("server/missing").is_none());
        assert!(config.lookup("debug/deeper").is_none());
        assert!(config.lookup("").is_none());
        assert!(matches!(config.lookup("server"), Some(ConfigEntry::Section(_))));
    }

    #[test]
    fn test_unpack_applies_leaf_aliases() {
        let unpacked = sample().unpack();
        assert_eq!(
            unpacked,
            json!({
                "server": {"port": 0, "unix_path": "/run/server.sock"},
                "debug": true,
            })
        );
    }

    #[test]
    fn test_unpack_into_typed_struct() {
        #[derive(Deserialize)]
        struct Server {
            port: u16,
            unix_path: String,
        }
        let server: Server = sample().section("server").unwrap().unpack_into().unwrap();
        assert_eq!(server.port, 0);
        assert_eq!(server.unix_path, "/run/server.sock");
    }

    #[test]
    fn test_entry_order_is_stable() {
        let config = sample();
        let names: Vec<&str> = config.keys().collect();
        assert_eq!(names, ["server", "debug"]);
    }
}
