//! Schema model.
//!
//! A `Schema` declares the shape of one configuration section: which keys
//! exist, which of them are options with defaults and coercions, and which
//! are nested sections. Resolution walks raw input against this model.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value;

use okvm_validators::{basic, check_not_none_string, ValidatorError};

use crate::error::SchemaError;

/// Coercion applied to a raw value before it enters the resolved tree.
pub type CoerceFn = dyn Fn(&Value) -> Result<Value, ValidatorError> + Send + Sync;

/// Dependency of a conditional option on a sibling option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    key: String,
    invert: bool,
}

impl Condition {
    /// Key of the controlling option within the same section.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Whether this option applies when the controlling value is falsy.
    pub fn invert(&self) -> bool {
        self.invert
    }
}

/// A single option: default value, optional coercion, and metadata.
#[derive(Clone)]
pub struct OptionDef {
    default: Value,
    coerce: Option<Arc<CoerceFn>>,
    condition: Option<Condition>,
    unpack_as: Option<String>,
    help: String,
}

impl OptionDef {
    /// Option with the given default and no explicit coercion.
    ///
    /// Without `coerce`, resolution derives the coercion from the kind of
    /// the default: bools, numbers, and strings are validated as such,
    /// arrays and maps must match, and a null default passes anything.
    pub fn new(default: Value) -> Self {
        Self {
            default,
            coerce: None,
            condition: None,
            unpack_as: None,
            help: String::new(),
        }
    }

    /// Validate and convert raw values with the given function.
    pub fn coerce(
        mut self,
        f: impl Fn(&Value) -> Result<Value, ValidatorError> + Send + Sync + 'static,
    ) -> Self {
        self.coerce = Some(Arc::new(f));
        self
    }

    /// Resolve this option only when the sibling `key` is truthy.
    pub fn only_if(mut self, key: &str) -> Self {
        self.condition = Some(Condition {
            key: key.to_string(),
            invert: false,
        });
        self
    }

    /// Resolve this option only when the sibling `key` is falsy.
    pub fn only_if_not(mut self, key: &str) -> Self {
        self.condition = Some(Condition {
            key: key.to_string(),
            invert: true,
        });
        self
    }

    /// Alias to use instead of the key when unpacking flat arguments.
    pub fn unpack_as(mut self, name: &str) -> Self {
        self.unpack_as = Some(name.to_string());
        self
    }

    /// One-line description shown in config dumps.
    pub fn help(mut self, text: &str) -> Self {
        self.help = text.to_string();
        self
    }

    pub fn default(&self) -> &Value {
        &self.default
    }

    pub fn condition(&self) -> Option<&Condition> {
        self.condition.as_ref()
    }

    pub fn unpack_name(&self) -> Option<&str> {
        self.unpack_as.as_deref()
    }

    pub fn help_text(&self) -> &str {
        &self.help
    }

    /// Run a raw value through this option's coercion.
    pub fn apply(&self, value: &Value) -> Result<Value, ValidatorError> {
        if let Some(coerce) = &self.coerce {
            return coerce(value);
        }
        match &self.default {
            Value::Null => Ok(value.clone()),
            Value::Bool(_) => basic::valid_bool(value),
            Value::Number(number) if number.is_f64() => basic::valid_float_any(value),
            Value::Number(_) => basic::valid_int_any(value),
            Value::String(_) => check_not_none_string(value, "string", false).map(Value::String),
            Value::Array(_) => {
                if value.is_array() {
                    Ok(value.clone())
                } else {
                    Err(ValidatorError::new(value, "list"))
                }
            }
            Value::Object(_) => {
                if value.is_object() {
                    Ok(value.clone())
                } else {
                    Err(ValidatorError::new(value, "map"))
                }
            }
        }
    }
}

impl fmt::Debug for OptionDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptionDef")
            .field("default", &self.default)
            .field("coerce", &self.coerce.as_ref().map(|_| "fn"))
            .field("condition", &self.condition)
            .field("unpack_as", &self.unpack_as)
            .field("help", &self.help)
            .finish()
    }
}

/// One declared key in a section.
#[derive(Debug, Clone)]
pub enum SchemaEntry {
    Option(OptionDef),
    Section(Schema),
}

/// Declared shape of one configuration section.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    entries: IndexMap<String, SchemaEntry>,
    extensible: bool,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare an option under `name`.
    pub fn option(self, name: &str, def: OptionDef) -> Self {
        self.entry(name, SchemaEntry::Option(def))
    }

    /// Declare a nested section under `name`.
    pub fn section(self, name: &str, schema: Schema) -> Self {
        self.entry(name, SchemaEntry::Section(schema))
    }

    pub fn entry(mut self, name: &str, entry: SchemaEntry) -> Self {
        self.entries.insert(name.to_string(), entry);
        self
    }

    /// Accept keys this schema does not declare.
    ///
    /// Used for plugin slots whose final shape is only known once the
    /// plugin named by the 'type' option contributes its own options.
    pub fn extensible(mut self) -> Self {
        self.extensible = true;
        self
    }

    pub fn is_extensible(&self) -> bool {
        self.extensible
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&SchemaEntry> {
        self.entries.get(name)
    }

    /// Entries in declaration order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &SchemaEntry)> {
        self.entries
            .iter()
            .map(|(name, entry)| (name.as_str(), entry))
    }

    /// Copy of this schema with `additions` merged into the section at `path`.
    ///
    /// The extended section stops accepting undeclared keys: once a plugin
    /// has contributed its options, anything left over is a typo.
    pub fn extend_at<S: AsRef<str>>(
        &self,
        path: &[S],
        additions: Schema,
    ) -> Result<Schema, SchemaError> {
        let segments: Vec<&str> = path.iter().map(|s| s.as_ref()).collect();
        extend(self, &segments, 0, additions)
    }
}

fn extend(
    schema: &Schema,
    path: &[&str],
    depth: usize,
    additions: Schema,
) -> Result<Schema, SchemaError> {
    if depth == path.len() {
        let mut extended = schema.clone();
        extended.extensible = false;
        for (name, entry) in additions.entries {
            if extended.entries.contains_key(&name) {
                return Err(SchemaError::ExtensionCollision {
                    path: path.join("/"),
                    key: name,
                });
            }
            extended.entries.insert(name, entry);
        }
        return Ok(extended);
    }
    let name = path[depth];
    match schema.entries.get(name) {
        Some(SchemaEntry::Section(inner)) => {
            let mut extended = schema.clone();
            let replaced = extend(inner, path, depth + 1, additions)?;
            extended
                .entries
                .insert(name.to_string(), SchemaEntry::Section(replaced));
            Ok(extended)
        }
        _ => Err(SchemaError::BadExtensionPath {
            path: path[..=depth].join("/"),
        }),
    }
}
