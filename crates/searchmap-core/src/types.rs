//! Typed mapping tree the compiler stages operate on.
//!
//! Source trees arrive as order-preserving `serde_json::Value`s and are
//! parsed into [`SchemaDocument`]. Directive markers (`_attributes`,
//! `_foreign_types`) are lifted out of the option maps into dedicated fields
//! so later stages can expand and strip them without string matching.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::{Error, Result};

pub const PROPERTIES_KEY: &str = "properties";
pub const ATTRIBUTES_KEY: &str = "_attributes";
pub const FOREIGN_TYPES_KEY: &str = "_foreign_types";

/// Directive names recognised inside `_attributes`.
pub mod directive {
    pub const I18N: &str = "i18n";
    pub const I18N_EXTRA: &str = "i18nExtra";
    pub const TIMESTAMP: &str = "timestamp";
    pub const NESTED_ONLY: &str = "nested_only";
}

pub type Options = Map<String, Value>;
pub type FieldMap = IndexMap<String, FieldDefinition>;
pub type ForeignTypes = IndexMap<String, String>;

/// A culture code such as `en` or `fr`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Locale(String);

impl Locale {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn code(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Locale {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Ordered directive name -> parameter block of a type.
///
/// A directive counts as set only when its value is non-null, so
/// `nested_only: ~` in YAML does not mark a type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attributes(IndexMap<String, Value>);

impl Attributes {
    pub fn is_set(&self, name: &str) -> bool {
        self.0.get(name).is_some_and(|v| !v.is_null())
    }

    /// Name of the extra type whose translatable columns join this type's.
    pub fn i18n_extra(&self) -> Option<&str> {
        self.0.get(directive::I18N_EXTRA).and_then(Value::as_str)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    fn into_value(self) -> Value {
        Value::Object(self.0.into_iter().collect())
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// A mapping node with its own `properties`: a top-level type or a nested
/// object field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectDefinition {
    /// Everything besides `properties` and the directive markers
    /// (`type`, `dynamic`, `include_in_root`, ...).
    pub options: Options,
    pub properties: FieldMap,
    pub attributes: Option<Attributes>,
    pub foreign_types: Option<ForeignTypes>,
}

pub type TypeDefinition = ObjectDefinition;

/// Type definitions reject malformed directive markers. Nested objects keep
/// them as raw options, which the cleaner strips like any other marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Markers {
    Strict,
    Lenient,
}

impl ObjectDefinition {
    pub fn new(options: Options, properties: FieldMap) -> Self {
        Self {
            options,
            properties,
            attributes: None,
            foreign_types: None,
        }
    }

    /// Parses a type definition; `path` is used in error messages only.
    pub fn from_value(path: &str, value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Self::from_map(path, map, Markers::Strict),
            other => Err(Error::invalid(path, format!("expected a mapping, found {}", kind(&other)))),
        }
    }

    fn from_map(path: &str, mut map: Options, markers: Markers) -> Result<Self> {
        let properties = match map.shift_remove(PROPERTIES_KEY) {
            None | Some(Value::Null) => FieldMap::new(),
            Some(Value::Object(fields)) => {
                let mut properties = FieldMap::with_capacity(fields.len());
                for (name, field) in fields {
                    let field_path = format!("{path}.{PROPERTIES_KEY}.{name}");
                    properties.insert(name, FieldDefinition::from_value(&field_path, field)?);
                }
                properties
            }
            Some(other) => {
                return Err(Error::invalid(
                    format!("{path}.{PROPERTIES_KEY}"),
                    format!("expected a mapping, found {}", kind(&other)),
                ))
            }
        };

        let attributes = match map.shift_remove(ATTRIBUTES_KEY) {
            None | Some(Value::Null) => None,
            Some(Value::Object(entries)) => Some(entries.into_iter().collect()),
            Some(other) if markers == Markers::Lenient => {
                map.insert(ATTRIBUTES_KEY.to_string(), other);
                None
            }
            Some(other) => {
                return Err(Error::invalid(
                    format!("{path}.{ATTRIBUTES_KEY}"),
                    format!("expected a mapping, found {}", kind(&other)),
                ))
            }
        };

        let foreign_types = match map.shift_remove(FOREIGN_TYPES_KEY) {
            None | Some(Value::Null) => None,
            Some(other)
                if markers == Markers::Lenient
                    && !other.as_object().is_some_and(|entries| entries.values().all(Value::is_string)) =>
            {
                map.insert(FOREIGN_TYPES_KEY.to_string(), other);
                None
            }
            Some(Value::Object(entries)) => {
                let mut foreign = ForeignTypes::with_capacity(entries.len());
                for (field, target) in entries {
                    match target {
                        Value::String(target) => {
                            foreign.insert(field, target);
                        }
                        other => {
                            return Err(Error::invalid(
                                format!("{path}.{FOREIGN_TYPES_KEY}.{field}"),
                                format!("expected a type name, found {}", kind(&other)),
                            ))
                        }
                    }
                }
                Some(foreign)
            }
            Some(other) => {
                return Err(Error::invalid(
                    format!("{path}.{FOREIGN_TYPES_KEY}"),
                    format!("expected a mapping, found {}", kind(&other)),
                ))
            }
        };

        Ok(Self {
            options: map,
            properties,
            attributes,
            foreign_types,
        })
    }

    pub fn has_directives(&self) -> bool {
        self.attributes.is_some() || self.foreign_types.is_some()
    }

    pub fn to_value(&self) -> Value {
        self.clone().into_value()
    }

    /// Options first, then `properties`, then any directive markers still
    /// attached.
    pub fn into_value(self) -> Value {
        let mut map = self.options;
        let properties: Options = self
            .properties
            .into_iter()
            .map(|(name, field)| (name, field.into_value()))
            .collect();
        map.insert(PROPERTIES_KEY.to_string(), Value::Object(properties));
        if let Some(attributes) = self.attributes {
            map.insert(ATTRIBUTES_KEY.to_string(), attributes.into_value());
        }
        if let Some(foreign_types) = self.foreign_types {
            let foreign: Options = foreign_types
                .into_iter()
                .map(|(field, target)| (field, Value::String(target)))
                .collect();
            map.insert(FOREIGN_TYPES_KEY.to_string(), Value::Object(foreign));
        }
        Value::Object(map)
    }
}

/// A field of a `properties` map: a leaf with index options, or a nested
/// object carrying its own `properties`.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldDefinition {
    Leaf(Options),
    Object(ObjectDefinition),
}

impl FieldDefinition {
    /// A mapping is an object field exactly when it carries `properties`.
    pub fn from_value(path: &str, value: Value) -> Result<Self> {
        match value {
            Value::Object(map) if map.contains_key(PROPERTIES_KEY) => {
                Ok(Self::Object(ObjectDefinition::from_map(path, map, Markers::Lenient)?))
            }
            Value::Object(map) => Ok(Self::Leaf(map)),
            other => Err(Error::invalid(path, format!("expected a mapping, found {}", kind(&other)))),
        }
    }

    pub fn options(&self) -> &Options {
        match self {
            Self::Leaf(options) => options,
            Self::Object(object) => &object.options,
        }
    }

    pub fn as_object(&self) -> Option<&ObjectDefinition> {
        match self {
            Self::Object(object) => Some(object),
            Self::Leaf(_) => None,
        }
    }

    pub fn into_value(self) -> Value {
        match self {
            Self::Leaf(options) => Value::Object(options),
            Self::Object(object) => object.into_value(),
        }
    }
}

/// Ordered type name -> type definition map, owned by one compile.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaDocument {
    types: IndexMap<String, TypeDefinition>,
}

impl SchemaDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.types.contains_key(type_name)
    }

    pub fn get(&self, type_name: &str) -> Option<&TypeDefinition> {
        self.types.get(type_name)
    }

    pub fn get_mut(&mut self, type_name: &str) -> Option<&mut TypeDefinition> {
        self.types.get_mut(type_name)
    }

    pub fn insert(&mut self, type_name: impl Into<String>, definition: TypeDefinition) {
        self.types.insert(type_name.into(), definition);
    }

    /// Removes a type, keeping the order of the remaining ones.
    pub fn remove(&mut self, type_name: &str) -> Option<TypeDefinition> {
        self.types.shift_remove(type_name)
    }

    /// Snapshot of the type names in document order, for stages that mutate
    /// the document while walking it.
    pub fn type_names(&self) -> Vec<String> {
        self.types.keys().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &TypeDefinition)> {
        self.types.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&String, &mut TypeDefinition)> {
        self.types.iter_mut()
    }

    pub fn to_value(&self) -> Value {
        self.clone().into_value()
    }

    pub fn into_value(self) -> Value {
        Value::Object(
            self.types
                .into_iter()
                .map(|(name, definition)| (name, definition.into_value()))
                .collect(),
        )
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}
