//! Expansion of the `timestamp` and `i18n` directives into concrete fields.

use serde_json::Value;
use std::collections::HashMap;

use searchmap_core::types::directive;
use searchmap_core::{
    Attributes, FieldDefinition, FieldIntrospector, FieldMap, Locale, ObjectDefinition, Options,
    Result, SchemaDocument,
};

use crate::normalize::canonical_name;

pub const SOURCE_CULTURE_FIELD: &str = "sourceCulture";
pub const I18N_FIELD: &str = "i18n";
pub const CREATED_AT_FIELD: &str = "createdAt";
pub const UPDATED_AT_FIELD: &str = "updatedAt";

/// First compiler pass: rewrites directives into fields, type by type.
///
/// Must run over every type before any foreign type is embedded, since
/// embedding copies a type as it currently stands.
pub struct AttributeExpander<'a> {
    locales: &'a [Locale],
    introspector: &'a dyn FieldIntrospector,
    translatable: HashMap<String, Vec<String>>,
}

impl<'a> AttributeExpander<'a> {
    pub fn new(locales: &'a [Locale], introspector: &'a dyn FieldIntrospector) -> Self {
        Self {
            locales,
            introspector,
            translatable: HashMap::new(),
        }
    }

    pub fn expand(&mut self, document: &mut SchemaDocument) -> Result<()> {
        for (type_name, definition) in document.iter_mut() {
            let Some(attributes) = &definition.attributes else {
                continue;
            };
            // Listed directives expand whatever their value, as the source
            // format writes them as bare flags.
            for name in attributes.names() {
                match name {
                    directive::I18N => {
                        self.expand_i18n(type_name, attributes, &mut definition.properties)?;
                    }
                    directive::TIMESTAMP => expand_timestamp(&mut definition.properties),
                    directive::I18N_EXTRA | directive::NESTED_ONLY => {}
                    other => {
                        tracing::debug!(type_name = %type_name, directive = other, "ignoring unknown directive");
                    }
                }
            }
        }
        Ok(())
    }

    fn expand_i18n(
        &mut self,
        type_name: &str,
        attributes: &Attributes,
        properties: &mut FieldMap,
    ) -> Result<()> {
        set_if_absent(properties, SOURCE_CULTURE_FIELD, FieldDefinition::Leaf(untokenized_string()));

        let mut translatable = FieldMap::new();
        for field in self.translatable_fields(&canonical_name(type_name))? {
            translatable.insert(field, FieldDefinition::Leaf(untokenized_string()));
        }
        if let Some(extra) = attributes.i18n_extra() {
            for field in self.translatable_fields(&canonical_name(extra))? {
                translatable.insert(field, FieldDefinition::Leaf(untokenized_string()));
            }
        }

        // One strict document per culture, kept out of the parent so shared
        // queries do not see every culture's text at once.
        let cultures: FieldMap = self
            .locales
            .iter()
            .map(|locale| {
                let culture = ObjectDefinition::new(
                    options([
                        ("type", Value::from("object")),
                        ("dynamic", Value::from("strict")),
                        ("include_in_parent", Value::Bool(false)),
                    ]),
                    translatable.clone(),
                );
                (locale.code().to_string(), FieldDefinition::Object(culture))
            })
            .collect();

        tracing::debug!(
            type_name,
            fields = translatable.len(),
            cultures = cultures.len(),
            "expanding i18n directive"
        );

        let i18n = ObjectDefinition::new(
            options([
                ("type", Value::from("object")),
                ("dynamic", Value::from("strict")),
                ("include_in_root", Value::Bool(true)),
            ]),
            cultures,
        );
        set_if_absent(properties, I18N_FIELD, FieldDefinition::Object(i18n));
        Ok(())
    }

    /// Introspects each type name at most once per compile.
    fn translatable_fields(&mut self, type_name: &str) -> Result<Vec<String>> {
        if let Some(fields) = self.translatable.get(type_name) {
            return Ok(fields.clone());
        }
        let fields = self.introspector.translatable_fields(type_name)?;
        self.translatable.insert(type_name.to_string(), fields.clone());
        Ok(fields)
    }
}

fn expand_timestamp(properties: &mut FieldMap) {
    for field in [CREATED_AT_FIELD, UPDATED_AT_FIELD] {
        set_if_absent(
            properties,
            field,
            FieldDefinition::Leaf(options([("type", Value::from("date"))])),
        );
    }
}

/// Fields written by the author always win over generated ones.
fn set_if_absent(properties: &mut FieldMap, name: &str, field: FieldDefinition) {
    if !properties.contains_key(name) {
        properties.insert(name.to_string(), field);
    }
}

fn untokenized_string() -> Options {
    options([
        ("type", Value::from("string")),
        ("index", Value::from("not_analyzed")),
        ("include_in_all", Value::Bool(false)),
    ])
}

fn options<const N: usize>(entries: [(&str, Value); N]) -> Options {
    entries
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect()
}
