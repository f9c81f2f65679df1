#![allow(dead_code)]

use serde_json::Value;

use searchmap_compiler::MappingCompiler;
use searchmap_core::{
    ColumnDescriptor, ColumnIntrospector, ColumnTable, CompileOptions, Locale, SchemaDocument,
};

pub fn locales() -> Vec<Locale> {
    vec![Locale::from("en"), Locale::from("fr")]
}

fn key(name: &str) -> ColumnDescriptor {
    ColumnDescriptor {
        name: name.to_string(),
        primary_key: true,
        foreign_key: false,
    }
}

fn foreign(name: &str) -> ColumnDescriptor {
    ColumnDescriptor {
        name: name.to_string(),
        primary_key: false,
        foreign_key: true,
    }
}

pub fn introspector() -> ColumnIntrospector {
    ColumnIntrospector::new(ColumnTable::from_iter([
        (
            "actor",
            vec![
                key("id"),
                ColumnDescriptor::new("authorizedFormOfName"),
                ColumnDescriptor::new("history"),
                foreign("parentId"),
            ],
        ),
        (
            "informationObject",
            vec![
                key("id"),
                ColumnDescriptor::new("title"),
                ColumnDescriptor::new("scopeAndContent"),
            ],
        ),
        ("repository", vec![key("id"), ColumnDescriptor::new("history"), ColumnDescriptor::new("geoculturalContext")]),
        ("otherName", vec![key("id"), ColumnDescriptor::new("name")]),
    ]))
}

pub fn compile(raw: Value) -> searchmap_core::Result<SchemaDocument> {
    compile_with_options(raw, CompileOptions::default())
}

pub fn compile_with_options(raw: Value, options: CompileOptions) -> searchmap_core::Result<SchemaDocument> {
    MappingCompiler::new(options).compile(raw, &locales(), &introspector())
}

/// Property names of a type or object, in order.
pub fn property_names(value: &Value) -> Vec<String> {
    value["properties"]
        .as_object()
        .map(|properties| properties.keys().cloned().collect())
        .unwrap_or_default()
}

/// Paths of every directive marker left anywhere in `value`.
pub fn marker_paths(value: &Value, path: &str, found: &mut Vec<String>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let child_path = format!("{path}.{key}");
                if key == "_attributes" || key == "_foreign_types" {
                    found.push(child_path.clone());
                }
                marker_paths(child, &child_path, found);
            }
        }
        Value::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                marker_paths(item, &format!("{path}[{i}]"), found);
            }
        }
        _ => {}
    }
}
