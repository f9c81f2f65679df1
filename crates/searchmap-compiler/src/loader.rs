use serde_json::Value;

use searchmap_core::{Error, Result, SchemaDocument, TypeDefinition};

/// Conventional wrapper key of a mapping source.
pub const ROOT_KEY: &str = "mapping";

/// Unwraps the single root entry of a parsed source and parses the type map
/// underneath it.
///
/// A scalar source, a sequence of at most one item, an empty mapping or a
/// root wrapping `null` has nothing to index and yields an empty document.
/// Sequences of several items fail like mappings with several root keys.
pub fn load(raw: Value) -> Result<SchemaDocument> {
    let root = match raw {
        Value::Object(root) => root,
        Value::Array(items) if items.len() > 1 => {
            return Err(Error::ConfigShape(format!("found {} entries in a sequence", items.len())));
        }
        _ => {
            tracing::debug!("mapping source is not a mapping, nothing to index");
            return Ok(SchemaDocument::new());
        }
    };
    if root.len() > 1 {
        let keys: Vec<&str> = root.keys().map(String::as_str).collect();
        return Err(Error::ConfigShape(format!(
            "found {} entries ({})",
            keys.len(),
            keys.join(", ")
        )));
    }
    let Some((root_key, types)) = root.into_iter().next() else {
        return Ok(SchemaDocument::new());
    };
    if root_key != ROOT_KEY {
        tracing::debug!(root_key = %root_key, "unwrapping unconventional root key");
    }

    let types = match types {
        Value::Null => return Ok(SchemaDocument::new()),
        Value::Object(types) => types,
        _ => {
            return Err(Error::ConfigShape(format!(
                "'{root_key}' must wrap a mapping of type definitions"
            )))
        }
    };

    let mut document = SchemaDocument::new();
    for (type_name, definition) in types {
        let definition = TypeDefinition::from_value(&type_name, definition)?;
        document.insert(type_name, definition);
    }
    tracing::debug!(types = document.len(), "mapping source loaded");
    Ok(document)
}
