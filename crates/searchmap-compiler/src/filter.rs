use searchmap_core::types::directive;
use searchmap_core::SchemaDocument;

/// Drops types marked `nested_only` from the top level and returns their
/// names. Runs after embedding, while the copies still exist elsewhere.
pub fn exclude_nested_only(document: &mut SchemaDocument) -> Vec<String> {
    let nested_only: Vec<String> = document
        .iter()
        .filter(|(_, definition)| {
            definition
                .attributes
                .as_ref()
                .is_some_and(|attributes| attributes.is_set(directive::NESTED_ONLY))
        })
        .map(|(type_name, _)| type_name.clone())
        .collect();

    for type_name in &nested_only {
        document.remove(type_name);
        tracing::debug!(type_name = %type_name, "removed nested-only type");
    }
    nested_only
}
