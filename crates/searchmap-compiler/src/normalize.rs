use indexmap::map::Entry;

use searchmap_core::{CollisionPolicy, FieldMap, SchemaDocument};

/// Canonical camel-case form of a field or type name.
///
/// The first character and every character following a run of `_` or `-`
/// are upper-cased and the separators dropped; `/` becomes `::`. Other
/// characters are left alone, then the first character is lower-cased, so
/// `created_at` becomes `createdAt` and `createdAt` stays as it is.
pub fn canonical_name(name: &str) -> String {
    let mut camel = String::with_capacity(name.len());
    let mut pending: Option<char> = None;
    let mut upper_next = true;
    for c in name.chars() {
        match c {
            '_' | '-' => {
                pending = Some(c);
                upper_next = true;
            }
            '/' => {
                pending = None;
                camel.push_str("::");
                upper_next = true;
            }
            _ => {
                pending = None;
                camel.push(if upper_next { c.to_ascii_uppercase() } else { c });
                upper_next = false;
            }
        }
    }
    // A trailing separator run has nothing to upper-case; its last char stays.
    if let Some(c) = pending {
        camel.push(c);
    }
    lcfirst(camel)
}

fn lcfirst(mut s: String) -> String {
    if let Some(first) = s.get_mut(0..1) {
        first.make_ascii_lowercase();
    }
    s
}

/// Renames every top-level property of every type to its canonical name.
///
/// Renamed entries keep their position. When two names collapse into one,
/// `policy` decides which value survives.
pub fn normalize_field_names(document: &mut SchemaDocument, policy: CollisionPolicy) {
    for (type_name, definition) in document.iter_mut() {
        let source = std::mem::take(&mut definition.properties);
        let mut properties = FieldMap::with_capacity(source.len());
        for (name, field) in source {
            let canonical = canonical_name(&name);
            let renamed = canonical != name;
            if renamed {
                tracing::debug!(type_name = %type_name, from = %name, to = %canonical, "field renamed");
            }
            match properties.entry(canonical) {
                Entry::Vacant(slot) => {
                    slot.insert(field);
                }
                Entry::Occupied(mut slot) => {
                    tracing::warn!(
                        type_name = %type_name,
                        field = %slot.key(),
                        source_name = %name,
                        ?policy,
                        "field names collide after normalization"
                    );
                    let replace = match policy {
                        CollisionPolicy::PreferRenamed => renamed,
                        CollisionPolicy::KeepLast => true,
                        CollisionPolicy::KeepFirst => false,
                    };
                    if replace {
                        slot.insert(field);
                    }
                }
            }
        }
        definition.properties = properties;
    }
}
