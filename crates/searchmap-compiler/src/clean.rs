use serde_json::Value;

use searchmap_core::types::{ATTRIBUTES_KEY, FOREIGN_TYPES_KEY};
use searchmap_core::{ObjectDefinition, Options, SchemaDocument};

use crate::visit::{walk_document, Visitor};

/// Strips every directive marker left in the tree, including inside embedded
/// copies and raw option values. Returns how many markers were removed.
pub fn clean_shorthands(document: &mut SchemaDocument) -> usize {
    let mut cleaner = ShorthandCleaner::default();
    walk_document(document, &mut cleaner);
    tracing::debug!(removed = cleaner.removed, "directive markers stripped");
    cleaner.removed
}

#[derive(Default)]
struct ShorthandCleaner {
    removed: usize,
}

impl Visitor for ShorthandCleaner {
    fn visit_object(&mut self, object: &mut ObjectDefinition) {
        if object.attributes.take().is_some() {
            self.removed += 1;
        }
        if object.foreign_types.take().is_some() {
            self.removed += 1;
        }
        self.removed += strip_markers(&mut object.options);
    }

    fn visit_leaf(&mut self, options: &mut Options) {
        self.removed += strip_markers(options);
    }
}

fn strip_markers(options: &mut Options) -> usize {
    let mut removed = 0;
    for key in [ATTRIBUTES_KEY, FOREIGN_TYPES_KEY] {
        if options.shift_remove(key).is_some() {
            removed += 1;
        }
    }
    for value in options.values_mut() {
        removed += strip_value(value);
    }
    removed
}

fn strip_value(value: &mut Value) -> usize {
    match value {
        Value::Object(map) => strip_markers(map),
        Value::Array(items) => items.iter_mut().map(strip_value).sum(),
        _ => 0,
    }
}
