//! Depth-first walk over every node of a mapping tree.

use searchmap_core::{FieldDefinition, ObjectDefinition, Options, SchemaDocument};

/// Callbacks for [`walk_document`]. Objects are visited before their
/// properties, so a visitor may reshape an object before its children are
/// reached.
pub trait Visitor {
    fn visit_object(&mut self, object: &mut ObjectDefinition);

    fn visit_leaf(&mut self, _options: &mut Options) {}
}

/// Visits every type, then every field below it at any depth.
pub fn walk_document(document: &mut SchemaDocument, visitor: &mut dyn Visitor) {
    for (_, definition) in document.iter_mut() {
        walk_object(definition, visitor);
    }
}

pub fn walk_object(object: &mut ObjectDefinition, visitor: &mut dyn Visitor) {
    visitor.visit_object(object);
    for field in object.properties.values_mut() {
        match field {
            FieldDefinition::Leaf(options) => visitor.visit_leaf(options),
            FieldDefinition::Object(nested) => walk_object(nested, visitor),
        }
    }
}
