use std::collections::HashSet;

use searchmap_core::{EmbedOrder, Error, FieldDefinition, Result, SchemaDocument};

/// Second compiler pass: copies referenced types into the fields named by
/// `_foreign_types`.
///
/// Each copy is the referenced type as it stands when the copy is made, so
/// with [`EmbedOrder::Declaration`] a type embedded before it received its
/// own foreign types is copied without them.
pub fn embed_foreign_types(document: &mut SchemaDocument, order: EmbedOrder) -> Result<()> {
    check_references(document)?;

    let type_names = match order {
        EmbedOrder::Declaration => document.type_names(),
        EmbedOrder::Dependencies => dependency_order(document)?,
    };

    for type_name in type_names {
        let Some(foreign_types) = document
            .get(&type_name)
            .and_then(|definition| definition.foreign_types.clone())
        else {
            continue;
        };
        for (field, target) in foreign_types {
            let already_defined = document
                .get(&type_name)
                .is_some_and(|definition| definition.properties.contains_key(&field));
            if already_defined {
                tracing::debug!(type_name = %type_name, field = %field, "keeping explicit field over foreign type");
                continue;
            }
            let embedded = document
                .get(&target)
                .cloned()
                .ok_or_else(|| unknown_foreign_type(&type_name, &field, &target))?;
            tracing::debug!(type_name = %type_name, field = %field, target = %target, "embedding foreign type");
            if let Some(definition) = document.get_mut(&type_name) {
                definition
                    .properties
                    .insert(field, FieldDefinition::Object(embedded));
            }
        }
    }
    Ok(())
}

fn check_references(document: &SchemaDocument) -> Result<()> {
    for (type_name, definition) in document.iter() {
        for (field, target) in definition.foreign_types.iter().flatten() {
            if !document.contains(target) {
                return Err(unknown_foreign_type(type_name, field, target));
            }
        }
    }
    Ok(())
}

fn unknown_foreign_type(type_name: &str, field: &str, target: &str) -> Error {
    Error::UnknownForeignType {
        type_name: type_name.to_string(),
        field: field.to_string(),
        target: target.to_string(),
    }
}

/// Type names ordered so every referenced type precedes the types embedding
/// it. Self references do not constrain the order.
fn dependency_order(document: &SchemaDocument) -> Result<Vec<String>> {
    let mut sorter = TopoSort {
        document,
        done: HashSet::new(),
        stack: Vec::new(),
        order: Vec::with_capacity(document.len()),
    };
    for type_name in document.type_names() {
        sorter.visit(&type_name)?;
    }
    Ok(sorter.order)
}

struct TopoSort<'a> {
    document: &'a SchemaDocument,
    done: HashSet<String>,
    stack: Vec<String>,
    order: Vec<String>,
}

impl TopoSort<'_> {
    fn visit(&mut self, type_name: &str) -> Result<()> {
        if self.done.contains(type_name) {
            return Ok(());
        }
        if let Some(pos) = self.stack.iter().position(|name| name == type_name) {
            let mut cycle = self.stack[pos..].to_vec();
            cycle.push(type_name.to_string());
            return Err(Error::ForeignTypeCycle(cycle));
        }

        self.stack.push(type_name.to_string());
        let document = self.document;
        if let Some(foreign_types) = document.get(type_name).and_then(|d| d.foreign_types.as_ref()) {
            for target in foreign_types.values().filter(|target| *target != type_name) {
                self.visit(target)?;
            }
        }
        self.stack.pop();

        self.done.insert(type_name.to_string());
        self.order.push(type_name.to_string());
        Ok(())
    }
}
