//! Translatable-column lookup backed by a static column table.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::traits::FieldIntrospector;
use crate::{Error, Result};

/// One column of a model's translation table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    pub name: String,
    #[serde(default)]
    pub primary_key: bool,
    #[serde(default)]
    pub foreign_key: bool,
}

impl ColumnDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            primary_key: false,
            foreign_key: false,
        }
    }

    pub fn is_translatable(&self) -> bool {
        !self.primary_key && !self.foreign_key
    }
}

/// Either a bare column name or a full descriptor, so config files can write
/// `actor = ["authorizedFormOfName", { name = "id", primary_key = true }]`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ColumnSpec {
    Name(String),
    Column(ColumnDescriptor),
}

impl From<ColumnSpec> for ColumnDescriptor {
    fn from(spec: ColumnSpec) -> Self {
        match spec {
            ColumnSpec::Name(name) => Self::new(name),
            ColumnSpec::Column(column) => column,
        }
    }
}

/// Canonical type name -> translation table columns.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(from = "IndexMap<String, Vec<ColumnSpec>>")]
pub struct ColumnTable(IndexMap<String, Vec<ColumnDescriptor>>);

impl From<IndexMap<String, Vec<ColumnSpec>>> for ColumnTable {
    fn from(raw: IndexMap<String, Vec<ColumnSpec>>) -> Self {
        Self(
            raw.into_iter()
                .map(|(type_name, specs)| (type_name, specs.into_iter().map(Into::into).collect()))
                .collect(),
        )
    }
}

impl<S: Into<String>> FromIterator<(S, Vec<ColumnDescriptor>)> for ColumnTable {
    fn from_iter<I: IntoIterator<Item = (S, Vec<ColumnDescriptor>)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

#[derive(Debug, Clone, Default)]
pub struct ColumnIntrospector {
    tables: ColumnTable,
}

impl ColumnIntrospector {
    pub fn new(tables: ColumnTable) -> Self {
        Self { tables }
    }
}

impl FieldIntrospector for ColumnIntrospector {
    fn translatable_fields(&self, type_name: &str) -> Result<Vec<String>> {
        let columns = self
            .tables
            .0
            .get(type_name)
            .ok_or_else(|| Error::UnknownIntrospectionTarget(type_name.to_string()))?;
        Ok(columns
            .iter()
            .filter(|c| c.is_translatable())
            .map(|c| c.name.clone())
            .collect())
    }
}
