#![deny(warnings)]
#![deny(dead_code)]
#![deny(unused_variables)]
#![deny(unused_imports)]

pub mod config;
pub mod error;
pub mod introspect;
pub mod options;
pub mod traits;
pub mod types;

pub use error::{Error, Result};
pub use introspect::{ColumnDescriptor, ColumnIntrospector, ColumnSpec, ColumnTable};
pub use options::{CollisionPolicy, CompileOptions, EmbedOrder};
pub use traits::{FieldIntrospector, LocaleProvider};
pub use types::{
    Attributes, FieldDefinition, FieldMap, ForeignTypes, Locale, ObjectDefinition, Options,
    SchemaDocument, TypeDefinition,
};
