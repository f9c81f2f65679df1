//! Compiles shorthand mapping sources into directive-free index mappings.
//!
//! The stages run strictly in order, each over the same owned
//! [`SchemaDocument`]:
//!
//! 1. [`loader`] unwraps the single root key and parses the type map
//! 2. [`normalize`] camel-cases property names
//! 3. [`expand`] turns `timestamp` / `i18n` into fields, for every type
//! 4. [`embed`] copies foreign types into the fields that reference them
//! 5. [`filter`] drops `nested_only` types from the top level
//! 6. [`clean`] strips the remaining directive markers at every depth
//!
//! Any failing stage aborts the compile.

pub mod clean;
pub mod embed;
pub mod expand;
pub mod filter;
pub mod loader;
pub mod normalize;
pub mod visit;

use serde_json::Value;

use searchmap_core::{
    CompileOptions, FieldIntrospector, Locale, LocaleProvider, Result, SchemaDocument,
};

use crate::expand::AttributeExpander;

#[derive(Debug, Clone, Copy, Default)]
pub struct MappingCompiler {
    options: CompileOptions,
}

impl MappingCompiler {
    pub fn new(options: CompileOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> CompileOptions {
        self.options
    }

    /// Compiles a parsed mapping source (`{mapping: {type: {...}}}`).
    pub fn compile(
        &self,
        raw: Value,
        locales: &[Locale],
        introspector: &dyn FieldIntrospector,
    ) -> Result<SchemaDocument> {
        let mut document = loader::load(raw)?;

        normalize::normalize_field_names(&mut document, self.options.collision_policy);
        AttributeExpander::new(locales, introspector).expand(&mut document)?;
        embed::embed_foreign_types(&mut document, self.options.embed_order)?;
        let nested_only = filter::exclude_nested_only(&mut document);
        clean::clean_shorthands(&mut document);

        tracing::info!(
            types = document.len(),
            nested_only = nested_only.len(),
            locales = locales.len(),
            "mapping compiled"
        );
        Ok(document)
    }

    /// Reads the current locales once, then compiles.
    pub fn compile_with(
        &self,
        raw: Value,
        locales: &dyn LocaleProvider,
        introspector: &dyn FieldIntrospector,
    ) -> Result<SchemaDocument> {
        let locales = locales.locales()?;
        self.compile(raw, &locales, introspector)
    }
}
