use crate::types::Locale;
use crate::Result;

/// Supplies the configured culture codes.
///
/// Implementations must return the current configuration on every call;
/// compilers read it once per compile and never cache it across compiles.
pub trait LocaleProvider: Send + Sync {
    fn locales(&self) -> Result<Vec<Locale>>;
}

/// Looks up the translatable columns of a data model by canonical type name.
///
/// Primary-key and foreign-key columns are never translatable. Unknown
/// type names fail with [`crate::Error::UnknownIntrospectionTarget`].
pub trait FieldIntrospector: Send + Sync {
    fn translatable_fields(&self, type_name: &str) -> Result<Vec<String>>;
}

impl LocaleProvider for Vec<Locale> {
    fn locales(&self) -> Result<Vec<Locale>> {
        Ok(self.clone())
    }
}
