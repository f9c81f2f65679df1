//! Error type shared by the compiler stages and the config-backed collaborators.

use thiserror::Error;

/// Every variant is fatal to a compile: no partial mapping is ever returned.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Mapping source must contain exactly one root entry: {0}")]
    ConfigShape(String),

    #[error("Type '{type_name}' embeds unknown type '{target}' under field '{field}'")]
    UnknownForeignType {
        type_name: String,
        field: String,
        target: String,
    },

    #[error("No translatable columns known for type '{0}'")]
    UnknownIntrospectionTarget(String),

    #[error("Foreign types reference each other in a cycle: {}", .0.join(" -> "))]
    ForeignTypeCycle(Vec<String>),

    #[error("Invalid definition at '{path}': {reason}")]
    InvalidDefinition { path: String, reason: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    pub(crate) fn invalid(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidDefinition {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
