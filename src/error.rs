use serde::Serialize;

use crate::naming::Identifier;

/// Aborts generation for the whole document. Nothing is emitted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerateError {
    #[error("configuration root must be an object, found {found}")]
    RootNotObject { found: &'static str },

    #[error("value at `{path}` is null and null values are rejected")]
    Unclassifiable { path: String },

    #[error("keys {first:?} and {second:?} under `{level}` both normalize to `{identifier}`")]
    NameCollision {
        level: String,
        first: String,
        second: String,
        identifier: Identifier,
    },
}

/// Non-fatal findings from one generation pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// `second` was renamed to `resolved` because `first` already took `identifier`.
    NameCollision {
        level: String,
        first: String,
        second: String,
        identifier: Identifier,
        resolved: Identifier,
    },
    NullSkipped { path: String },
    NullAsString { path: String },
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Diagnostic::NameCollision { level, first, second, identifier, resolved } => write!(
                f,
                "keys {first:?} and {second:?} under `{level}` both normalize to `{identifier}`; \
                 {second:?} is exposed as `{resolved}`"
            ),
            Diagnostic::NullSkipped { path } => {
                write!(f, "`{path}` is null; no accessor generated")
            }
            Diagnostic::NullAsString { path } => {
                write!(f, "`{path}` is null; generated as a string accessor")
            }
        }
    }
}
