//! Error types for polymorphic encoding and decoding.

use thiserror::Error;

/// Errors that can occur while encoding or decoding a sealed type.
#[derive(Error, Debug)]
pub enum CodecError {
    /// Object mode: the discriminator key was not present in the object.
    #[error("missing class discriminator '{key}'")]
    MissingDiscriminator { key: String },

    /// The discriminator label does not name any registered variant.
    #[error("unknown class discriminator '{0}'")]
    UnknownDiscriminator(String),

    /// Array mode: the input array did not have exactly two elements.
    #[error("expected a [label, body] array of 2 elements, got {got}")]
    MalformedArrayShape { got: usize },

    /// A required field was absent from the body.
    #[error("missing field '{0}'")]
    MissingField(String),

    /// A tree node had a different shape than the field or mode expects.
    #[error("type mismatch: expected {expected}, got {got}")]
    TypeMismatch { expected: String, got: String },

    /// Encode side: the instance's variant is not part of its sealed type's schema.
    #[error("variant '{variant}' is not registered for sealed type '{sealed}'")]
    UnregisteredVariant { sealed: String, variant: String },

    /// A field was read or written that the variant does not declare.
    #[error("variant '{variant}' does not declare field '{field}'")]
    UndeclaredField { variant: String, field: String },

    /// The sealed type's schema is inconsistent (duplicate labels, names, or wire keys).
    #[error("invalid schema for '{sealed}': {message}")]
    SchemaConflict { sealed: String, message: String },

    /// A nested failure, annotated with the dotted path where it happened.
    #[error("at '{path}': {source}")]
    AtPath {
        path: String,
        #[source]
        source: Box<CodecError>,
    },

    /// The input string was not valid JSON (JSON bridge only).
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

impl CodecError {
    pub(crate) fn mismatch(expected: impl Into<String>, got: impl Into<String>) -> Self {
        CodecError::TypeMismatch {
            expected: expected.into(),
            got: got.into(),
        }
    }

    /// Prefix the error with a path segment. Nested `AtPath` errors are merged
    /// so the final path reads outermost-first (`outer.inner[2]`).
    pub(crate) fn at(self, segment: &str) -> Self {
        match self {
            CodecError::AtPath { path, source } => {
                let joined = if path.starts_with('[') {
                    format!("{segment}{path}")
                } else {
                    format!("{segment}.{path}")
                };
                CodecError::AtPath {
                    path: joined,
                    source,
                }
            }
            other => CodecError::AtPath {
                path: segment.to_string(),
                source: Box::new(other),
            },
        }
    }

    /// The underlying error with any path annotations stripped.
    pub fn root_cause(&self) -> &CodecError {
        match self {
            CodecError::AtPath { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// Dotted path to the failing node, if the error happened below the root.
    pub fn path(&self) -> Option<&str> {
        match self {
            CodecError::AtPath { path, .. } => Some(path),
            _ => None,
        }
    }
}

/// Convenience alias used throughout tagtree-core.
pub type Result<T> = std::result::Result<T, CodecError>;
