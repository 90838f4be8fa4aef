//! Error types for the kash crate.
//!
//! Encoding failures are modelled as a semantic enum with `thiserror`, in the
//! same shape as the CLI errors that wrap them.

use thiserror::Error;

/// Errors raised while writing a gob stream.
///
/// Encoding the fixed cache key shape into an in-memory hasher cannot fail in
/// practice; the variants exist for malformed [`crate::gob::Value`] trees and
/// failing writers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// The underlying writer rejected a message.
    #[error("failed to write gob message: {message}")]
    Io {
        /// Description of the I/O error.
        message: String,
    },

    /// A value does not have the shape its declared type requires.
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        /// Name of the declared type.
        expected: String,
        /// Kind of the value supplied.
        found: &'static str,
    },

    /// A struct value carries the wrong number of fields.
    #[error("struct {type_name} has {expected} fields, value supplies {actual}")]
    FieldCountMismatch {
        /// Name of the struct type.
        type_name: String,
        /// Number of declared fields.
        expected: usize,
        /// Number of field values supplied.
        actual: usize,
    },

    /// Two different type shapes were registered under the same name.
    #[error("type name '{name}' already registered with a different shape")]
    ConflictingType {
        /// The contested type name.
        name: String,
    },

    /// The encoder ran out of type ids.
    #[error("gob type id space exhausted")]
    TypeIdExhausted,
}

impl From<std::io::Error> for EncodeError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: err.to_string(),
        }
    }
}
