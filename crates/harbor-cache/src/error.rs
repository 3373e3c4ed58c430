//! Error types for structure construction.

use thiserror::Error;

use crate::structure::StructureKind;

/// Errors raised when a raw record cannot be turned into a structure.
#[derive(Debug, Error)]
pub enum StructureError {
    /// The raw record has no usable `id`.
    #[error("{kind} record has no usable id")]
    MissingId { kind: StructureKind },

    /// The raw record is not a JSON object.
    #[error("{kind} record is not an object")]
    NotAnObject { kind: StructureKind },

    /// A field has the wrong shape.
    #[error("{kind} field `{field}` is invalid: {reason}")]
    InvalidField {
        kind: StructureKind,
        field: &'static str,
        reason: String,
    },
}
