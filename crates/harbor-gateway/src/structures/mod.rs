//! Gateway structures and raw-record field helpers.

mod guild;
mod user;

pub use guild::Guild;
pub use user::{ClientUser, User};

use harbor_cache::{StructureError, StructureKind};
use serde_json::Value;

/// Read an optional string field. `null` and absence both yield `None`.
fn opt_string(
    data: &Value,
    kind: StructureKind,
    field: &'static str,
) -> Result<Option<String>, StructureError> {
    match data.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(invalid(kind, field, other)),
    }
}

/// Read an optional boolean field.
fn opt_bool(
    data: &Value,
    kind: StructureKind,
    field: &'static str,
) -> Result<Option<bool>, StructureError> {
    match data.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(*b)),
        Some(other) => Err(invalid(kind, field, other)),
    }
}

/// Read an optional unsigned integer field.
fn opt_u64(
    data: &Value,
    kind: StructureKind,
    field: &'static str,
) -> Result<Option<u64>, StructureError> {
    match data.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(v) => v.as_u64().map(Some).ok_or_else(|| invalid(kind, field, v)),
    }
}

/// Field present in a patch: `Some(None)` for an explicit `null`.
fn patch_nullable(data: &Value, field: &str) -> Option<Option<String>> {
    data.get(field).map(|v| v.as_str().map(str::to_string))
}

fn invalid(kind: StructureKind, field: &'static str, value: &Value) -> StructureError {
    StructureError::InvalidField {
        kind,
        field,
        reason: format!("unexpected value {}", value),
    }
}
