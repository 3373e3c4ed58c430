//! Structures held by a [`DataStore`](crate::DataStore).
//!
//! A structure is a domain entity received from the gateway. It has a stable
//! string identifier and can absorb partial updates in place.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::StructureError;

/// Identifier of a gateway shard.
pub type ShardId = u32;

/// The closed set of structure kinds a client knows how to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StructureKind {
    Guild,
    User,
    ClientUser,
}

impl StructureKind {
    /// Logical name of the kind.
    pub fn name(self) -> &'static str {
        match self {
            StructureKind::Guild => "Guild",
            StructureKind::User => "User",
            StructureKind::ClientUser => "ClientUser",
        }
    }
}

impl fmt::Display for StructureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Where a raw record came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Origin {
    /// Shard that delivered the record, if known.
    pub shard_id: Option<ShardId>,
}

impl Origin {
    /// Origin for a record delivered by `shard_id`.
    pub fn shard(shard_id: ShardId) -> Self {
        Self {
            shard_id: Some(shard_id),
        }
    }
}

/// Constructor for a structure from its raw record.
pub type Factory<S> = fn(&Value, &Origin) -> Result<S, StructureError>;

/// A domain entity addressable by id.
pub trait Structure {
    /// Kind tag of this structure.
    const KIND: StructureKind;

    /// Stable unique identifier.
    fn id(&self) -> &str;

    /// Merge a partial raw record into this instance.
    ///
    /// Fields missing from `data` are left untouched.
    fn patch(&mut self, data: &Value);
}

/// Input accepted by [`DataStore::resolve`](crate::DataStore::resolve) and
/// [`DataStore::resolve_id`](crate::DataStore::resolve_id).
#[derive(Debug)]
pub enum Resolvable<'a, S> {
    /// A bare identifier.
    Id(&'a str),
    /// An already materialized structure.
    Structure(&'a S),
}

impl<S> Clone for Resolvable<'_, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for Resolvable<'_, S> {}

impl<'a, S> From<&'a str> for Resolvable<'a, S> {
    fn from(id: &'a str) -> Self {
        Resolvable::Id(id)
    }
}

impl<'a, S> From<&'a String> for Resolvable<'a, S> {
    fn from(id: &'a String) -> Self {
        Resolvable::Id(id.as_str())
    }
}

impl<'a, S: Structure> From<&'a S> for Resolvable<'a, S> {
    fn from(structure: &'a S) -> Self {
        Resolvable::Structure(structure)
    }
}

/// Read the `id` field of a raw record.
pub fn raw_id(data: &Value) -> Option<&str> {
    data.get("id")
        .and_then(Value::as_str)
        .filter(|id| !id.is_empty())
}

/// Read the required `id` field of a raw record for a structure of `kind`.
pub fn require_id(data: &Value, kind: StructureKind) -> Result<String, StructureError> {
    if !data.is_object() {
        return Err(StructureError::NotAnObject { kind });
    }
    raw_id(data)
        .map(str::to_string)
        .ok_or(StructureError::MissingId { kind })
}
