//! Guild structure.

use harbor_cache::{Origin, ShardId, Structure, StructureError, StructureKind, require_id};
use serde::Serialize;
use serde_json::Value;

use super::{opt_bool, opt_string, opt_u64, patch_nullable};

/// A guild as seen by the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Guild {
    pub id: String,
    pub name: Option<String>,
    pub icon: Option<String>,
    pub owner_id: Option<String>,
    pub member_count: Option<u64>,
    /// Whether the guild is in an outage.
    pub unavailable: bool,
    /// Shard that delivered this guild.
    pub shard_id: Option<ShardId>,
}

impl Guild {
    /// Construct a guild from a raw record.
    pub fn from_raw(data: &Value, origin: &Origin) -> Result<Self, StructureError> {
        const KIND: StructureKind = StructureKind::Guild;
        Ok(Self {
            id: require_id(data, KIND)?,
            name: opt_string(data, KIND, "name")?,
            icon: opt_string(data, KIND, "icon")?,
            owner_id: opt_string(data, KIND, "owner_id")?,
            member_count: opt_u64(data, KIND, "member_count")?,
            unavailable: opt_bool(data, KIND, "unavailable")?.unwrap_or(false),
            shard_id: origin.shard_id,
        })
    }
}

impl Structure for Guild {
    const KIND: StructureKind = StructureKind::Guild;

    fn id(&self) -> &str {
        &self.id
    }

    fn patch(&mut self, data: &Value) {
        if let Some(name) = data.get("name").and_then(Value::as_str) {
            self.name = Some(name.to_string());
        }
        if let Some(icon) = patch_nullable(data, "icon") {
            self.icon = icon;
        }
        if let Some(owner_id) = data.get("owner_id").and_then(Value::as_str) {
            self.owner_id = Some(owner_id.to_string());
        }
        if let Some(count) = data.get("member_count").and_then(Value::as_u64) {
            self.member_count = Some(count);
        }
        if let Some(unavailable) = data.get("unavailable").and_then(Value::as_bool) {
            self.unavailable = unavailable;
        }
    }
}
