//! Framed gateway dispatch payloads.
//!
//! The transport hands the client already-framed JSON dispatches. Only the
//! `d` bodies of handled events are given typed shapes here.

use harbor_cache::ShardId;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One dispatch as received from a shard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayDispatch {
    /// Event name, e.g. `READY`.
    pub t: String,
    /// Sequence number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub s: Option<u64>,
    /// Event body.
    #[serde(default)]
    pub d: Value,
    /// Shard that received the dispatch.
    pub shard_id: ShardId,
}

/// A dispatch with its typed body.
#[derive(Debug, Clone)]
pub struct Dispatch<T> {
    pub shard_id: ShardId,
    pub d: T,
}

/// Body of `READY`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadyData {
    /// Guild snapshots, usually unavailable stubs.
    #[serde(default)]
    pub guilds: Vec<Value>,
    /// The session user.
    pub user: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

/// Body of `GUILD_DELETE`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnavailableGuild {
    pub id: String,
    /// Set when the guild went into an outage rather than being left.
    #[serde(default)]
    pub unavailable: bool,
}
