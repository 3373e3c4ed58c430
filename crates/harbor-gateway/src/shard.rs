//! Shard handles known to the client.
//!
//! Connection management lives in the transport layer; the client only needs
//! to find a shard by id when announcing readiness.

use std::collections::BTreeMap;

use harbor_cache::ShardId;
use serde::Serialize;
use tracing::debug;

/// Lifecycle state of a shard as seen by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ShardStatus {
    /// Registered, no `READY` received yet.
    #[default]
    Connecting,
    /// `READY` was handled for this shard.
    Ready,
    /// Connection lost; waiting for the transport to resume it.
    Disconnected,
}

/// Handle to one gateway shard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Shard {
    /// Shard id.
    pub id: ShardId,
    /// Total number of shards in the session.
    pub total: u32,
    /// Current lifecycle state.
    pub status: ShardStatus,
}

/// Registry of live shards by id.
#[derive(Debug, Default)]
pub struct ShardManager {
    shards: BTreeMap<ShardId, Shard>,
    total: u32,
}

impl ShardManager {
    /// Create an empty registry for a session of `total` shards.
    pub fn new(total: u32) -> Self {
        Self {
            shards: BTreeMap::new(),
            total,
        }
    }

    /// Register shards `0..total`.
    pub fn spawn_all(total: u32) -> Self {
        let mut manager = Self::new(total);
        for id in 0..total {
            manager.spawn(id);
        }
        manager
    }

    /// Register a shard handle, replacing any previous one with the same id.
    pub fn spawn(&mut self, id: ShardId) -> &Shard {
        debug!(shard_id = id, total = self.total, "registering shard");
        self.shards.insert(id, Shard {
            id,
            total: self.total,
            status: ShardStatus::Connecting,
        });
        &self.shards[&id]
    }

    /// Forget a shard, e.g. after it disconnects.
    pub fn remove(&mut self, id: ShardId) -> Option<Shard> {
        let removed = self.shards.remove(&id);
        if removed.is_some() {
            debug!(shard_id = id, "shard removed");
        }
        removed
    }

    /// Move a registered shard to `status`, returning a snapshot of it.
    ///
    /// Unknown ids are left alone and yield `None`.
    pub fn set_status(&mut self, id: ShardId, status: ShardStatus) -> Option<Shard> {
        let shard = self.shards.get_mut(&id)?;
        if shard.status != status {
            debug!(shard_id = id, from = ?shard.status, to = ?status, "shard status changed");
            shard.status = status;
        }
        Some(shard.clone())
    }

    /// Look up a shard.
    pub fn get(&self, id: ShardId) -> Option<&Shard> {
        self.shards.get(&id)
    }

    /// Number of registered shards.
    pub fn len(&self) -> usize {
        self.shards.len()
    }

    /// Whether no shard is registered.
    pub fn is_empty(&self) -> bool {
        self.shards.is_empty()
    }

    /// Registered shard ids in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = ShardId> + '_ {
        self.shards.keys().copied()
    }
}
