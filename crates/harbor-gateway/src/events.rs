//! Events emitted by the client.

use serde::Serialize;

use crate::shard::Shard;
use crate::structures::Guild;

/// Broadcast channel capacity for client events.
pub const EVENT_CHANNEL_CAPACITY: usize = 1024;

/// A state change announced to subscribers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum ClientEvent {
    /// A shard finished processing its initial snapshot.
    ShardReady { shard: Shard },
    /// A guild became available or was joined.
    GuildCreate { guild: Guild },
    /// A guild changed. `old` is the cached state before the change.
    GuildUpdate { old: Option<Guild>, guild: Guild },
    /// The client left or was removed from a guild.
    GuildDelete { guild: Guild },
    /// A guild went into an outage.
    GuildUnavailable { guild: Guild },
}

impl ClientEvent {
    /// Event name as exposed to listeners.
    pub fn name(&self) -> &'static str {
        match self {
            ClientEvent::ShardReady { .. } => "shardReady",
            ClientEvent::GuildCreate { .. } => "guildCreate",
            ClientEvent::GuildUpdate { .. } => "guildUpdate",
            ClientEvent::GuildDelete { .. } => "guildDelete",
            ClientEvent::GuildUnavailable { .. } => "guildUnavailable",
        }
    }
}
