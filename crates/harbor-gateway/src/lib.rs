//! Gateway client core for Harbor.
//!
//! This crate turns framed gateway dispatches into cached structures:
//!
//! - **Client**: session object owning the stores, shards and event channel
//! - **Actions**: one handler per gateway event, routed by event name
//! - **Extender**: typed structure factories chosen at client construction
//! - **Options**: cache switch and per-store limits

pub mod actions;
mod client;
mod error;
pub mod events;
mod extender;
mod options;
pub mod payload;
pub mod shard;
pub mod structures;

pub use actions::{Action, GuildCreateAction, GuildDeleteAction, GuildUpdateAction, ReadyAction};
pub use client::Client;
pub use error::GatewayError;
pub use events::ClientEvent;
pub use extender::Extender;
pub use harbor_cache::{DataStore, Origin, ShardId, Structure, StructureError, StructureKind};
pub use options::{CacheLimits, CacheOptions, ClientOptions};
pub use payload::{Dispatch, GatewayDispatch, ReadyData, UnavailableGuild};
pub use shard::{Shard, ShardManager, ShardStatus};
pub use structures::{ClientUser, Guild, User};
