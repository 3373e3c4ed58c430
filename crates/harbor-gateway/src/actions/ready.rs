//! `READY`: initial snapshot for one shard.
//!
//! Every guild in the snapshot is treated as fresh, so guilds are built
//! directly and written with `set` rather than through the store's patch
//! path. The session user is always kept, whatever the cache switch says.
//! It is built before any guild is written, so a payload with an unusable
//! session user leaves the stores untouched.

use harbor_cache::Origin;
use tracing::{debug, info, warn};

use super::Action;
use crate::client::Client;
use crate::error::GatewayError;
use crate::events::ClientEvent;
use crate::payload::{Dispatch, ReadyData};
use crate::shard::ShardStatus;

/// Handles `READY`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReadyAction;

impl Action for ReadyAction {
    const EVENT: &'static str = "READY";
    type Data = ReadyData;
    type Built = ();

    fn check(&self, _client: &mut Client, _data: &Dispatch<ReadyData>) -> Result<Option<()>, GatewayError> {
        Ok(None)
    }

    fn build(&self, _client: &mut Client, _data: &Dispatch<ReadyData>) -> Result<Option<()>, GatewayError> {
        Ok(None)
    }

    fn cache(&self, _client: &mut Client, _built: &()) {}

    fn event(&self, _built: ()) -> Option<ClientEvent> {
        None
    }

    fn run(&self, client: &mut Client, data: Dispatch<ReadyData>) -> Result<(), GatewayError> {
        let shard_id = data.shard_id;
        let origin = Origin::shard(shard_id);
        let cache_enabled = client.options().cache.enabled;

        let build_user = client.extender().client_user();
        let user = build_user(&data.d.user, &origin)?;

        let build_guild = client.extender().guild();
        let mut built = 0usize;
        for raw in &data.d.guilds {
            let guild = match build_guild(raw, &origin) {
                Ok(guild) => guild,
                Err(e) => {
                    warn!(shard_id, error = %e, "skipping malformed guild in ready payload");
                    continue;
                }
            };
            built += 1;
            if cache_enabled {
                client.guilds_mut().set(guild.id.clone(), guild);
            }
        }

        debug!(shard_id, user_id = %user.id, "session user received");
        client.set_user(user);

        info!(
            shard_id,
            guilds = built,
            cached = client.guilds().len(),
            session_id = ?data.d.session_id,
            "ready payload processed"
        );

        match client.shards_mut().set_status(shard_id, ShardStatus::Ready) {
            Some(shard) => client.emit(ClientEvent::ShardReady { shard }),
            None => debug!(shard_id, "shard gone before ready, not announcing"),
        }
        Ok(())
    }
}
