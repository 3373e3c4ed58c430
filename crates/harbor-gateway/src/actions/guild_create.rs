//! `GUILD_CREATE`: a guild was joined or became available.

use harbor_cache::Origin;
use serde_json::Value;
use tracing::trace;

use super::Action;
use crate::client::Client;
use crate::error::GatewayError;
use crate::events::ClientEvent;
use crate::payload::Dispatch;
use crate::structures::Guild;

/// Handles `GUILD_CREATE` through the store's add path, so a guild that is
/// already cached is patched in place.
#[derive(Debug, Clone, Copy, Default)]
pub struct GuildCreateAction;

impl Action for GuildCreateAction {
    const EVENT: &'static str = "GUILD_CREATE";
    type Data = Value;
    type Built = Guild;

    fn check(&self, _client: &mut Client, _data: &Dispatch<Value>) -> Result<Option<Guild>, GatewayError> {
        Ok(None)
    }

    fn build(&self, client: &mut Client, data: &Dispatch<Value>) -> Result<Option<Guild>, GatewayError> {
        let added = client
            .guilds_mut()
            .add_from(&data.d, &Origin::shard(data.shard_id))?;
        trace!(guild_id = %added.id, patched = added.is_patch(), cached = added.is_cached(), "guild create");
        Ok(Some(added.into_owned()))
    }

    fn cache(&self, _client: &mut Client, _built: &Guild) {}

    fn event(&self, guild: Guild) -> Option<ClientEvent> {
        Some(ClientEvent::GuildCreate { guild })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::ClientOptions;
    use serde_json::json;

    fn create(d: Value) -> Dispatch<Value> {
        Dispatch { shard_id: 1, d }
    }

    #[test]
    fn test_guild_create_caches_and_emits() {
        let mut client = Client::new(ClientOptions::default());
        let mut rx = client.subscribe();

        GuildCreateAction
            .run(&mut client, create(json!({ "id": "1", "name": "new" })))
            .unwrap();

        assert!(client.guilds().has("1"));
        match rx.try_recv().unwrap() {
            ClientEvent::GuildCreate { guild } => {
                assert_eq!(guild.name.as_deref(), Some("new"));
                assert_eq!(guild.shard_id, Some(1));
            }
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn test_guild_create_patches_existing() {
        let mut client = Client::new(ClientOptions::default());
        GuildCreateAction
            .run(&mut client, create(json!({ "id": "1", "name": "a", "owner_id": "9" })))
            .unwrap();
        GuildCreateAction
            .run(&mut client, create(json!({ "id": "1", "name": "b" })))
            .unwrap();

        let guild = client.guilds().get("1").unwrap();
        assert_eq!(guild.name.as_deref(), Some("b"));
        assert_eq!(guild.owner_id.as_deref(), Some("9"));
        assert_eq!(client.guilds().len(), 1);
    }

    #[test]
    fn test_guild_create_uncached_still_emits() {
        let mut client = Client::new(ClientOptions::default().cache_enabled(false));
        let mut rx = client.subscribe();

        GuildCreateAction.run(&mut client, create(json!({ "id": "1" }))).unwrap();

        assert!(client.guilds().is_empty());
        assert!(matches!(rx.try_recv().unwrap(), ClientEvent::GuildCreate { .. }));
    }
}
