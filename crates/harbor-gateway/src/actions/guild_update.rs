//! `GUILD_UPDATE`: a guild's settings changed.

use harbor_cache::{Origin, Structure, raw_id};
use serde_json::Value;

use super::Action;
use crate::client::Client;
use crate::error::GatewayError;
use crate::events::ClientEvent;
use crate::payload::Dispatch;
use crate::structures::Guild;

/// Handles `GUILD_UPDATE`. A cached guild is patched in place; an uncached
/// one is built for the event but not stored.
#[derive(Debug, Clone, Copy, Default)]
pub struct GuildUpdateAction;

impl Action for GuildUpdateAction {
    const EVENT: &'static str = "GUILD_UPDATE";
    type Data = Value;
    type Built = (Option<Guild>, Guild);

    fn check(
        &self,
        client: &mut Client,
        data: &Dispatch<Value>,
    ) -> Result<Option<(Option<Guild>, Guild)>, GatewayError> {
        let Some(guild) = raw_id(&data.d).and_then(|id| client.guilds_mut().get_mut(id)) else {
            return Ok(None);
        };
        let old = guild.clone();
        guild.patch(&data.d);
        Ok(Some((Some(old), guild.clone())))
    }

    fn build(
        &self,
        client: &mut Client,
        data: &Dispatch<Value>,
    ) -> Result<Option<(Option<Guild>, Guild)>, GatewayError> {
        let build_guild = client.extender().guild();
        let guild = build_guild(&data.d, &Origin::shard(data.shard_id))?;
        Ok(Some((None, guild)))
    }

    fn cache(&self, _client: &mut Client, _built: &(Option<Guild>, Guild)) {}

    fn event(&self, (old, guild): (Option<Guild>, Guild)) -> Option<ClientEvent> {
        Some(ClientEvent::GuildUpdate { old, guild })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::ClientOptions;
    use serde_json::json;

    fn update(d: Value) -> Dispatch<Value> {
        Dispatch { shard_id: 0, d }
    }

    #[test]
    fn test_update_cached_guild() {
        let mut client = Client::new(ClientOptions::default());
        client.guilds_mut().add(&json!({ "id": "1", "name": "old" })).unwrap();
        let mut rx = client.subscribe();

        GuildUpdateAction
            .run(&mut client, update(json!({ "id": "1", "name": "new" })))
            .unwrap();

        assert_eq!(client.guilds().get("1").and_then(|g| g.name.as_deref()), Some("new"));
        match rx.try_recv().unwrap() {
            ClientEvent::GuildUpdate { old, guild } => {
                assert_eq!(old.and_then(|g| g.name).as_deref(), Some("old"));
                assert_eq!(guild.name.as_deref(), Some("new"));
            }
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn test_update_uncached_guild_is_not_stored() {
        let mut client = Client::new(ClientOptions::default());
        let mut rx = client.subscribe();

        GuildUpdateAction
            .run(&mut client, update(json!({ "id": "2", "name": "elsewhere" })))
            .unwrap();

        assert!(client.guilds().is_empty());
        assert!(matches!(rx.try_recv().unwrap(), ClientEvent::GuildUpdate { old: None, .. }));
    }
}
