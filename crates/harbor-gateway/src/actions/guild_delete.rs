//! `GUILD_DELETE`: the client left a guild, or the guild went into an outage.

use serde::Serialize;
use tracing::debug;

use super::Action;
use crate::client::Client;
use crate::error::GatewayError;
use crate::events::ClientEvent;
use crate::payload::{Dispatch, UnavailableGuild};
use crate::structures::Guild;

/// How a cached guild left the client's view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum GuildRemoval {
    /// The guild is in an outage; it stays cached, marked unavailable.
    Unavailable(Guild),
    /// The guild was removed from the store.
    Deleted(Guild),
}

/// Handles `GUILD_DELETE`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GuildDeleteAction;

impl Action for GuildDeleteAction {
    const EVENT: &'static str = "GUILD_DELETE";
    type Data = UnavailableGuild;
    type Built = GuildRemoval;

    fn check(
        &self,
        client: &mut Client,
        data: &Dispatch<UnavailableGuild>,
    ) -> Result<Option<GuildRemoval>, GatewayError> {
        if !data.d.unavailable {
            return Ok(None);
        }
        Ok(client.guilds_mut().get_mut(&data.d.id).map(|guild| {
            guild.unavailable = true;
            GuildRemoval::Unavailable(guild.clone())
        }))
    }

    fn build(
        &self,
        client: &mut Client,
        data: &Dispatch<UnavailableGuild>,
    ) -> Result<Option<GuildRemoval>, GatewayError> {
        if data.d.unavailable {
            debug!(guild_id = %data.d.id, "outage for uncached guild");
            return Ok(None);
        }
        Ok(client.guilds_mut().delete(&data.d.id).map(GuildRemoval::Deleted))
    }

    fn cache(&self, _client: &mut Client, _built: &GuildRemoval) {}

    fn event(&self, built: GuildRemoval) -> Option<ClientEvent> {
        Some(match built {
            GuildRemoval::Unavailable(guild) => ClientEvent::GuildUnavailable { guild },
            GuildRemoval::Deleted(guild) => ClientEvent::GuildDelete { guild },
        })
    }
}
