//! Dispatch actions.
//!
//! Every handled gateway event has an [`Action`]: a small unit that checks
//! the stores, builds a structure, caches it and announces it. The
//! `define_action_dispatch!` invocation at the bottom of this file is the
//! single place that maps event names to actions.
//!
//! # Adding an action
//!
//! 1. Add a module with a unit struct implementing [`Action`], setting
//!    `EVENT` to the gateway event name and `Data` to the typed body.
//! 2. Add the struct to the `define_action_dispatch!` invocation.
//!
//! Actions with no independent logic in some step return `Ok(None)` from
//! `check`/`build` and leave `cache` empty; actions that need a different
//! flow (like `READY`) override [`Action::run`].

mod guild_create;
mod guild_delete;
mod guild_update;
mod ready;

pub use guild_create::GuildCreateAction;
pub use guild_delete::{GuildDeleteAction, GuildRemoval};
pub use guild_update::GuildUpdateAction;
pub use ready::ReadyAction;

use serde::de::DeserializeOwned;
use tracing::{debug, trace};

use crate::client::Client;
use crate::error::GatewayError;
use crate::events::ClientEvent;
use crate::payload::{Dispatch, GatewayDispatch};

/// Handler for one gateway event.
pub trait Action {
    /// Gateway event name, e.g. `READY`.
    const EVENT: &'static str;

    /// Typed dispatch body.
    type Data: DeserializeOwned;

    /// What the action produces for caching and announcement.
    type Built;

    /// Resolve the dispatch against existing state.
    fn check(
        &self,
        client: &mut Client,
        data: &Dispatch<Self::Data>,
    ) -> Result<Option<Self::Built>, GatewayError>;

    /// Build a result when `check` produced none.
    fn build(
        &self,
        client: &mut Client,
        data: &Dispatch<Self::Data>,
    ) -> Result<Option<Self::Built>, GatewayError>;

    /// Write the built result into the stores.
    fn cache(&self, client: &mut Client, built: &Self::Built);

    /// Event announcing the built result.
    fn event(&self, built: Self::Built) -> Option<ClientEvent>;

    /// Process one dispatch: check, else build, then cache and announce.
    fn run(&self, client: &mut Client, data: Dispatch<Self::Data>) -> Result<(), GatewayError> {
        let built = match self.check(client, &data)? {
            Some(built) => Some(built),
            None => self.build(client, &data)?,
        };

        if let Some(built) = built {
            self.cache(client, &built);
            if let Some(event) = self.event(built) {
                client.emit(event);
            }
        }
        Ok(())
    }

    /// Decode a framed dispatch body and [`run`](Self::run) it.
    fn handle(&self, client: &mut Client, payload: GatewayDispatch) -> Result<(), GatewayError> {
        let d = serde_json::from_value(payload.d).map_err(|source| GatewayError::InvalidPayload {
            event: Self::EVENT.to_string(),
            source,
        })?;
        self.run(
            client,
            Dispatch {
                shard_id: payload.shard_id,
                d,
            },
        )
    }
}

/// Generate the event-name routing for a list of actions.
///
/// Produces `dispatch()`, which runs the matching action, and
/// `is_handled_event()`.
macro_rules! define_action_dispatch {
    ( $( $action:ident ),* $(,)? ) => {
        /// Route a framed dispatch to the action registered for its event.
        ///
        /// Returns `Ok(false)` when no action handles the event.
        pub fn dispatch(client: &mut Client, payload: GatewayDispatch) -> Result<bool, GatewayError> {
            $(
                if payload.t == <$action as Action>::EVENT {
                    debug!(event = %payload.t, shard_id = payload.shard_id, "dispatching");
                    $action.handle(client, payload)?;
                    return Ok(true);
                }
            )*
            trace!(event = %payload.t, "no action for event");
            Ok(false)
        }

        /// Whether an action is registered for `event`.
        pub fn is_handled_event(event: &str) -> bool {
            $( event == <$action as Action>::EVENT )||*
        }
    };
}

define_action_dispatch! {
    ReadyAction,
    GuildCreateAction,
    GuildUpdateAction,
    GuildDeleteAction,
}
