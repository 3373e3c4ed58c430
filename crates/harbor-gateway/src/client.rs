//! The client session: options, stores, shards and event fan-out.

use harbor_cache::DataStore;
use tokio::sync::broadcast;
use tracing::{debug, trace};

use crate::actions;
use crate::error::GatewayError;
use crate::events::{ClientEvent, EVENT_CHANNEL_CAPACITY};
use crate::extender::Extender;
use crate::options::ClientOptions;
use crate::payload::GatewayDispatch;
use crate::shard::ShardManager;
use crate::structures::{ClientUser, Guild, User};

/// A gateway client session.
///
/// The client owns one store per structure kind for its whole lifetime.
/// All writes go through `&mut self`, so a dispatch is applied to the stores
/// as a single step.
pub struct Client {
    options: ClientOptions,
    extender: Extender,
    ws: ShardManager,
    guilds: DataStore<Guild>,
    users: DataStore<User>,
    user: Option<ClientUser>,
    events: broadcast::Sender<ClientEvent>,
}

impl Client {
    /// Create a client with the stock structure factories.
    pub fn new(options: ClientOptions) -> Self {
        Self::with_extender(options, Extender::default())
    }

    /// Create a client with custom structure factories.
    pub fn with_extender(options: ClientOptions, extender: Extender) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        let cache = &options.cache;
        debug!(
            enabled = cache.enabled,
            guild_limit = cache.limits.guilds,
            user_limit = cache.limits.users,
            "creating client stores"
        );
        Self {
            guilds: DataStore::new(extender.guild(), cache.limits.guilds, cache.enabled),
            users: DataStore::new(extender.user(), cache.limits.users, cache.enabled),
            options,
            extender,
            ws: ShardManager::default(),
            user: None,
            events,
        }
    }

    /// Attach a shard registry.
    pub fn with_shards(mut self, shards: ShardManager) -> Self {
        self.ws = shards;
        self
    }

    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    pub fn extender(&self) -> &Extender {
        &self.extender
    }

    pub fn shards(&self) -> &ShardManager {
        &self.ws
    }

    pub fn shards_mut(&mut self) -> &mut ShardManager {
        &mut self.ws
    }

    pub fn guilds(&self) -> &DataStore<Guild> {
        &self.guilds
    }

    pub fn guilds_mut(&mut self) -> &mut DataStore<Guild> {
        &mut self.guilds
    }

    pub fn users(&self) -> &DataStore<User> {
        &self.users
    }

    pub fn users_mut(&mut self) -> &mut DataStore<User> {
        &mut self.users
    }

    /// The user this session is logged in as, once `READY` was handled.
    ///
    /// This is a separate copy from the entry `READY` writes to
    /// [`users`](Self::users). Later patches through the user store do not
    /// reach it, so the two can diverge until the next `READY`.
    pub fn user(&self) -> Option<&ClientUser> {
        self.user.as_ref()
    }

    /// Record the session user and keep it in the user store.
    ///
    /// The store write ignores the session cache switch.
    pub(crate) fn set_user(&mut self, user: ClientUser) {
        self.users.set(user.id.clone(), user.to_user());
        self.user = Some(user);
    }

    /// Subscribe to client events.
    pub fn subscribe(&self) -> broadcast::Receiver<ClientEvent> {
        self.events.subscribe()
    }

    /// Announce an event to subscribers.
    pub fn emit(&self, event: ClientEvent) {
        let name = event.name();
        if self.events.send(event).is_err() {
            trace!(event = name, "no subscribers for client event");
        }
    }

    /// Route a framed dispatch to its action.
    ///
    /// Returns `false` for events no action handles.
    pub fn dispatch(&mut self, payload: GatewayDispatch) -> Result<bool, GatewayError> {
        actions::dispatch(self, payload)
    }
}
