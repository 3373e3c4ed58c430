//! Registry of structure constructors.
//!
//! Each [`StructureKind`] maps to exactly one typed factory, chosen once when
//! the client is built. Callers that need a guild or the session user go
//! through the registry instead of naming a concrete constructor, so an
//! embedding application can substitute its own.

use harbor_cache::{Factory, StructureKind};

use crate::structures::{ClientUser, Guild, User};

/// Typed factories for every structure kind.
#[derive(Debug, Clone, Copy)]
pub struct Extender {
    guild: Factory<Guild>,
    user: Factory<User>,
    client_user: Factory<ClientUser>,
}

impl Default for Extender {
    fn default() -> Self {
        Self {
            guild: Guild::from_raw,
            user: User::from_raw,
            client_user: ClientUser::from_raw,
        }
    }
}

impl Extender {
    /// Replace the guild factory.
    pub fn with_guild(mut self, factory: Factory<Guild>) -> Self {
        self.guild = factory;
        self
    }

    /// Replace the user factory.
    pub fn with_user(mut self, factory: Factory<User>) -> Self {
        self.user = factory;
        self
    }

    /// Replace the session user factory.
    pub fn with_client_user(mut self, factory: Factory<ClientUser>) -> Self {
        self.client_user = factory;
        self
    }

    /// Factory for [`StructureKind::Guild`].
    pub fn guild(&self) -> Factory<Guild> {
        self.guild
    }

    /// Factory for [`StructureKind::User`].
    pub fn user(&self) -> Factory<User> {
        self.user
    }

    /// Factory for [`StructureKind::ClientUser`].
    pub fn client_user(&self) -> Factory<ClientUser> {
        self.client_user
    }

    /// Every kind with a registered factory.
    pub fn kinds(&self) -> [StructureKind; 3] {
        [StructureKind::Guild, StructureKind::User, StructureKind::ClientUser]
    }
}
