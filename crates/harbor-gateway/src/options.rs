//! Client options.
//!
//! Options are fixed when the client is built and threaded into the stores
//! and actions from there; nothing reads them from global state.

use serde::{Deserialize, Serialize};

use crate::error::GatewayError;

/// Options for a [`Client`](crate::Client).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientOptions {
    pub cache: CacheOptions,
}

/// Caching behaviour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheOptions {
    /// Session-wide switch. When off, structures are built but not kept,
    /// except the session user.
    pub enabled: bool,
    /// Per-store entry limits. Zero disables a single store.
    pub limits: CacheLimits,
}

impl Default for CacheOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            limits: CacheLimits::default(),
        }
    }
}

/// Maximum number of entries per store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheLimits {
    pub guilds: usize,
    pub users: usize,
}

impl Default for CacheLimits {
    fn default() -> Self {
        Self {
            guilds: usize::MAX,
            users: usize::MAX,
        }
    }
}

impl ClientOptions {
    /// Parse options from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, GatewayError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Set the session-wide cache switch.
    pub fn cache_enabled(mut self, enabled: bool) -> Self {
        self.cache.enabled = enabled;
        self
    }

    /// Set the guild store limit.
    pub fn guild_limit(mut self, limit: usize) -> Self {
        self.cache.limits.guilds = limit;
        self
    }

    /// Set the user store limit.
    pub fn user_limit(mut self, limit: usize) -> Self {
        self.cache.limits.users = limit;
        self
    }
}
