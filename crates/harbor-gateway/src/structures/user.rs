//! User structures.

use std::ops::Deref;

use harbor_cache::{Origin, Structure, StructureError, StructureKind, require_id};
use serde::Serialize;
use serde_json::Value;

use super::{opt_bool, opt_string, patch_nullable};

/// A user as seen by the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: String,
    pub username: Option<String>,
    pub discriminator: Option<String>,
    pub avatar: Option<String>,
    pub bot: bool,
}

impl User {
    /// Construct a user from a raw record.
    pub fn from_raw(data: &Value, _origin: &Origin) -> Result<Self, StructureError> {
        Self::parse(data, StructureKind::User)
    }

    fn parse(data: &Value, kind: StructureKind) -> Result<Self, StructureError> {
        Ok(Self {
            id: require_id(data, kind)?,
            username: opt_string(data, kind, "username")?,
            discriminator: opt_string(data, kind, "discriminator")?,
            avatar: opt_string(data, kind, "avatar")?,
            bot: opt_bool(data, kind, "bot")?.unwrap_or(false),
        })
    }

    /// `username#discriminator`, when both are known.
    pub fn tag(&self) -> Option<String> {
        match (&self.username, &self.discriminator) {
            (Some(name), Some(disc)) => Some(format!("{}#{}", name, disc)),
            _ => None,
        }
    }
}

impl Structure for User {
    const KIND: StructureKind = StructureKind::User;

    fn id(&self) -> &str {
        &self.id
    }

    fn patch(&mut self, data: &Value) {
        if let Some(username) = data.get("username").and_then(Value::as_str) {
            self.username = Some(username.to_string());
        }
        if let Some(discriminator) = data.get("discriminator").and_then(Value::as_str) {
            self.discriminator = Some(discriminator.to_string());
        }
        if let Some(avatar) = patch_nullable(data, "avatar") {
            self.avatar = avatar;
        }
        if let Some(bot) = data.get("bot").and_then(Value::as_bool) {
            self.bot = bot;
        }
    }
}

/// The user the session is logged in as.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientUser {
    #[serde(flatten)]
    pub user: User,
    pub verified: bool,
    pub mfa_enabled: bool,
}

impl ClientUser {
    /// Construct the session user from a raw record.
    pub fn from_raw(data: &Value, _origin: &Origin) -> Result<Self, StructureError> {
        const KIND: StructureKind = StructureKind::ClientUser;
        Ok(Self {
            user: User::parse(data, KIND)?,
            verified: opt_bool(data, KIND, "verified")?.unwrap_or(false),
            mfa_enabled: opt_bool(data, KIND, "mfa_enabled")?.unwrap_or(false),
        })
    }

    /// The plain user record kept in the user store.
    pub fn to_user(&self) -> User {
        self.user.clone()
    }
}

impl Deref for ClientUser {
    type Target = User;

    fn deref(&self) -> &User {
        &self.user
    }
}

impl Structure for ClientUser {
    const KIND: StructureKind = StructureKind::ClientUser;

    fn id(&self) -> &str {
        &self.user.id
    }

    fn patch(&mut self, data: &Value) {
        self.user.patch(data);
        if let Some(verified) = data.get("verified").and_then(Value::as_bool) {
            self.verified = verified;
        }
        if let Some(mfa_enabled) = data.get("mfa_enabled").and_then(Value::as_bool) {
            self.mfa_enabled = mfa_enabled;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_client_user() {
        let raw = json!({
            "id": "7",
            "username": "harbor",
            "discriminator": "0001",
            "bot": true,
            "verified": true,
        });
        let mut me = ClientUser::from_raw(&raw, &Origin::default()).unwrap();

        assert_eq!(me.tag().as_deref(), Some("harbor#0001"));
        assert!(me.bot);
        assert!(me.verified);
        assert!(!me.mfa_enabled);
        assert_eq!(me.to_user().id, "7");

        me.patch(&json!({ "mfa_enabled": true, "avatar": "a1" }));
        assert!(me.mfa_enabled);
        assert_eq!(me.avatar.as_deref(), Some("a1"));
    }

    #[test]
    fn test_client_user_missing_id() {
        let err = ClientUser::from_raw(&json!({ "username": "ghost" }), &Origin::default()).unwrap_err();
        assert!(matches!(err, StructureError::MissingId { kind: StructureKind::ClientUser }));
    }

    #[test]
    fn test_user_patch_keeps_missing_fields() {
        let mut user = User::from_raw(&json!({ "id": "1", "username": "a", "avatar": "x" }), &Origin::default()).unwrap();
        user.patch(&json!({ "id": "1" }));

        assert_eq!(user.username.as_deref(), Some("a"));
        assert_eq!(user.avatar.as_deref(), Some("x"));
    }
}
