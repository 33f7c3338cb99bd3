// ── Session domain type ──

use std::fmt;

use secrecy::{ExposeSecret, SecretString};

/// An authenticated session: bearer token plus the shelter it belongs to.
///
/// Produced by a successful login and persisted by the `SessionStore`.
/// The token is kept behind `SecretString` so it never leaks through
/// `Debug` output or logs.
#[derive(Clone)]
pub struct Session {
    pub token: SecretString,
    pub shelter_id: String,
}

impl Session {
    pub fn new(token: impl Into<String>, shelter_id: impl Into<String>) -> Self {
        Self {
            token: SecretString::from(token.into()),
            shelter_id: shelter_id.into(),
        }
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &"[REDACTED]")
            .field("shelter_id", &self.shelter_id)
            .finish()
    }
}

impl PartialEq for Session {
    fn eq(&self, other: &Self) -> bool {
        self.shelter_id == other.shelter_id
            && self.token.expose_secret() == other.token.expose_secret()
    }
}

impl Eq for Session {}
