// ── Session token store ──
//
// The one piece of state shared across controllers. Injected into the
// repository at construction; nothing reaches it ambiently.

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use super::KeyValueStore;
use crate::error::CoreError;
use crate::model::Session;

/// Key holding the bearer token. Its absence means "anonymous".
pub const TOKEN_KEY: &str = "TOKEN";
/// Key holding the shelter id that owns the token.
pub const SHELTER_ID_KEY: &str = "SHELTER_ID";

/// Read/write/clear access to the persisted session.
pub struct SessionStore {
    backend: Arc<dyn KeyValueStore>,
}

impl SessionStore {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    /// A store that forgets everything when the process exits.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(super::MemoryStore::new()))
    }

    /// The stored bearer token, if any.
    pub fn token(&self) -> Result<Option<SecretString>, CoreError> {
        Ok(self
            .backend
            .get(TOKEN_KEY)?
            .filter(|t| !t.is_empty())
            .map(SecretString::from))
    }

    /// The full stored session, if a token is present.
    pub fn session(&self) -> Result<Option<Session>, CoreError> {
        let Some(token) = self.backend.get(TOKEN_KEY)?.filter(|t| !t.is_empty()) else {
            return Ok(None);
        };
        let shelter_id = self.backend.get(SHELTER_ID_KEY)?.unwrap_or_default();
        Ok(Some(Session {
            token: SecretString::from(token),
            shelter_id,
        }))
    }

    /// Persist a session, overwriting any previous one.
    ///
    /// The token is written last: a reader that sees it also sees the
    /// matching shelter id.
    pub fn save(&self, session: &Session) -> Result<(), CoreError> {
        self.backend.set(SHELTER_ID_KEY, &session.shelter_id)?;
        self.backend.set(TOKEN_KEY, session.token.expose_secret())?;
        debug!(shelter_id = %session.shelter_id, "session saved");
        Ok(())
    }

    /// Forget the session. The token goes first so a partial clear
    /// still reads as anonymous.
    pub fn clear(&self) -> Result<(), CoreError> {
        self.backend.remove(TOKEN_KEY)?;
        self.backend.remove(SHELTER_ID_KEY)?;
        debug!("session cleared");
        Ok(())
    }
}
