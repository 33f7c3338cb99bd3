// ── Local persistence seams ──
//
// Durable key-value storage for the session token and a row cache for
// the shelter list. Core only defines the seams and in-memory backends;
// `shelterly-config` provides the keyring and file-backed ones.

mod cache;
mod memory;
mod session;

pub use cache::{MemoryCache, ShelterCache};
pub use memory::MemoryStore;
pub use session::{SHELTER_ID_KEY, SessionStore, TOKEN_KEY};

use crate::error::CoreError;

/// Durable string key-value storage.
///
/// Each call must be atomic per key; no cross-key transactions are
/// expected. Backends are synchronous (keyring and small files).
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), CoreError>;
    /// Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), CoreError>;
}
