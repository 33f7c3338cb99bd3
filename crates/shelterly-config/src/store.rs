// ── Durable session and cache backends ──
//
// `KeyValueStore` implementations for the session token (OS keyring or a
// TOML file) and a JSON file cache for the shelter list.

use std::collections::BTreeMap;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use tracing::debug;

use shelterly_core::{CoreError, KeyValueStore, SessionStore, ShelterCache, ShelterRow};

use crate::{Profile, TokenStoreKind, cache_dir, data_dir};

const KEYRING_SERVICE: &str = "shelterly";

fn storage(message: impl std::fmt::Display) -> CoreError {
    CoreError::Storage {
        message: message.to_string(),
    }
}

/// Write `contents` next to `path` and rename it into place.
///
/// The temp file is created owner-only (0600 on unix) so the contents are
/// never readable by others, not even briefly.
fn write_atomic(path: &Path, contents: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let tmp = path.with_extension("tmp");
    // A leftover from an interrupted write may carry looser permissions.
    if let Err(e) = fs::remove_file(&tmp) {
        if e.kind() != ErrorKind::NotFound {
            return Err(e);
        }
    }

    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let mut file = options.open(&tmp)?;
    file.write_all(contents.as_bytes())?;
    file.sync_all()?;
    drop(file);
    fs::rename(&tmp, path)
}

fn read_optional(path: &Path) -> std::io::Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(raw) => Ok(Some(raw)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

// ── KeyringStore ────────────────────────────────────────────────────

/// Session entries in the OS keyring, one credential per key:
/// service `shelterly`, user `{profile}/{key}`.
#[derive(Debug, Clone)]
pub struct KeyringStore {
    profile: String,
}

impl KeyringStore {
    pub fn new(profile: impl Into<String>) -> Self {
        Self {
            profile: profile.into(),
        }
    }

    fn entry(&self, key: &str) -> Result<keyring::Entry, CoreError> {
        keyring::Entry::new(KEYRING_SERVICE, &format!("{}/{key}", self.profile))
            .map_err(|e| storage(format!("keyring unavailable: {e}")))
    }
}

impl KeyValueStore for KeyringStore {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        match self.entry(key)?.get_password() {
            Ok(value) => Ok(Some(value)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(storage(format!("keyring read failed: {e}"))),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CoreError> {
        self.entry(key)?
            .set_password(value)
            .map_err(|e| storage(format!("keyring write failed: {e}")))
    }

    fn remove(&self, key: &str) -> Result<(), CoreError> {
        match self.entry(key)?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(storage(format!("keyring delete failed: {e}"))),
        }
    }
}

// ── FileStore ───────────────────────────────────────────────────────

/// Session entries in a small TOML file, rewritten atomically on each change.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// The default location for `profile`'s session file.
    pub fn for_profile(profile: &str) -> Self {
        Self::new(data_dir().join(format!("session-{profile}.toml")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<BTreeMap<String, String>, CoreError> {
        let Some(raw) = read_optional(&self.path).map_err(storage)? else {
            return Ok(BTreeMap::new());
        };
        toml::from_str(&raw).map_err(|e| storage(format!("corrupt session file: {e}")))
    }

    fn write(&self, entries: &BTreeMap<String, String>) -> Result<(), CoreError> {
        let raw = toml::to_string(entries).map_err(storage)?;
        write_atomic(&self.path, &raw).map_err(storage)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(self.read()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CoreError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut entries = self.read()?;
        entries.insert(key.to_owned(), value.to_owned());
        self.write(&entries)
    }

    fn remove(&self, key: &str) -> Result<(), CoreError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut entries = self.read()?;
        if entries.remove(key).is_some() {
            self.write(&entries)?;
        }
        Ok(())
    }
}

// ── FileShelterCache ────────────────────────────────────────────────

/// Last-known shelter list as a JSON array of rows.
#[derive(Debug, Clone)]
pub struct FileShelterCache {
    path: PathBuf,
}

impl FileShelterCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn for_profile(profile: &str) -> Self {
        Self::new(cache_dir().join(format!("shelters-{profile}.json")))
    }
}

impl ShelterCache for FileShelterCache {
    fn load(&self) -> Result<Vec<ShelterRow>, CoreError> {
        let Some(raw) = read_optional(&self.path).map_err(storage)? else {
            return Ok(Vec::new());
        };
        serde_json::from_str(&raw).map_err(|e| storage(format!("corrupt shelter cache: {e}")))
    }

    fn replace(&self, rows: &[ShelterRow]) -> Result<(), CoreError> {
        let raw = serde_json::to_string(rows).map_err(storage)?;
        write_atomic(&self.path, &raw).map_err(storage)?;
        debug!(count = rows.len(), path = %self.path.display(), "shelter cache written");
        Ok(())
    }
}

// ── Wiring ──────────────────────────────────────────────────────────

/// Session store for `profile`, backed by its configured token store.
pub fn open_session_store(profile: &Profile, profile_name: &str) -> SessionStore {
    let backend: Arc<dyn KeyValueStore> = match profile.token_store {
        TokenStoreKind::Keyring => Arc::new(KeyringStore::new(profile_name)),
        TokenStoreKind::File => Arc::new(FileStore::for_profile(profile_name)),
        TokenStoreKind::Memory => return SessionStore::in_memory(),
    };
    SessionStore::new(backend)
}
