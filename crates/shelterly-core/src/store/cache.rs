// ── Shelter list cache ──

use std::sync::Mutex;

use crate::error::CoreError;
use crate::model::ShelterRow;

/// Last-known shelter list, stored as flat rows.
pub trait ShelterCache: Send + Sync {
    fn load(&self) -> Result<Vec<ShelterRow>, CoreError>;
    /// Replace the whole cached list.
    fn replace(&self, rows: &[ShelterRow]) -> Result<(), CoreError>;
}

/// Process-lifetime cache, for tests and ephemeral runs.
#[derive(Debug, Default)]
pub struct MemoryCache {
    rows: Mutex<Vec<ShelterRow>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ShelterCache for MemoryCache {
    fn load(&self) -> Result<Vec<ShelterRow>, CoreError> {
        self.rows
            .lock()
            .map(|rows| rows.clone())
            .map_err(|_| CoreError::Storage {
                message: "shelter cache lock poisoned".into(),
            })
    }

    fn replace(&self, rows: &[ShelterRow]) -> Result<(), CoreError> {
        let mut guard = self.rows.lock().map_err(|_| CoreError::Storage {
            message: "shelter cache lock poisoned".into(),
        })?;
        *guard = rows.to_vec();
        Ok(())
    }
}
