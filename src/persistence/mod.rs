//! Durable score storage
//!
//! A small port interface with swappable backends: browser LocalStorage on
//! wasm, a JSON file in the platform data directory on native, and an
//! in-memory store for tests. Storage is best-effort; callers fall back to a
//! session-only leaderboard when it fails.

use thiserror::Error;

use crate::leaderboard::LeaderboardEntry;

/// Storage failure
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage unavailable")]
    Unavailable,
    #[error("malformed payload: {0}")]
    Corrupt(#[from] serde_json::Error),
    #[cfg(not(target_arch = "wasm32"))]
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Persistence port for leaderboard entries
pub trait ScoreStore {
    fn load(&self) -> Result<Vec<LeaderboardEntry>, StoreError>;
    fn save(&self, entries: &[LeaderboardEntry]) -> Result<(), StoreError>;
}

/// In-memory store, primarily for tests and as the degraded fallback
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: std::cell::RefCell<Vec<LeaderboardEntry>>,
}

impl ScoreStore for MemoryStore {
    fn load(&self) -> Result<Vec<LeaderboardEntry>, StoreError> {
        Ok(self.entries.borrow().clone())
    }

    fn save(&self, entries: &[LeaderboardEntry]) -> Result<(), StoreError> {
        *self.entries.borrow_mut() = entries.to_vec();
        Ok(())
    }
}

/// LocalStorage-backed store (wasm)
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default)]
pub struct LocalStorageStore;

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    /// Fixed LocalStorage key
    const STORAGE_KEY: &'static str = "cube_rush_leaderboard";

    fn storage() -> Result<web_sys::Storage, StoreError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or(StoreError::Unavailable)
    }
}

#[cfg(target_arch = "wasm32")]
impl ScoreStore for LocalStorageStore {
    fn load(&self) -> Result<Vec<LeaderboardEntry>, StoreError> {
        let storage = Self::storage()?;
        let payload = storage
            .get_item(Self::STORAGE_KEY)
            .map_err(|_| StoreError::Unavailable)?;
        match payload {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(Vec::new()),
        }
    }

    fn save(&self, entries: &[LeaderboardEntry]) -> Result<(), StoreError> {
        let storage = Self::storage()?;
        let json = serde_json::to_string(entries)?;
        storage
            .set_item(Self::STORAGE_KEY, &json)
            .map_err(|_| StoreError::Unavailable)
    }
}

/// JSON-file-backed store (native)
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct FileStore {
    path: std::path::PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileStore {
    /// Store under the platform data directory, or the working directory if
    /// no home is available
    pub fn new() -> Self {
        let dir = directories::ProjectDirs::from("com", "paulrobello", "cube-rush")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| std::path::PathBuf::from("."));
        Self {
            path: dir.join("leaderboard.json"),
        }
    }

    /// Store at an explicit path
    pub fn at(path: impl Into<std::path::PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Default for FileStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl ScoreStore for FileStore {
    fn load(&self) -> Result<Vec<LeaderboardEntry>, StoreError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let json = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&json)?)
    }

    fn save(&self, entries: &[LeaderboardEntry]) -> Result<(), StoreError> {
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let json = serde_json::to_string(entries)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}
