use crate::error::SessionError;
use partydeck_core::{GameState, Language, LanguagePool};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

pub const SAVE_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SavedSession {
    pub version: u32,
    pub language: Language,
    pub state: GameState,
    #[serde(default)]
    pub pool: LanguagePool,
}

impl SavedSession {
    pub fn new(language: Language, state: GameState, pool: LanguagePool) -> Self {
        Self {
            version: SAVE_SCHEMA_VERSION,
            language,
            state,
            pool,
        }
    }
}

pub trait StateStore: Send {
    fn persist(&mut self, saved: &SavedSession) -> Result<(), SessionError>;
    fn load(&self) -> Result<Option<SavedSession>, SessionError>;
    fn clear(&mut self) -> Result<(), SessionError>;
}

/// Remembers the target drawn for a card slot so it is not redrawn on every look.
pub trait TargetStore: Send {
    fn persist_target(&mut self, index: usize, name: &str) -> Result<(), SessionError>;
    fn load_target(&self, index: usize) -> Option<String>;
    fn forget_target(&mut self, index: usize);
    fn clear(&mut self);
}

pub fn default_state_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os("PARTYDECK_SAVE") {
        return Some(PathBuf::from(path));
    }
    std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".partydeck_state.json"))
}

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl StateStore for JsonFileStore {
    fn persist(&mut self, saved: &SavedSession) -> Result<(), SessionError> {
        let body = serde_json::to_string_pretty(saved)?;
        fs::write(&self.path, body)?;
        Ok(())
    }

    fn load(&self) -> Result<Option<SavedSession>, SessionError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let body = fs::read_to_string(&self.path)?;
        let saved: SavedSession = serde_json::from_str(&body)?;
        if saved.version != SAVE_SCHEMA_VERSION {
            return Err(SessionError::UnsupportedVersion {
                found: saved.version,
                expected: SAVE_SCHEMA_VERSION,
            });
        }
        Ok(Some(saved))
    }

    fn clear(&mut self) -> Result<(), SessionError> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

/// In-process store. Clones share the same slot, so a test can keep a handle
/// after giving one to a `Session`.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slot: Arc<Mutex<Option<SavedSession>>>,
}

impl MemoryStore {
    pub fn snapshot(&self) -> Option<SavedSession> {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, Option<SavedSession>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl StateStore for MemoryStore {
    fn persist(&mut self, saved: &SavedSession) -> Result<(), SessionError> {
        *self.lock() = Some(saved.clone());
        Ok(())
    }

    fn load(&self) -> Result<Option<SavedSession>, SessionError> {
        Ok(self.lock().clone())
    }

    fn clear(&mut self) -> Result<(), SessionError> {
        *self.lock() = None;
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryTargetStore {
    targets: Arc<Mutex<HashMap<usize, String>>>,
}

impl MemoryTargetStore {
    fn lock(&self) -> MutexGuard<'_, HashMap<usize, String>> {
        self.targets.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl TargetStore for MemoryTargetStore {
    fn persist_target(&mut self, index: usize, name: &str) -> Result<(), SessionError> {
        self.lock().insert(index, name.to_string());
        Ok(())
    }

    fn load_target(&self, index: usize) -> Option<String> {
        self.lock().get(&index).cloned()
    }

    fn forget_target(&mut self, index: usize) {
        self.lock().remove(&index);
    }

    fn clear(&mut self) {
        self.lock().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use partydeck_core::ApplicationState;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::{SystemTime, UNIX_EPOCH};

    static NEXT_FILE: AtomicUsize = AtomicUsize::new(0);

    fn sample() -> SavedSession {
        let mut state = GameState::new();
        state.add_player("Ada");
        state.add_player("Bo");
        state.change_state(ApplicationState::Lobby);
        state.card_amount = Some(12);
        SavedSession::new(Language::Fi, state, LanguagePool::empty_for_all())
    }

    #[test]
    fn file_store_roundtrip() {
        let file = unique_temp_file();
        let mut store = JsonFileStore::new(&file);
        assert!(store.load().expect("load").is_none());
        store.persist(&sample()).expect("save");
        let loaded = store.load().expect("load").expect("present");
        assert_eq!(loaded, sample());
        store.clear().expect("clear");
        assert!(!file.exists());
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let file = unique_temp_file();
        std::fs::write(&file, "{ not json").expect("write");
        let store = JsonFileStore::new(&file);
        assert!(matches!(store.load(), Err(SessionError::Serialize(_))));
        let _ = std::fs::remove_file(file);
    }

    #[test]
    fn version_mismatch_is_rejected() {
        let file = unique_temp_file();
        let mut saved = sample();
        saved.version = 99;
        std::fs::write(&file, serde_json::to_string(&saved).expect("json")).expect("write");
        let store = JsonFileStore::new(&file);
        assert!(matches!(
            store.load(),
            Err(SessionError::UnsupportedVersion {
                found: 99,
                expected: SAVE_SCHEMA_VERSION
            })
        ));
        let _ = std::fs::remove_file(file);
    }

    #[test]
    fn memory_store_clones_share_state() {
        let handle = MemoryStore::default();
        let mut store = handle.clone();
        store.persist(&sample()).expect("save");
        assert_eq!(handle.snapshot(), Some(sample()));
        store.clear().expect("clear");
        assert_eq!(handle.snapshot(), None);
    }

    #[test]
    fn target_store_keys_by_slot() {
        let mut targets = MemoryTargetStore::default();
        targets.persist_target(3, "Bo").expect("save");
        assert_eq!(targets.load_target(3).as_deref(), Some("Bo"));
        assert_eq!(targets.load_target(4), None);
        targets.forget_target(3);
        assert_eq!(targets.load_target(3), None);
    }

    fn unique_temp_file() -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time")
            .as_nanos();
        std::env::temp_dir().join(format!(
            "partydeck_persistence_test_{}_{}_{}.json",
            std::process::id(),
            nanos,
            NEXT_FILE.fetch_add(1, Ordering::Relaxed)
        ))
    }
}
