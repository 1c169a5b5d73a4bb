use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use thiserror::Error;
use tracing::{debug, warn};

const APP_DIR: &str = "danube-admin-console";
const PREFS_FILE: &str = "preferences.json";

#[derive(Debug, Error)]
pub enum PrefsError {
    #[error("preferences I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("preferences encoding error: {0}")]
    Encode(#[from] serde_json::Error),
}

/// String key/value durability behind the preference store.
pub trait PreferenceStorage: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    /// Writes through to the backing medium before returning.
    fn set(&self, key: &str, value: &str) -> Result<(), PrefsError>;
}

/// `$XDG_CONFIG_HOME/danube-admin-console/preferences.json`, falling back to
/// the platform config dir.
pub fn default_prefs_path() -> PathBuf {
    let base = match std::env::var_os("XDG_CONFIG_HOME") {
        Some(xdg) => PathBuf::from(xdg),
        None => dirs_next::config_dir().unwrap_or_else(|| PathBuf::from(".")),
    };
    base.join(APP_DIR).join(PREFS_FILE)
}

/// Flat JSON object of string values, rewritten on every `set`.
pub struct FileStorage {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileStorage {
    /// Loads `path` if it exists. A missing or unreadable file starts empty;
    /// the next write replaces it.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(s) => serde_json::from_str(&s).unwrap_or_else(|e| {
                warn!(target: "console", "ignoring malformed preferences {}: {}", path.display(), e);
                BTreeMap::new()
            }),
            Err(_) => BTreeMap::new(),
        };
        debug!(target: "console", "loaded {} preferences from {}", entries.len(), path.display());
        Self {
            path,
            entries: Mutex::new(entries),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn entries(&self) -> MutexGuard<'_, BTreeMap<String, String>> {
        self.entries.lock().unwrap_or_else(|p| p.into_inner())
    }
}

impl PreferenceStorage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PrefsError> {
        let mut entries = self.entries();
        entries.insert(key.to_string(), value.to_string());
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(&*entries)?;
        fs::write(&self.path, data)?;
        Ok(())
    }
}

/// Non-durable storage.
#[derive(Default)]
pub struct MemoryStorage {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PrefsError> {
        self.entries
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
