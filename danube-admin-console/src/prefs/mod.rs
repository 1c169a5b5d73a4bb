//! Small persisted UI preferences: theme mode and navigation expansion.
//!
//! [`Preferences`] is passed explicitly to whatever renders; there is no
//! global. Each update changes memory and writes through to storage.

mod nav;
mod storage;
mod theme;

use std::path::PathBuf;
use std::sync::Arc;

pub use nav::{Layout, NavState, NAV_DESKTOP_KEY, NAV_MOBILE_KEY, NAV_TRANSITION};
pub use storage::{default_prefs_path, FileStorage, MemoryStorage, PreferenceStorage, PrefsError};
pub use theme::{ResolvedMode, SystemColorScheme, Theme, ThemeMode, THEME_MODE_KEY};

pub struct Preferences {
    pub theme: Theme,
    pub nav: NavState,
}

impl Preferences {
    pub fn load(storage: Arc<dyn PreferenceStorage>, system: SystemColorScheme) -> Self {
        Self {
            theme: Theme::load(Arc::clone(&storage), system),
            nav: NavState::load(storage),
        }
    }

    /// File-backed preferences at `path` (or the default location), with the
    /// OS color scheme taken from the environment.
    pub fn open(path: Option<PathBuf>) -> Self {
        let path = path.unwrap_or_else(default_prefs_path);
        Self::load(Arc::new(FileStorage::open(path)), SystemColorScheme::from_env())
    }

    pub fn in_memory(system: SystemColorScheme) -> Self {
        Self::load(Arc::new(MemoryStorage::new()), system)
    }
}
