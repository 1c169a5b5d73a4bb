use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;
use tokio_stream::{Stream, StreamExt};
use tracing::{debug, warn};

use super::storage::{PreferenceStorage, PrefsError};

pub const THEME_MODE_KEY: &str = "theme.mode";

/// The stored choice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ThemeMode {
    Light,
    Dark,
    #[default]
    System,
}

impl ThemeMode {
    /// light -> dark -> system -> light
    pub fn toggle(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::System,
            ThemeMode::System => ThemeMode::Light,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
            ThemeMode::System => "system",
        }
    }

    pub fn resolve(self, system: ResolvedMode) -> ResolvedMode {
        match self {
            ThemeMode::Light => ResolvedMode::Light,
            ThemeMode::Dark => ResolvedMode::Dark,
            ThemeMode::System => system,
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "light" => Ok(ThemeMode::Light),
            "dark" => Ok(ThemeMode::Dark),
            "system" => Ok(ThemeMode::System),
            other => Err(format!("unknown theme mode '{}' (light, dark, system)", other)),
        }
    }
}

/// What actually gets rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResolvedMode {
    #[default]
    Light,
    Dark,
}

impl fmt::Display for ResolvedMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolvedMode::Light => f.write_str("light"),
            ResolvedMode::Dark => f.write_str("dark"),
        }
    }
}

/// Live OS color-scheme preference.
///
/// Whatever observes the platform pushes changes through [`SystemColorScheme::set`];
/// every subscriber sees them without polling.
#[derive(Clone)]
pub struct SystemColorScheme {
    tx: Arc<watch::Sender<ResolvedMode>>,
}

impl SystemColorScheme {
    pub fn new(initial: ResolvedMode) -> Self {
        let (tx, _) = watch::channel(initial);
        Self { tx: Arc::new(tx) }
    }

    /// Seeds from the terminal's `COLORFGBG` (`fg;bg`): a dark background
    /// color index (0-6 or 8) means a dark scheme.
    pub fn from_env() -> Self {
        let initial = std::env::var("COLORFGBG")
            .ok()
            .and_then(|v| scheme_from_colorfgbg(&v))
            .unwrap_or_default();
        Self::new(initial)
    }

    pub fn current(&self) -> ResolvedMode {
        *self.tx.borrow()
    }

    pub fn set(&self, mode: ResolvedMode) {
        self.tx.send_if_modified(|current| {
            let changed = *current != mode;
            *current = mode;
            changed
        });
    }

    pub fn subscribe(&self) -> watch::Receiver<ResolvedMode> {
        self.tx.subscribe()
    }
}

pub(crate) fn scheme_from_colorfgbg(value: &str) -> Option<ResolvedMode> {
    let bg: u8 = value.rsplit(';').next()?.trim().parse().ok()?;
    Some(if bg <= 6 || bg == 8 {
        ResolvedMode::Dark
    } else {
        ResolvedMode::Light
    })
}

/// Theme preference: the persisted mode plus its resolution against the OS.
pub struct Theme {
    mode: watch::Sender<ThemeMode>,
    system: SystemColorScheme,
    storage: Arc<dyn PreferenceStorage>,
}

impl Theme {
    /// Initial mode comes from storage, `system` when absent or unreadable.
    pub fn load(storage: Arc<dyn PreferenceStorage>, system: SystemColorScheme) -> Self {
        let mode = match storage.get(THEME_MODE_KEY) {
            Some(raw) => raw.parse().unwrap_or_else(|e| {
                warn!(target: "console", "{}, using system", e);
                ThemeMode::System
            }),
            None => ThemeMode::System,
        };
        let (mode, _) = watch::channel(mode);
        Self {
            mode,
            system,
            storage,
        }
    }

    pub fn mode(&self) -> ThemeMode {
        *self.mode.borrow()
    }

    /// Re-evaluated on every read; `system` follows the OS preference.
    pub fn resolved(&self) -> ResolvedMode {
        self.mode().resolve(self.system.current())
    }

    pub fn system(&self) -> &SystemColorScheme {
        &self.system
    }

    /// Updates memory first, then persists.
    pub fn set_mode(&self, mode: ThemeMode) -> Result<(), PrefsError> {
        self.mode.send_replace(mode);
        debug!(target: "console", "theme mode set to {}", mode);
        self.storage.set(THEME_MODE_KEY, mode.as_str())
    }

    pub fn toggle(&self) -> Result<ThemeMode, PrefsError> {
        let next = self.mode().toggle();
        self.set_mode(next)?;
        Ok(next)
    }

    /// Resolved mode now, then on every change of either the stored mode or
    /// the OS preference. Consecutive duplicates are skipped, so an OS change
    /// while the mode is `light` or `dark` yields nothing.
    pub fn resolved_changes(&self) -> impl Stream<Item = ResolvedMode> + Send + 'static {
        let mode = self.mode.subscribe();
        let system = self.system.subscribe();
        let ticks = WatchStream::new(mode.clone())
            .map(|_| ())
            .merge(WatchStream::new(system.clone()).map(|_| ()));

        let mut last = None;
        ticks.filter_map(move |_| {
            let resolved = mode.borrow().resolve(*system.borrow());
            if last == Some(resolved) {
                return None;
            }
            last = Some(resolved);
            Some(resolved)
        })
    }
}
