//! Theme preference behind a fallible key-value capability.
//!
//! The shell provides a browser-style store keyed by `"theme"`. Both reads
//! and writes may fail; the board degrades to the in-memory default rather
//! than erroring.

use std::collections::HashMap;
use std::path::PathBuf;

use directories::ProjectDirs;

pub const THEME_KEY: &str = "theme";

/// Display theme for the TUI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn key(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(&self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Anything other than the two known values falls back to light.
    fn from_stored(value: Option<String>) -> Theme {
        match value.as_deref() {
            Some("dark") => Theme::Dark,
            _ => Theme::Light,
        }
    }
}

/// Key-value preference store capability. Implementations may fail; callers
/// treat failures as "use the default".
pub trait PrefStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}

/// JSON-file-backed preferences under the platform config directory.
/// Unwritable or unreadable state degrades silently.
pub struct FilePrefStore {
    path: Option<PathBuf>,
    values: HashMap<String, String>,
}

impl FilePrefStore {
    pub fn open() -> Self {
        let path = ProjectDirs::from("", "", "kb")
            .map(|dirs| dirs.config_dir().join("prefs.json"));
        let values = path
            .as_deref()
            .and_then(|p| std::fs::read_to_string(p).ok())
            .and_then(|contents| serde_json::from_str(&contents).ok())
            .unwrap_or_default();
        Self { path, values }
    }
}

impl PrefStore for FilePrefStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
        let Some(path) = self.path.as_deref() else {
            return;
        };
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        if let Ok(contents) = serde_json::to_string_pretty(&self.values) {
            let _ = std::fs::write(path, contents);
        }
    }
}

/// In-memory store for tests and for shells without a config directory.
#[derive(Default)]
pub struct MemoryPrefStore {
    values: HashMap<String, String>,
}

impl PrefStore for MemoryPrefStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }
}

/// Loads the saved theme, defaulting to light on any failure.
pub fn load_theme(store: &dyn PrefStore) -> Theme {
    Theme::from_stored(store.get(THEME_KEY))
}

/// Flips the theme and best-effort persists the new value.
pub fn toggle_theme(store: &mut dyn PrefStore, current: Theme) -> Theme {
    let next = current.toggled();
    store.set(THEME_KEY, next.key());
    next
}
