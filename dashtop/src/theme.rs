//! Dark/light mode: one store, one mutator (`toggle`), persisted as a plain
//! `dark`/`light` string.

use std::{
    fs, io,
    path::PathBuf,
    sync::{Arc, Mutex},
};

use tracing::{info, warn};

use crate::config::config_dir;
use crate::ui::palette::Palette;

pub const DARK: &str = "dark";
pub const LIGHT: &str = "light";

pub trait ThemeStorage: Send {
    fn load(&self) -> Option<String>;
    fn save(&mut self, value: &str) -> io::Result<()>;
}

/// `$XDG_CONFIG_HOME/dashtop/theme`
pub struct FileThemeStorage {
    path: PathBuf,
}

impl FileThemeStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn default_location() -> Self {
        Self::new(config_dir().join("theme"))
    }
}

impl ThemeStorage for FileThemeStorage {
    fn load(&self) -> Option<String> {
        fs::read_to_string(&self.path)
            .ok()
            .map(|s| s.trim().to_string())
    }

    fn save(&mut self, value: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, value)
    }
}

/// Clones share the same slot, so a test can keep one and hand the other to the store.
#[derive(Clone, Default)]
pub struct MemoryThemeStorage {
    slot: Arc<Mutex<Option<String>>>,
}

impl MemoryThemeStorage {
    pub fn with_value(value: &str) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(value.to_string()))),
        }
    }

    pub fn value(&self) -> Option<String> {
        self.slot.lock().ok().and_then(|g| g.clone())
    }
}

impl ThemeStorage for MemoryThemeStorage {
    fn load(&self) -> Option<String> {
        self.value()
    }

    fn save(&mut self, value: &str) -> io::Result<()> {
        let mut g = self
            .slot
            .lock()
            .map_err(|_| io::Error::other("theme slot poisoned"))?;
        *g = Some(value.to_string());
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ThemeState {
    pub dark_mode: bool,
}

pub struct ThemeStore {
    state: ThemeState,
    palette: Palette,
    storage: Box<dyn ThemeStorage>,
}

impl ThemeStore {
    pub fn load(storage: impl ThemeStorage + 'static) -> Self {
        let dark_mode = storage.load().as_deref() == Some(DARK);
        Self {
            state: ThemeState { dark_mode },
            palette: Palette::for_mode(dark_mode),
            storage: Box::new(storage),
        }
    }

    pub fn state(&self) -> ThemeState {
        self.state
    }

    pub fn dark_mode(&self) -> bool {
        self.state.dark_mode
    }

    /// Root palette; the app paints the whole frame with it.
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn toggle(&mut self) -> ThemeState {
        self.state.dark_mode = !self.state.dark_mode;
        self.palette = Palette::for_mode(self.state.dark_mode);
        let value = if self.state.dark_mode { DARK } else { LIGHT };
        if let Err(e) = self.storage.save(value) {
            warn!(error = %e, "failed to persist theme");
        }
        info!(theme = value, "theme toggled");
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_value_starts_light() {
        let store = ThemeStore::load(MemoryThemeStorage::default());
        assert!(!store.dark_mode());
        assert!(!store.palette().dark);
    }

    #[test]
    fn toggle_round_trip_persists_each_step() {
        let storage = MemoryThemeStorage::default();
        let mut store = ThemeStore::load(storage.clone());

        assert!(store.toggle().dark_mode);
        assert_eq!(storage.value().as_deref(), Some("dark"));
        assert_eq!(*store.palette(), Palette::dark());

        assert!(!store.toggle().dark_mode);
        assert_eq!(storage.value().as_deref(), Some("light"));
        assert_eq!(*store.palette(), Palette::light());
    }

    #[test]
    fn unknown_stored_value_reads_as_light() {
        let store = ThemeStore::load(MemoryThemeStorage::with_value("solarized"));
        assert!(!store.dark_mode());
        let store = ThemeStore::load(MemoryThemeStorage::with_value("dark"));
        assert!(store.dark_mode());
    }

    #[test]
    fn file_storage_persists_across_loads() {
        let td = tempfile::tempdir().unwrap();
        let path = td.path().join("nested").join("theme");
        let mut store = ThemeStore::load(FileThemeStorage::new(&path));
        store.toggle();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "dark");

        let reloaded = ThemeStore::load(FileThemeStorage::new(&path));
        assert!(reloaded.dark_mode());
    }
}
