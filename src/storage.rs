// File: ./src/storage.rs
// Persistence store: one JSON document holding the SavedState snapshot.
//
// Every failure is absorbed here. `save` has no durable effect when it fails
// and `load` answers `None`; callers fall back to starter data.
use crate::model::SavedState;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use fs2::FileExt;
use std::env;
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};
use tracing::{debug, warn};

pub const DATA_FILE_NAME: &str = "data.json";
pub const DATA_DIR_ENV: &str = "SMARTSHOPPER_DATA_DIR";

static SHARED: OnceLock<LocalStorage> = OnceLock::new();

pub struct LocalStorage {
    path: Option<PathBuf>,
    // In-process serialization; the fs2 lock covers other handles.
    guard: Mutex<()>,
}

impl LocalStorage {
    /// Store backed by the application's private data directory.
    pub fn new() -> Self {
        Self {
            path: Self::data_dir().map(|dir| dir.join(DATA_FILE_NAME)),
            guard: Mutex::new(()),
        }
    }

    /// Store backed by an explicit file.
    pub fn at<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: Some(path.into()),
            guard: Mutex::new(()),
        }
    }

    /// Process-wide instance, built on first use.
    pub fn shared() -> &'static LocalStorage {
        SHARED.get_or_init(LocalStorage::new)
    }

    pub fn data_dir() -> Option<PathBuf> {
        // ISOLATION: Check env var first
        if let Ok(dir) = env::var(DATA_DIR_ENV)
            && !dir.is_empty()
        {
            return Some(PathBuf::from(dir));
        }
        ProjectDirs::from("com", "smartshopper", "smartshopper")
            .map(|proj| proj.data_dir().to_path_buf())
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Atomic write: Write to .tmp file then rename
    pub fn atomic_write<P: AsRef<Path>, C: AsRef<[u8]>>(path: P, contents: C) -> Result<()> {
        let path = path.as_ref();
        let tmp_path = path.with_extension("tmp");
        fs::write(&tmp_path, contents)
            .with_context(|| format!("writing {}", tmp_path.display()))?;
        if let Err(e) = fs::rename(&tmp_path, path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(e).with_context(|| format!("replacing {}", path.display()));
        }
        Ok(())
    }

    /// Runs `f` while holding an exclusive advisory lock next to `path`.
    /// The lock is best-effort: if it can't be taken, `f` still runs.
    pub fn with_lock<T, F>(path: &Path, f: F) -> Result<T>
    where
        F: FnOnce() -> Result<T>,
    {
        let lock = match Self::acquire_lock(path) {
            Ok(file) => Some(file),
            Err(e) => {
                warn!(error = %format!("{e:#}"), "proceeding without file lock");
                None
            }
        };
        let result = f();
        if let Some(file) = lock {
            let _ = FileExt::unlock(&file);
        }
        result
    }

    fn acquire_lock(path: &Path) -> Result<File> {
        let lock_path = path.with_extension("lock");
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&lock_path)
            .with_context(|| format!("opening lock {}", lock_path.display()))?;
        FileExt::lock_exclusive(&file)
            .with_context(|| format!("locking {}", lock_path.display()))?;
        Ok(file)
    }

    /// Overwrites the stored snapshot. Never reports failure.
    pub fn save(&self, state: &SavedState) {
        let Some(path) = self.path() else {
            debug!("no data directory available, skipping save");
            return;
        };
        let _held = self.guard.lock().unwrap_or_else(|e| e.into_inner());
        match Self::try_save(path, state) {
            Ok(()) => debug!(
                path = %path.display(),
                lists = state.shopping_lists.len(),
                categories = state.categories.len(),
                items = state.items.len(),
                "saved state"
            ),
            Err(e) => warn!(path = %path.display(), error = %format!("{e:#}"), "save failed, state not persisted"),
        }
    }

    /// Returns the stored snapshot, or `None` when there is nothing usable.
    pub fn load(&self) -> Option<SavedState> {
        let path = self.path()?;
        let _held = self.guard.lock().unwrap_or_else(|e| e.into_inner());
        if !path.exists() {
            debug!(path = %path.display(), "no saved state yet");
            return None;
        }
        match Self::try_load(path) {
            Ok(state) => {
                debug!(path = %path.display(), items = state.items.len(), "loaded state");
                Some(state)
            }
            Err(e) => {
                warn!(path = %path.display(), error = %format!("{e:#}"), "ignoring unreadable saved state");
                None
            }
        }
    }

    fn try_save(path: &Path, state: &SavedState) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(state).context("encoding state")?;
        Self::with_lock(path, || Self::atomic_write(path, json))
    }

    fn try_load(path: &Path) -> Result<SavedState> {
        Self::with_lock(path, || {
            let json = fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            let state = serde_json::from_str(&json).context("decoding state")?;
            Ok(state)
        })
    }
}

impl Default for LocalStorage {
    fn default() -> Self {
        Self::new()
    }
}
