// File: ./src/logging.rs
// Tracing bootstrap. The terminal belongs to the UI, so logs go to a file.
use anyhow::{Context, Result, anyhow};
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

pub const LOG_FILE_NAME: &str = "smartshopper.log";

/// Installs the global subscriber. `RUST_LOG` takes precedence over `level`.
pub fn init(level: &str, dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    let path = dir.join(LOG_FILE_NAME);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("opening {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| anyhow!("installing subscriber: {e}"))?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_the_log_file() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("logs");
        // A subscriber may already be installed by another test; the file must exist either way.
        let _ = init("debug", &nested);
        assert!(nested.join(LOG_FILE_NAME).exists());
    }
}
