//! Whole-document JSON persistence.
//!
//! Writes go to a sibling temp file which is synced and then renamed over the
//! target, so readers see either the old document or the new one. If any step
//! fails the temp file is removed and the target is left as it was.

use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::process;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Serialize, de::DeserializeOwned};
use tracing::debug;

use super::error::StoreError;

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Read and parse a JSON document.
///
/// Returns `Ok(None)` when the file does not exist.
///
/// # Errors
/// * Returns `StoreError::Io` if the file exists but cannot be read.
/// * Returns `StoreError::CorruptState` if the contents do not parse as `T`.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, StoreError> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(StoreError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    serde_json::from_str(&contents)
        .map(Some)
        .map_err(|source| StoreError::CorruptState {
            path: path.to_path_buf(),
            source,
        })
}

/// Serialize `data` as pretty JSON and replace `path` with it atomically.
///
/// The parent directory must already exist.
///
/// # Errors
/// * Returns `StoreError::Serialize` if `data` cannot be serialized.
/// * Returns `StoreError::Io` if the temp file cannot be written or renamed.
pub fn write_json<T: Serialize>(path: &Path, data: &T) -> Result<(), StoreError> {
    let serialized = serde_json::to_string_pretty(data).map_err(StoreError::Serialize)?;
    let temp_path = temp_path_for(path);

    let result = write_synced(&temp_path, serialized.as_bytes())
        .and_then(|()| fs::rename(&temp_path, path));
    if let Err(source) = result {
        let _ = fs::remove_file(&temp_path);
        return Err(StoreError::Io {
            path: path.to_path_buf(),
            source,
        });
    }

    debug!("Wrote {}", path.display());
    Ok(())
}

fn write_synced(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(bytes)?;
    file.write_all(b"\n")?;
    file.sync_all()
}

/// Hidden sibling of `path`, unique per process and call
fn temp_path_for(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map_or_else(|| "tags".into(), |n| n.to_string_lossy());
    let n = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    path.with_file_name(format!(".{name}.{}.{n}.tmp", process::id()))
}
