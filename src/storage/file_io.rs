//! Ledger, settings and log files on disk
//!
//! Writes go to a sibling `.tmp` file that is synced and renamed over the
//! target, so a crash leaves either the old or the new contents.

use std::fs::{self, File};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};

use crate::error::{TrackerError, TrackerResult};

/// Parse `path`, or `None` when it does not exist
pub fn read_json_opt<T: DeserializeOwned>(path: impl AsRef<Path>) -> TrackerResult<Option<T>> {
    let path = path.as_ref();
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(storage_error("reading", path, e)),
    };

    serde_json::from_slice(&bytes)
        .map(Some)
        .map_err(|e| storage_error("parsing", path, e))
}

/// Parse `path`, or `T::default()` when it does not exist
pub fn read_json<T: DeserializeOwned + Default>(path: impl AsRef<Path>) -> TrackerResult<T> {
    Ok(read_json_opt(path)?.unwrap_or_default())
}

/// Raw JSON contents, `Null` when the file does not exist
pub fn read_json_value(path: impl AsRef<Path>) -> TrackerResult<serde_json::Value> {
    Ok(read_json_opt(path)?.unwrap_or(serde_json::Value::Null))
}

/// Pretty-print `data` to `path`, replacing it in one rename
pub fn write_json_atomic<T: Serialize>(path: impl AsRef<Path>, data: &T) -> TrackerResult<()> {
    replace_atomically(path.as_ref(), |out, staging| {
        serde_json::to_writer_pretty(&mut *out, data)
            .map_err(|e| storage_error("serializing", staging, e))?;
        out.write_all(b"\n")
            .map_err(|e| storage_error("writing", staging, e))
    })
}

/// Replace `path` with `contents` in one rename
pub fn write_text_atomic(path: impl AsRef<Path>, contents: &str) -> TrackerResult<()> {
    replace_atomically(path.as_ref(), |out, staging| {
        out.write_all(contents.as_bytes())
            .map_err(|e| storage_error("writing", staging, e))
    })
}

fn replace_atomically<F>(path: &Path, fill: F) -> TrackerResult<()>
where
    F: FnOnce(&mut BufWriter<File>, &Path) -> TrackerResult<()>,
{
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).map_err(|e| storage_error("creating directory for", path, e))?;
    }

    let staging = staging_path(path);
    let result = write_synced(&staging, fill).and_then(|()| {
        fs::rename(&staging, path).map_err(|e| storage_error("replacing", path, e))
    });

    if result.is_err() {
        let _ = fs::remove_file(&staging);
    }
    result
}

fn write_synced<F>(staging: &Path, fill: F) -> TrackerResult<()>
where
    F: FnOnce(&mut BufWriter<File>, &Path) -> TrackerResult<()>,
{
    let file = File::create(staging).map_err(|e| storage_error("creating", staging, e))?;
    let mut out = BufWriter::new(file);

    fill(&mut out, staging)?;
    out.flush().map_err(|e| storage_error("writing", staging, e))?;

    let file = out
        .into_inner()
        .map_err(|e| storage_error("writing", staging, e.into_error()))?;
    file.sync_all().map_err(|e| storage_error("syncing", staging, e))
}

/// `ledger.json` stages through `ledger.json.tmp` in the same directory
fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

fn storage_error(action: &str, path: &Path, e: impl std::fmt::Display) -> TrackerError {
    TrackerError::Storage(format!("{} {}: {}", action, path.display(), e))
}
