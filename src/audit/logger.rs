//! JSON-lines change log next to the ledger file

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{TrackerError, TrackerResult};
use crate::storage::write_text_atomic;

use super::entry::{AuditEntry, LedgerChange};

/// Size past which the oldest half of the log is dropped
pub const DEFAULT_MAX_LOG_BYTES: u64 = 1024 * 1024;

/// Append-only history of ledger changes, trimmed from the front once it
/// outgrows its size cap
#[derive(Debug, Clone)]
pub struct AuditLogger {
    log_path: PathBuf,
    max_bytes: u64,
}

impl AuditLogger {
    pub fn new(log_path: PathBuf) -> Self {
        Self {
            log_path,
            max_bytes: DEFAULT_MAX_LOG_BYTES,
        }
    }

    pub fn with_max_bytes(mut self, max_bytes: u64) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    pub fn path(&self) -> &Path {
        &self.log_path
    }

    /// Stamp `change` with the current time and append it
    pub fn record(&self, change: LedgerChange) -> TrackerResult<AuditEntry> {
        let entry = AuditEntry::now(change);
        self.append(&entry)?;
        Ok(entry)
    }

    pub fn append(&self, entry: &AuditEntry) -> TrackerResult<()> {
        let mut line = serde_json::to_string(entry)
            .map_err(|e| TrackerError::Json(format!("audit entry: {}", e)))?;
        line.push('\n');

        if let Some(dir) = self.log_path.parent() {
            fs::create_dir_all(dir)?;
        }
        // One write per line keeps concurrent appends from interleaving
        let len = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .and_then(|mut file| {
                file.write_all(line.as_bytes())?;
                Ok(file.metadata()?.len())
            })
            .map_err(|e| {
                TrackerError::Io(format!("appending to {}: {}", self.log_path.display(), e))
            })?;

        if len > self.max_bytes {
            self.trim()?;
        }
        Ok(())
    }

    /// Keep only the newest whole lines fitting in half the size cap
    fn trim(&self) -> TrackerResult<()> {
        let contents = fs::read_to_string(&self.log_path)?;
        let budget = usize::try_from(self.max_bytes / 2).unwrap_or(usize::MAX);
        let cut = contents.len().saturating_sub(budget);
        if cut == 0 {
            return Ok(());
        }

        // Start after the first newline at or past the cut so no line is torn
        let keep_from = contents.as_bytes()[cut - 1..]
            .iter()
            .position(|&b| b == b'\n')
            .map_or(contents.len(), |offset| cut + offset);

        write_text_atomic(&self.log_path, &contents[keep_from..])?;
        debug!(
            dropped_bytes = keep_from,
            kept_bytes = contents.len() - keep_from,
            "audit log trimmed"
        );
        Ok(())
    }

    /// Every readable entry, oldest first
    ///
    /// A missing log is empty. Lines that do not parse are skipped with a
    /// warning so one torn write cannot hide the rest of the history.
    pub fn entries(&self) -> TrackerResult<Vec<AuditEntry>> {
        let contents = match fs::read_to_string(&self.log_path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(TrackerError::Io(format!(
                    "reading {}: {}",
                    self.log_path.display(),
                    e
                )))
            }
        };

        Ok(contents
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .filter_map(|(index, line)| match serde_json::from_str(line) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!(line = index + 1, error = %e, "skipping unreadable audit entry");
                    None
                }
            })
            .collect())
    }

    /// The last `count` entries, oldest first
    pub fn tail(&self, count: usize) -> TrackerResult<Vec<AuditEntry>> {
        let mut entries = self.entries()?;
        let keep_from = entries.len().saturating_sub(count);
        Ok(entries.split_off(keep_from))
    }
}
