//! Backup manager
//!
//! Snapshots the ledger file into timestamped JSON archives and prunes them
//! according to the retention policy.

use std::collections::HashSet;
use std::fs::{self, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Datelike, Duration, NaiveDateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::paths::TrackerPaths;
use crate::config::settings::BackupRetention;
use crate::error::{TrackerError, TrackerResult};
use crate::storage::{read_json_value, write_json_atomic};

/// Current archive layout version
pub const BACKUP_SCHEMA_VERSION: u32 = 1;

/// Metadata about a backup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupInfo {
    pub filename: String,
    pub path: PathBuf,
    /// Parsed from the filename
    pub created_at: DateTime<Utc>,
    pub size_bytes: u64,
    /// Oldest backup of its calendar month, kept under the monthly quota
    pub is_monthly: bool,
}

/// Backup archive format
#[derive(Debug, Serialize, Deserialize)]
pub struct BackupArchive {
    pub schema_version: u32,
    pub created_at: DateTime<Utc>,
    /// Raw ledger file contents; `null` if nothing had been saved yet
    pub ledger: serde_json::Value,
}

/// Manages backup creation and retention
pub struct BackupManager {
    backup_dir: PathBuf,
    paths: TrackerPaths,
    retention: BackupRetention,
}

impl BackupManager {
    pub fn new(paths: TrackerPaths, retention: BackupRetention) -> Self {
        let backup_dir = paths.backup_dir();
        Self {
            backup_dir,
            paths,
            retention,
        }
    }

    /// Copy the current ledger into a new archive and return its path
    ///
    /// Backing up before the first save is allowed; the archive then holds
    /// a `null` ledger.
    pub fn create_backup(&self) -> TrackerResult<PathBuf> {
        let ledger = read_json_value(self.paths.ledger_file())?;
        let (created_at, path) = self.claim_backup_name(Utc::now())?;
        let archive = BackupArchive {
            schema_version: BACKUP_SCHEMA_VERSION,
            created_at,
            ledger,
        };

        if let Err(e) = write_json_atomic(&path, &archive) {
            let _ = fs::remove_file(&path);
            return Err(e);
        }

        info!(path = %path.display(), "backup created");
        Ok(path)
    }

    /// Reserve an unused archive name, stepping one millisecond past `at`
    /// for every name already taken
    fn claim_backup_name(&self, mut at: DateTime<Utc>) -> TrackerResult<(DateTime<Utc>, PathBuf)> {
        fs::create_dir_all(&self.backup_dir)?;
        loop {
            let path = self.backup_dir.join(backup_file_name(at));
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(_) => return Ok((at, path)),
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    at += Duration::milliseconds(1);
                }
                Err(e) => {
                    return Err(TrackerError::Io(format!("creating {}: {}", path.display(), e)))
                }
            }
        }
    }

    /// Every `backup-*.json` in the backup directory, newest first
    pub fn list_backups(&self) -> TrackerResult<Vec<BackupInfo>> {
        let entries = match fs::read_dir(&self.backup_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(TrackerError::Io(format!(
                    "listing {}: {}",
                    self.backup_dir.display(),
                    e
                )))
            }
        };

        let mut backups: Vec<BackupInfo> = entries
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| parse_backup_info(&entry.path()))
            .collect();

        backups.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        mark_monthly(&mut backups);
        Ok(backups)
    }

    /// Backups that fall outside the daily and monthly quotas
    pub fn expired_backups(&self) -> TrackerResult<Vec<BackupInfo>> {
        let (monthly, daily): (Vec<_>, Vec<_>) =
            self.list_backups()?.into_iter().partition(|b| b.is_monthly);

        Ok(daily
            .into_iter()
            .skip(self.retention.daily_count as usize)
            .chain(monthly.into_iter().skip(self.retention.monthly_count as usize))
            .collect())
    }

    /// Delete backups beyond the daily and monthly quotas
    pub fn enforce_retention(&self) -> TrackerResult<Vec<PathBuf>> {
        let mut deleted = Vec::new();

        for backup in self.expired_backups()? {
            fs::remove_file(&backup.path)
                .map_err(|e| TrackerError::Io(format!("Failed to delete old backup: {}", e)))?;
            debug!(path = %backup.path.display(), "expired backup removed");
            deleted.push(backup.path);
        }

        Ok(deleted)
    }

    /// Create a backup and then enforce retention policy
    pub fn create_backup_with_retention(&self) -> TrackerResult<(PathBuf, Vec<PathBuf>)> {
        let backup_path = self.create_backup()?;
        let deleted = self.enforce_retention()?;
        Ok((backup_path, deleted))
    }

    pub fn backup_dir(&self) -> &PathBuf {
        &self.backup_dir
    }

    /// Get a specific backup by filename
    pub fn get_backup(&self, filename: &str) -> TrackerResult<Option<BackupInfo>> {
        Ok(self
            .list_backups()?
            .into_iter()
            .find(|b| b.filename == filename))
    }

    pub fn get_latest_backup(&self) -> TrackerResult<Option<BackupInfo>> {
        Ok(self.list_backups()?.into_iter().next())
    }
}

fn parse_backup_info(path: &Path) -> Option<BackupInfo> {
    let filename = path.file_name()?.to_string_lossy().to_string();
    let stamp = filename.strip_prefix("backup-")?.strip_suffix(".json")?;
    let created_at = parse_backup_timestamp(stamp)?;
    let size_bytes = fs::metadata(path).ok()?.len();

    Some(BackupInfo {
        filename,
        path: path.to_path_buf(),
        created_at,
        size_bytes,
        is_monthly: false,
    })
}

/// Flag the oldest backup of each month; `backups` must be newest first
fn mark_monthly(backups: &mut [BackupInfo]) {
    let mut seen_months = HashSet::new();
    for backup in backups.iter_mut().rev() {
        let month = (backup.created_at.year(), backup.created_at.month());
        backup.is_monthly = seen_months.insert(month);
    }
}

const STAMP_FORMAT: &str = "%Y%m%d-%H%M%S";

fn backup_file_name(at: DateTime<Utc>) -> String {
    format!(
        "backup-{}-{:03}.json",
        at.format(STAMP_FORMAT),
        at.timestamp_subsec_millis()
    )
}

/// `YYYYMMDD-HHMMSS`, optionally followed by `-mmm` milliseconds
fn parse_backup_timestamp(stamp: &str) -> Option<DateTime<Utc>> {
    let seconds = NaiveDateTime::parse_from_str(stamp.get(..15)?, STAMP_FORMAT).ok()?;

    let millis = match stamp.get(15..)? {
        "" => 0,
        suffix => {
            let digits = suffix.strip_prefix('-')?;
            if digits.len() != 3 || !digits.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            digits.parse::<u32>().ok()?
        }
    };

    Some(seconds.with_nanosecond(millis * 1_000_000)?.and_utc())
}
