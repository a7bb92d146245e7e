//! Backups of the ledger file
//!
//! - `BackupManager`: creates timestamped archives and applies retention
//! - `RestoreManager`: validates archives and writes them back
//!
//! # Backup Format
//!
//! Each backup is a JSON file in `<base>/backups/` named
//! `backup-YYYYMMDD-HHMMSS-mmm.json`, holding:
//! - `schema_version`: archive layout version
//! - `created_at`: UTC timestamp
//! - `ledger`: the ledger file as it was, or `null` before the first save
//!
//! # Retention Policy
//!
//! The oldest backup of each calendar month counts as monthly. By default the
//! newest 30 other backups and the newest 12 monthly ones are kept.
//!
//! # Example
//!
//! ```rust,ignore
//! use allowance_tracker::backup::{BackupManager, RestoreManager};
//!
//! let manager = BackupManager::new(paths.clone(), settings.backup_retention.clone());
//! let (backup_path, _pruned) = manager.create_backup_with_retention()?;
//!
//! let result = RestoreManager::new(paths).restore_from_file(&backup_path)?;
//! println!("{}", result.summary());
//! ```

mod manager;
mod restore;

pub use manager::{BackupArchive, BackupInfo, BackupManager, BACKUP_SCHEMA_VERSION};
pub use restore::{RestoreManager, RestoreResult, ValidationResult};
