//! `allowance backup ...`

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use clap::Subcommand;

use crate::backup::{BackupInfo, BackupManager, RestoreManager};
use crate::config::paths::TrackerPaths;
use crate::config::settings::Settings;
use crate::error::{TrackerError, TrackerResult};

#[derive(Subcommand, Debug)]
pub enum BackupCommands {
    /// Snapshot the ledger, then prune past the retention quotas
    Create,

    /// List backups, newest first
    List {
        /// Also read each archive and show what it holds
        #[arg(short, long)]
        verbose: bool,
    },

    /// Replace the ledger with a backup
    Restore {
        /// Archive name, path, or `latest`
        backup: String,

        /// Actually overwrite the ledger
        #[arg(short, long)]
        force: bool,
    },

    /// Describe one backup
    Info {
        /// Archive name, path, or `latest`
        backup: String,
    },

    /// Remove backups outside the retention quotas
    Prune {
        /// Actually delete
        #[arg(short, long)]
        force: bool,
    },
}

pub fn handle_backup_command(
    paths: &TrackerPaths,
    settings: &Settings,
    cmd: BackupCommands,
) -> TrackerResult<()> {
    let manager = BackupManager::new(paths.clone(), settings.backup_retention.clone());

    match cmd {
        BackupCommands::Create => create(&manager),
        BackupCommands::List { verbose } => list(&manager, paths, verbose),
        BackupCommands::Restore { backup, force } => restore(&manager, paths, &backup, force),
        BackupCommands::Info { backup } => info(&manager, paths, &backup),
        BackupCommands::Prune { force } => prune(&manager, settings, force),
    }
}

fn create(manager: &BackupManager) -> TrackerResult<()> {
    let (path, pruned) = manager.create_backup_with_retention()?;
    println!("Saved {}", path.display());
    if !pruned.is_empty() {
        println!("Removed {} expired backup(s)", pruned.len());
    }
    Ok(())
}

fn list(manager: &BackupManager, paths: &TrackerPaths, verbose: bool) -> TrackerResult<()> {
    let backups = manager.list_backups()?;
    if backups.is_empty() {
        println!("No backups yet. Run `allowance backup create` to make one.");
        return Ok(());
    }

    let now = Utc::now();
    let restorer = RestoreManager::new(paths.clone());

    for backup in &backups {
        println!("{}", backup_line(backup, now));
        if verbose {
            let contents = restorer
                .validate_backup(&backup.path)
                .map(|v| v.summary())
                .unwrap_or_else(|e| format!("unreadable: {}", e));
            println!("    {}", contents);
        }
    }

    let monthly = backups.iter().filter(|b| b.is_monthly).count();
    println!();
    println!(
        "{} backup(s), {} kept as monthly, in {}",
        backups.len(),
        monthly,
        manager.backup_dir().display()
    );
    Ok(())
}

fn restore(
    manager: &BackupManager,
    paths: &TrackerPaths,
    backup: &str,
    force: bool,
) -> TrackerResult<()> {
    let path = resolve_backup_path(manager, backup)?;
    let restorer = RestoreManager::new(paths.clone());
    let check = restorer.validate_backup(&path)?;

    println!("{} (taken {})", path.display(), stamp(check.backup_date));
    println!("{}", check.summary());

    if !check.is_valid {
        return Err(TrackerError::MalformedPersistedData(format!(
            "{} cannot be restored",
            path.display()
        )));
    }

    if !force {
        println!();
        println!("The current ledger would be replaced. Re-run with --force to restore.");
        return Ok(());
    }

    let safety = manager.create_backup()?;
    println!("Current ledger saved to {}", file_name(&safety));

    let result = restorer.restore_from_file(&path)?;
    println!("{}", result.summary());
    Ok(())
}

fn info(manager: &BackupManager, paths: &TrackerPaths, backup: &str) -> TrackerResult<()> {
    let path = resolve_backup_path(manager, backup)?;
    let check = RestoreManager::new(paths.clone()).validate_backup(&path)?;
    let bytes = std::fs::metadata(&path)?.len();

    println!("Path:      {}", path.display());
    println!("Taken:     {}", stamp(check.backup_date));
    println!("Bytes:     {}", bytes);
    println!("Layout:    v{}", check.schema_version);
    println!("Expenses:  {}", check.expense_count);
    println!("{}", check.summary());
    Ok(())
}

fn prune(manager: &BackupManager, settings: &Settings, force: bool) -> TrackerResult<()> {
    let quota = &settings.backup_retention;
    let expired = manager.expired_backups()?;

    println!(
        "Keeping up to {} recent and {} monthly backup(s)",
        quota.daily_count, quota.monthly_count
    );

    if expired.is_empty() {
        println!("Nothing to prune.");
        return Ok(());
    }

    if !force {
        for backup in &expired {
            println!("  would remove {}", backup.filename);
        }
        println!("Re-run with --force to delete {} backup(s).", expired.len());
        return Ok(());
    }

    let removed = manager.enforce_retention()?;
    println!("Removed {} backup(s).", removed.len());
    Ok(())
}

/// `latest`, an existing path, or the name of a listed backup with or
/// without `.json`
fn resolve_backup_path(manager: &BackupManager, backup: &str) -> TrackerResult<PathBuf> {
    let found = if backup.eq_ignore_ascii_case("latest") {
        manager.get_latest_backup()?
    } else {
        let direct = PathBuf::from(backup);
        if direct.is_file() {
            return Ok(direct);
        }
        match manager.get_backup(backup)? {
            Some(info) => Some(info),
            None => manager.get_backup(&format!("{}.json", backup))?,
        }
    };

    found
        .map(|info| info.path)
        .ok_or_else(|| TrackerError::backup_not_found(backup))
}

fn backup_line(backup: &BackupInfo, now: DateTime<Utc>) -> String {
    let tag = if backup.is_monthly { "  monthly" } else { "" };
    format!(
        "{}  {:>8}  {}{}",
        backup.filename,
        age(now - backup.created_at),
        stamp(backup.created_at),
        tag
    )
}

fn stamp(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M UTC").to_string()
}

/// Coarsest whole unit, e.g. `3d ago`
fn age(elapsed: chrono::Duration) -> String {
    let secs = elapsed.num_seconds().max(0);
    let (value, unit) = match secs {
        s if s < 60 => (s, "s"),
        s if s < 3_600 => (s / 60, "m"),
        s if s < 86_400 => (s / 3_600, "h"),
        s => (s / 86_400, "d"),
    };
    format!("{}{} ago", value, unit)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use tempfile::TempDir;

    #[test]
    fn test_age() {
        assert_eq!(age(Duration::seconds(42)), "42s ago");
        assert_eq!(age(Duration::minutes(5)), "5m ago");
        assert_eq!(age(Duration::hours(3)), "3h ago");
        assert_eq!(age(Duration::days(65)), "65d ago");
        assert_eq!(age(Duration::seconds(-5)), "0s ago");
    }

    #[test]
    fn test_backup_line_marks_monthly() {
        let created_at = DateTime::parse_from_rfc3339("2025-06-01T08:30:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let backup = BackupInfo {
            filename: "backup-20250601-083000-000.json".into(),
            path: PathBuf::from("backup-20250601-083000-000.json"),
            created_at,
            size_bytes: 120,
            is_monthly: true,
        };

        let line = backup_line(&backup, created_at + Duration::hours(2));
        assert!(line.starts_with("backup-20250601-083000-000.json"));
        assert!(line.contains("2h ago"));
        assert!(line.contains("2025-06-01 08:30 UTC"));
        assert!(line.ends_with("monthly"));
    }

    #[test]
    fn test_resolve_backup_path() {
        let temp_dir = TempDir::new().unwrap();
        let paths = TrackerPaths::with_base_dir(temp_dir.path().to_path_buf());
        paths.ensure_directories().unwrap();
        let manager = BackupManager::new(paths.clone(), Settings::default().backup_retention);

        assert!(resolve_backup_path(&manager, "latest")
            .unwrap_err()
            .is_not_found());

        let created = manager.create_backup().unwrap();
        let name = file_name(&created);
        let stem = name.trim_end_matches(".json");

        assert_eq!(resolve_backup_path(&manager, "LATEST").unwrap(), created);
        assert_eq!(resolve_backup_path(&manager, &name).unwrap(), created);
        assert_eq!(resolve_backup_path(&manager, stem).unwrap(), created);
        assert!(resolve_backup_path(&manager, "nope").is_err());
    }
}
