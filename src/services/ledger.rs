//! The pivot ledger: persisted lock and equipped-order record.
//!
//! A small TOML file (`pivot.toml`) in the config root remembering which
//! profile is locked and the last user-arranged order of equipped profiles.
//! All writes are whole-file read-merge-write rewrites; the record is small
//! enough that incremental updates would buy nothing. No file locking is
//! performed (single-user, single-process assumption).

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::constants::LEDGER_FILE;

/// Persisted pivot state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct LedgerRecord {
    /// Canonical name of the profile to auto-select on every load
    /// (empty = no lock)
    #[serde(default)]
    pub locked: String,
    /// Last-known display order of equipped profiles. Advisory: stale
    /// entries are dropped at use, unlisted profiles are appended.
    #[serde(default)]
    pub equipped_order: Vec<String>,
}

impl LedgerRecord {
    /// Whether the record carries no information at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.locked.is_empty() && self.equipped_order.is_empty()
    }
}

/// Reads and writes the pivot ledger.
pub struct PivotLedger;

impl PivotLedger {
    /// Full path of the ledger file inside `dir`.
    #[must_use]
    pub fn file_path(dir: &Path) -> PathBuf {
        dir.join(LEDGER_FILE)
    }

    /// Reads the ledger record from `dir`.
    ///
    /// An absent file yields the zero-value record. A read or parse error is
    /// non-fatal: it degrades to the zero-value record with a warning, so a
    /// corrupt ledger can never block resolution.
    #[must_use]
    pub fn read(dir: &Path) -> LedgerRecord {
        let path = Self::file_path(dir);
        if !path.exists() {
            return LedgerRecord::default();
        }

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) => {
                warn!(path = %path.display(), %err, "unreadable pivot ledger, ignoring");
                return LedgerRecord::default();
            }
        };

        match toml::from_str(&content) {
            Ok(record) => record,
            Err(err) => {
                warn!(path = %path.display(), %err, "corrupt pivot ledger, ignoring");
                LedgerRecord::default()
            }
        }
    }

    /// Upserts the lock, preserving any existing equipped order.
    pub fn write_locked(dir: &Path, name: &str) -> Result<()> {
        let mut record = Self::read(dir);
        record.locked = name.trim().to_string();
        Self::write(dir, &record)
    }

    /// Upserts the equipped order, preserving any existing lock.
    pub fn write_equipped_order(dir: &Path, order: &[String]) -> Result<()> {
        let mut record = Self::read(dir);
        record.equipped_order = order.to_vec();
        Self::write(dir, &record)
    }

    /// Clears the lock.
    ///
    /// When the record holds neither a lock nor an order afterwards, the
    /// ledger file is deleted outright instead of leaving an empty file
    /// behind.
    pub fn clear_lock(dir: &Path) -> Result<()> {
        let mut record = Self::read(dir);
        record.locked.clear();

        if record.is_empty() {
            let path = Self::file_path(dir);
            if path.exists() {
                fs::remove_file(&path).with_context(|| {
                    format!("Failed to remove pivot ledger: {}", path.display())
                })?;
            }
            return Ok(());
        }

        Self::write(dir, &record)
    }

    /// Whole-file rewrite via temp file + rename.
    fn write(dir: &Path, record: &LedgerRecord) -> Result<()> {
        fs::create_dir_all(dir).with_context(|| {
            format!("Failed to create config directory: {}", dir.display())
        })?;

        let content =
            toml::to_string_pretty(record).context("Failed to serialize pivot ledger")?;

        let path = Self::file_path(dir);
        let temp_path = path.with_extension("toml.tmp");

        fs::write(&temp_path, content).with_context(|| {
            format!("Failed to write temp pivot ledger: {}", temp_path.display())
        })?;

        fs::rename(&temp_path, &path).with_context(|| {
            format!("Failed to rename temp pivot ledger to: {}", path.display())
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_absent_file_is_zero_record() {
        let temp_dir = TempDir::new().unwrap();
        let record = PivotLedger::read(temp_dir.path());
        assert_eq!(record, LedgerRecord::default());
        assert!(record.is_empty());
    }

    #[test]
    fn test_read_corrupt_file_degrades_to_zero_record() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(PivotLedger::file_path(temp_dir.path()), "locked = [broken").unwrap();

        let record = PivotLedger::read(temp_dir.path());
        assert_eq!(record, LedgerRecord::default());
    }

    #[test]
    fn test_write_locked_preserves_order() {
        let temp_dir = TempDir::new().unwrap();
        let order = vec!["beta".to_string(), "alpha".to_string()];
        PivotLedger::write_equipped_order(temp_dir.path(), &order).unwrap();

        PivotLedger::write_locked(temp_dir.path(), "  work  ").unwrap();

        let record = PivotLedger::read(temp_dir.path());
        assert_eq!(record.locked, "work");
        assert_eq!(record.equipped_order, order);
    }

    #[test]
    fn test_write_order_preserves_lock() {
        let temp_dir = TempDir::new().unwrap();
        PivotLedger::write_locked(temp_dir.path(), "work").unwrap();

        let order = vec!["work".to_string(), "home".to_string()];
        PivotLedger::write_equipped_order(temp_dir.path(), &order).unwrap();

        let record = PivotLedger::read(temp_dir.path());
        assert_eq!(record.locked, "work");
        assert_eq!(record.equipped_order, order);
    }

    #[test]
    fn test_clear_lock_keeps_order() {
        let temp_dir = TempDir::new().unwrap();
        PivotLedger::write_locked(temp_dir.path(), "work").unwrap();
        let order = vec!["work".to_string()];
        PivotLedger::write_equipped_order(temp_dir.path(), &order).unwrap();

        PivotLedger::clear_lock(temp_dir.path()).unwrap();

        let record = PivotLedger::read(temp_dir.path());
        assert!(record.locked.is_empty());
        assert_eq!(record.equipped_order, order);
        assert!(PivotLedger::file_path(temp_dir.path()).exists());
    }

    #[test]
    fn test_clear_lock_deletes_empty_ledger() {
        let temp_dir = TempDir::new().unwrap();
        PivotLedger::write_locked(temp_dir.path(), "work").unwrap();

        PivotLedger::clear_lock(temp_dir.path()).unwrap();

        assert!(!PivotLedger::file_path(temp_dir.path()).exists());
        // Clearing again with no file present is a no-op, not an error
        PivotLedger::clear_lock(temp_dir.path()).unwrap();
    }
}
