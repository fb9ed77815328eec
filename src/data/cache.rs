//! Local snapshot store
//!
//! Keeps named dashboard snapshots as JSON files so a session can be replayed
//! offline.

use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::snapshot::DashboardSnapshot;
use crate::core::{DashError, DashResult};

/// Store configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapshotConfig {
    /// Store directory
    pub dir: PathBuf,
    /// Maximum age before a stored snapshot is stale (in hours)
    pub max_age_hours: i64,
    /// Whether to use the store
    pub enabled: bool,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("./data/snapshots"),
            max_age_hours: 24,
            enabled: true,
        }
    }
}

const SUFFIX: &str = "_snapshot.json";

/// Snapshot store manager
pub struct SnapshotStore {
    config: SnapshotConfig,
}

impl SnapshotStore {
    pub fn new(config: SnapshotConfig) -> DashResult<Self> {
        if config.enabled && !config.dir.exists() {
            fs::create_dir_all(&config.dir)?;
        }

        Ok(Self { config })
    }

    pub fn config(&self) -> &SnapshotConfig {
        &self.config
    }

    fn path_for(&self, name: &str) -> DashResult<PathBuf> {
        let valid = !name.is_empty()
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(DashError::invalid_input(format!("bad snapshot name {:?}", name)));
        }
        Ok(self.config.dir.join(format!("{}{}", name, SUFFIX)))
    }

    /// Stored and younger than `max_age_hours`
    pub fn is_valid(&self, name: &str) -> bool {
        if !self.config.enabled {
            return false;
        }
        let Ok(path) = self.path_for(name) else {
            return false;
        };

        let modified = fs::metadata(&path).and_then(|m| m.modified());
        match modified {
            Ok(modified) => {
                let modified: DateTime<Utc> = modified.into();
                Utc::now() - modified < Duration::hours(self.config.max_age_hours)
            }
            Err(_) => false,
        }
    }

    pub fn save(&self, name: &str, snapshot: &DashboardSnapshot) -> DashResult<()> {
        if !self.config.enabled {
            return Ok(());
        }

        let path = self.path_for(name)?;
        fs::write(&path, snapshot.to_json()?)?;

        tracing::info!("Stored snapshot {} at {:?}", name, path);
        Ok(())
    }

    /// `None` when missing, stale or the store is disabled
    pub fn load(&self, name: &str) -> DashResult<Option<DashboardSnapshot>> {
        if !self.is_valid(name) {
            return Ok(None);
        }

        let path = self.path_for(name)?;
        let json = fs::read_to_string(&path)?;
        let snapshot = DashboardSnapshot::from_json(&json)?;

        tracing::info!("Loaded snapshot {} from store", name);
        Ok(Some(snapshot))
    }

    pub fn clear(&self, name: &str) -> DashResult<bool> {
        let path = self.path_for(name)?;
        if !path.exists() {
            return Ok(false);
        }
        fs::remove_file(path)?;
        Ok(true)
    }

    pub fn clear_all(&self) -> DashResult<()> {
        if self.config.dir.exists() {
            fs::remove_dir_all(&self.config.dir)?;
            fs::create_dir_all(&self.config.dir)?;
        }
        Ok(())
    }

    /// Names of stored snapshots, sorted
    pub fn list(&self) -> DashResult<Vec<String>> {
        let mut names = Vec::new();

        if !self.config.dir.exists() {
            return Ok(names);
        }

        for entry in fs::read_dir(&self.config.dir)? {
            let file_name = entry?.file_name().to_string_lossy().to_string();
            if let Some(name) = file_name.strip_suffix(SUFFIX) {
                names.push(name.to_string());
            }
        }

        names.sort();
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::sample_snapshot;
    use tempfile::tempdir;

    fn store_in(dir: &std::path::Path) -> SnapshotStore {
        SnapshotStore::new(SnapshotConfig {
            dir: dir.to_path_buf(),
            max_age_hours: 24,
            enabled: true,
        })
        .unwrap()
    }

    #[test]
    fn test_store_operations() {
        let temp_dir = tempdir().unwrap();
        let store = store_in(temp_dir.path());
        let snapshot = sample_snapshot();

        store.save("morning", &snapshot).unwrap();
        store.save("close", &snapshot).unwrap();
        assert!(store.is_valid("morning"));
        assert_eq!(store.list().unwrap(), vec!["close", "morning"]);

        let loaded = store.load("morning").unwrap();
        assert_eq!(loaded, Some(snapshot));

        assert!(store.clear("morning").unwrap());
        assert!(!store.is_valid("morning"));
        assert_eq!(store.load("morning").unwrap(), None);

        store.clear_all().unwrap();
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_stale_snapshots_are_ignored() {
        let temp_dir = tempdir().unwrap();
        let store = SnapshotStore::new(SnapshotConfig {
            dir: temp_dir.path().to_path_buf(),
            max_age_hours: -1,
            enabled: true,
        })
        .unwrap();

        store.save("old", &sample_snapshot()).unwrap();
        assert!(!store.is_valid("old"));
        assert_eq!(store.load("old").unwrap(), None);
    }

    #[test]
    fn test_disabled_store_is_inert() {
        let temp_dir = tempdir().unwrap();
        let dir = temp_dir.path().join("never");
        let store = SnapshotStore::new(SnapshotConfig {
            dir: dir.clone(),
            max_age_hours: 24,
            enabled: false,
        })
        .unwrap();

        store.save("x", &sample_snapshot()).unwrap();
        assert!(!dir.exists());
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_rejects_path_like_names() {
        let temp_dir = tempdir().unwrap();
        let store = store_in(temp_dir.path());
        assert!(store.save("../escape", &sample_snapshot()).is_err());
        assert!(!store.is_valid(""));
    }
}
