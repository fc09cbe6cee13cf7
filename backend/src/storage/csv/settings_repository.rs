//! # Settings Repository
//!
//! File-backed key-value store over a single `settings.yaml` file at the
//! root of the data directory. Backs application-state flags such as the
//! session gate (`ngo_auth`).
//!
//! ## YAML format
//!
//! ```yaml
//! ngo_auth: "true"
//! ```

use log::debug;
use std::collections::BTreeMap;
use std::fs;

use crate::storage::traits::{KeyValueStore, StoreError};

use super::connection::CsvConnection;

/// YAML-file key-value store.
#[derive(Debug, Clone)]
pub struct SettingsRepository {
    connection: CsvConnection,
}

impl SettingsRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    fn load(&self) -> Result<BTreeMap<String, String>, StoreError> {
        let path = self.connection.settings_file_path();
        if !path.exists() {
            return Ok(BTreeMap::new());
        }

        let yaml_content = fs::read_to_string(&path)?;
        let entries: BTreeMap<String, String> = serde_yaml::from_str(&yaml_content)?;
        debug!("Loaded {} settings from {:?}", entries.len(), path);
        Ok(entries)
    }

    fn save(&self, entries: &BTreeMap<String, String>) -> Result<(), StoreError> {
        let path = self.connection.settings_file_path();
        let yaml_content = serde_yaml::to_string(entries)?;

        // Write to a temp file first so a crash mid-write cannot truncate
        // the settings file.
        let temp_path = path.with_extension("yaml.tmp");
        fs::write(&temp_path, yaml_content)?;
        fs::rename(&temp_path, &path)?;
        Ok(())
    }
}

impl KeyValueStore for SettingsRepository {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.load()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.load()?;
        entries.insert(key.to_string(), value.to_string());
        self.save(&entries)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut entries = self.load()?;
        if entries.remove(key).is_some() {
            self.save(&entries)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_repository() -> (tempfile::TempDir, SettingsRepository) {
        let temp_dir = tempfile::tempdir().unwrap();
        let connection = CsvConnection::new(temp_dir.path()).unwrap();
        (temp_dir, SettingsRepository::new(connection))
    }

    #[test]
    fn values_survive_a_fresh_repository_over_the_same_directory() {
        let (dir, repo) = test_repository();
        repo.set("ngo_auth", "true").unwrap();

        let reopened = SettingsRepository::new(CsvConnection::new(dir.path()).unwrap());
        assert_eq!(reopened.get("ngo_auth").unwrap(), Some("true".to_string()));
    }

    #[test]
    fn removing_a_missing_key_is_a_no_op() {
        let (_dir, repo) = test_repository();
        repo.remove("absent").unwrap();
        assert_eq!(repo.get("absent").unwrap(), None);
    }
}
