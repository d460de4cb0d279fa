use anyhow::Result;
use log::debug;
use std::fs;

use super::connection::KvConnection;
use crate::storage::traits::KeyValueStorage;

/// File-backed key-value repository: one `{key}.json` file per key under the
/// connection's data directory.
#[derive(Clone)]
pub struct KvRepository {
    connection: KvConnection,
}

impl KvRepository {
    /// Create a new repository over `connection`.
    pub fn new(connection: KvConnection) -> Self {
        Self { connection }
    }
}

impl KeyValueStorage for KvRepository {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.connection.key_path(key);
        if !path.exists() {
            return Ok(None);
        }
        let value = fs::read_to_string(&path)?;
        debug!("Read {} bytes from {:?}", value.len(), path);
        Ok(Some(value))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.connection.key_path(key);

        // Atomic write pattern: write to temp file, then rename
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, value)?;
        fs::rename(&temp_path, &path)?;

        debug!("Wrote {} bytes to {:?}", value.len(), path);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.connection.key_path(key);
        if path.exists() {
            fs::remove_file(&path)?;
            debug!("Removed {:?}", path);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup_test_repo() -> (KvRepository, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let connection = KvConnection::new(temp_dir.path()).expect("Failed to create connection");
        (KvRepository::new(connection), temp_dir)
    }

    #[test]
    fn test_missing_key_reads_as_none() {
        let (repo, _temp_dir) = setup_test_repo();
        assert_eq!(repo.get("items").unwrap(), None);
    }

    #[test]
    fn test_set_then_get_round_trips() {
        let (repo, _temp_dir) = setup_test_repo();
        repo.set("items", "[]").unwrap();
        assert_eq!(repo.get("items").unwrap(), Some("[]".to_string()));
    }

    #[test]
    fn test_set_overwrites_previous_value() {
        let (repo, _temp_dir) = setup_test_repo();
        repo.set("language", "\"en\"").unwrap();
        repo.set("language", "\"zh-HK\"").unwrap();
        assert_eq!(repo.get("language").unwrap(), Some("\"zh-HK\"".to_string()));
    }

    #[test]
    fn test_remove_deletes_key_and_is_idempotent() {
        let (repo, _temp_dir) = setup_test_repo();
        repo.set("items", "[]").unwrap();
        repo.remove("items").unwrap();
        assert_eq!(repo.get("items").unwrap(), None);
        // Removing again is a no-op
        repo.remove("items").unwrap();
    }

    #[test]
    fn test_values_persist_across_repository_instances() {
        let temp_dir = TempDir::new().unwrap();
        {
            let connection = KvConnection::new(temp_dir.path()).unwrap();
            let repo = KvRepository::new(connection);
            repo.set("items", "[{\"itemId\":\"0001\"}]").unwrap();
        }

        // Simulate app restart with a fresh connection
        let connection = KvConnection::new(temp_dir.path()).unwrap();
        let repo = KvRepository::new(connection);
        assert_eq!(
            repo.get("items").unwrap(),
            Some("[{\"itemId\":\"0001\"}]".to_string())
        );
    }
}
