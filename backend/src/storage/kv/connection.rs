use anyhow::Result;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

/// Handle to the data directory holding the blob files.
///
/// Cheap to clone; repositories hold a clone and derive per-key paths from
/// it.
#[derive(Debug, Clone)]
pub struct KvConnection {
    base_directory: PathBuf,
}

impl KvConnection {
    /// Open a connection rooted at `base_directory`, creating the directory
    /// if it does not exist yet.
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_directory = base_directory.as_ref().to_path_buf();
        if !base_directory.exists() {
            fs::create_dir_all(&base_directory)?;
            info!("Created data directory: {:?}", base_directory);
        }
        Ok(Self { base_directory })
    }

    /// The directory all blob files live under.
    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    /// Path of the blob file for `key`.
    pub fn key_path(&self, key: &str) -> PathBuf {
        self.base_directory.join(format!("{}.json", key))
    }
}
