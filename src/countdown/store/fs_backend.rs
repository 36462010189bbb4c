use super::backend::StorageBackend;
use crate::error::{CountdownError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

const VALUE_EXT: &str = "json";

/// File-backed storage: one `<key>.json` file per key under a data directory.
pub struct FsBackend {
    root: PathBuf,
    quota: Option<usize>,
}

impl FsBackend {
    pub fn new(root: PathBuf) -> Self {
        Self { root, quota: None }
    }

    /// Enforce a hard limit on the total size of stored values.
    pub fn with_quota(mut self, bytes: Option<usize>) -> Self {
        self.quota = bytes;
        self
    }

    fn item_path(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(CountdownError::Store(format!(
                "Invalid storage key: {:?}",
                key
            )));
        }
        Ok(self.root.join(format!("{}.{}", key, VALUE_EXT)))
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(CountdownError::Io)?;
        }
        Ok(())
    }

    /// Bytes used by every stored value except the one at `skip`.
    fn bytes_excluding(&self, skip: &Path) -> Result<usize> {
        if !self.root.exists() {
            return Ok(0);
        }
        let mut total = 0;
        for entry in fs::read_dir(&self.root).map_err(CountdownError::Io)? {
            let path = entry.map_err(CountdownError::Io)?.path();
            let is_value = path.extension().and_then(|e| e.to_str()) == Some(VALUE_EXT);
            if path.is_file() && is_value && path != skip {
                total += fs::metadata(&path).map_err(CountdownError::Io)?.len() as usize;
            }
        }
        Ok(total)
    }
}

impl StorageBackend for FsBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let path = self.item_path(key)?;
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path).map_err(CountdownError::Io)?;
        Ok(Some(content))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let target = self.item_path(key)?;
        self.ensure_dir()?;

        if let Some(limit) = self.quota {
            let needed = self.bytes_excluding(&target)? + value.len();
            if needed > limit {
                return Err(CountdownError::QuotaExceeded { needed, limit });
            }
        }

        // Atomic write
        let tmp = self.root.join(format!(".{}-{}.tmp", key, Uuid::new_v4()));
        fs::write(&tmp, value).map_err(CountdownError::Io)?;
        if let Err(e) = fs::rename(&tmp, &target) {
            let _ = fs::remove_file(&tmp);
            return Err(CountdownError::Io(e));
        }
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        let path = self.item_path(key)?;
        if path.exists() {
            fs::remove_file(path).map_err(CountdownError::Io)?;
        }
        Ok(())
    }
}
