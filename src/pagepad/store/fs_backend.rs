use super::StorageBackend;
use crate::error::{PageError, Result};
use crate::model::COLLECTION_KEY;
use std::fs;
use std::path::PathBuf;
use uuid::Uuid;

const COLLECTION_FILENAME: &str = "pages.json";

/// File-per-key storage rooted at a single data directory.
pub struct FsBackend {
    root: PathBuf,
    file_ext: String,
}

impl FsBackend {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            file_ext: ".txt".to_string(),
        }
    }

    pub fn with_file_ext(mut self, ext: &str) -> Self {
        if ext.starts_with('.') {
            self.file_ext = ext.to_string();
        } else {
            self.file_ext = format!(".{}", ext);
        }
        self
    }

    pub fn file_ext(&self) -> &str {
        &self.file_ext
    }

    /// File backing `key`. Keys map straight onto file names, so anything that
    /// could escape the data directory is refused.
    pub fn item_path(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(PageError::Store(format!("Invalid storage key: {:?}", key)));
        }

        if key == COLLECTION_KEY {
            Ok(self.root.join(COLLECTION_FILENAME))
        } else {
            Ok(self.root.join(format!("{}{}", key, self.file_ext)))
        }
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(PageError::Io)?;
        }
        Ok(())
    }
}

impl StorageBackend for FsBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let path = self.item_path(key)?;
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path).map_err(PageError::Io)?;
        Ok(Some(content))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let target = self.item_path(key)?;
        self.ensure_dir()?;

        // Atomic write
        let tmp = self.root.join(format!(".{}-{}.tmp", key, Uuid::new_v4()));
        fs::write(&tmp, value).map_err(PageError::Io)?;
        fs::rename(&tmp, target).map_err(PageError::Io)?;

        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        let path = self.item_path(key)?;
        if path.exists() {
            fs::remove_file(path).map_err(PageError::Io)?;
        }
        Ok(())
    }
}
