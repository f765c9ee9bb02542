use crate::domain::ports::Storage;
use crate::utils::error::{Result, UsfError};
use std::fs;
use std::path::{Path, PathBuf};

/// File system storage. Relative paths resolve against `base_path`
/// when one is set, otherwise against the working directory.
#[derive(Debug, Clone, Default)]
pub struct LocalStorage {
    base_path: Option<PathBuf>,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: Some(base_path.into()),
        }
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        match &self.base_path {
            Some(base) => base.join(path),
            None => path.to_path_buf(),
        }
    }
}

impl Storage for LocalStorage {
    fn read_file(&self, path: &Path) -> Result<Vec<u8>> {
        let full_path = self.resolve(path);
        fs::read(&full_path).map_err(|e| UsfError::io(full_path, e))
    }

    fn write_file(&self, path: &Path, data: &[u8]) -> Result<()> {
        let full_path = self.resolve(path);
        fs::write(&full_path, data).map_err(|e| UsfError::io(full_path, e))
    }

    fn create_parent_dirs(&self, path: &Path) -> Result<()> {
        let full_path = self.resolve(path);

        if let Some(parent) = full_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| UsfError::io(parent, e))?;
            }
        }
        Ok(())
    }
}
