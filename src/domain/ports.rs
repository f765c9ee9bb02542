use crate::utils::error::Result;
use std::path::Path;

/// Where documents are read from and written to.
pub trait Storage {
    fn read_file(&self, path: &Path) -> Result<Vec<u8>>;
    fn write_file(&self, path: &Path, data: &[u8]) -> Result<()>;

    /// Creates the directories above `path`. Only called when a save asks for it.
    fn create_parent_dirs(&self, _path: &Path) -> Result<()> {
        Ok(())
    }
}
