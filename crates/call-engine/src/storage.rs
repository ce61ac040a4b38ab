//! Blob storage for finished capture files

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{EngineError, Result};

/// Destination for finished capture files
pub trait BlobStorage: Send + Sync {
    /// Keep a copy of `path`
    fn store(&self, path: &Path) -> Result<()>;
}

/// Storage that discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullStorage;

impl BlobStorage for NullStorage {
    fn store(&self, _path: &Path) -> Result<()> {
        Ok(())
    }
}

/// Copies capture files into `<root>/<stack>-captures/`
#[derive(Debug, Clone)]
pub struct DirectoryStorage {
    bucket: PathBuf,
}

impl DirectoryStorage {
    /// Create the storage, making the bucket directory if needed
    pub fn new(root: impl AsRef<Path>, stack_name: &str) -> Result<Self> {
        if stack_name.is_empty() {
            return Err(EngineError::InvalidConfig("stack name must not be empty".into()));
        }
        let bucket = root.as_ref().join(format!("{}-captures", stack_name));
        fs::create_dir_all(&bucket)?;
        Ok(Self { bucket })
    }

    /// Directory the files are copied into
    pub fn bucket(&self) -> &Path {
        &self.bucket
    }
}

impl BlobStorage for DirectoryStorage {
    fn store(&self, path: &Path) -> Result<()> {
        let file_name = path.file_name().ok_or_else(|| {
            EngineError::InvalidConfig(format!("{} has no file name", path.display()))
        })?;
        let target = self.bucket.join(file_name);
        let bytes = fs::copy(path, &target)?;
        info!("Stored {} ({} bytes) as {}", path.display(), bytes, target.display());
        Ok(())
    }
}
