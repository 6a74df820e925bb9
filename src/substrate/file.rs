use crate::core::{Result, StoreError};
use crate::model::{SNAPSHOT_VERSION, StoreSnapshot};
use crate::substrate::DurableSubstrate;
use async_trait::async_trait;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// File-backed substrate: one MessagePack snapshot file, replaced atomically
/// on every flush (write to a temp file in the same directory, fsync,
/// rename). A crash mid-flush leaves the previous snapshot intact.
pub struct FileSubstrate {
    snapshot_path: PathBuf,
}

impl FileSubstrate {
    pub fn new<P: AsRef<Path>>(snapshot_path: P) -> Self {
        Self {
            snapshot_path: snapshot_path.as_ref().to_path_buf(),
        }
    }

    pub fn exists(&self) -> bool {
        self.snapshot_path.exists()
    }
}

#[async_trait]
impl DurableSubstrate for FileSubstrate {
    async fn load(&self) -> Result<Option<StoreSnapshot>> {
        if !self.snapshot_path.exists() {
            return Ok(None);
        }
        let data = fs::read(&self.snapshot_path)?;
        let snapshot: StoreSnapshot = rmp_serde::from_slice(&data)?;
        if snapshot.version > SNAPSHOT_VERSION {
            return Err(StoreError::Storage(format!(
                "snapshot version {} is newer than supported version {}",
                snapshot.version, SNAPSHOT_VERSION
            )));
        }
        Ok(Some(snapshot))
    }

    async fn store(&self, snapshot: &StoreSnapshot) -> Result<()> {
        let parent = match self.snapshot_path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&parent)?;

        let serialized = rmp_serde::to_vec_named(snapshot)?;
        // Temp file in the target directory so the rename stays on one
        // filesystem and is atomic.
        let mut temp = tempfile::NamedTempFile::new_in(&parent)?;
        temp.write_all(&serialized)?;
        temp.flush()?;
        temp.as_file().sync_all()?;
        temp.persist(&self.snapshot_path)
            .map_err(|e| StoreError::Storage(format!("failed to replace snapshot: {}", e)))?;
        Ok(())
    }
}
