// src/infrastructure/fs_storage.rs
use crate::application::ObjectStorage;
use crate::domain::DomainError;
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};
use url::Url;

/// Object store kept in a local directory, one file per key.
#[derive(Debug)]
pub struct FsObjectStorage {
    root: PathBuf,
}

impl FsObjectStorage {
    pub fn new<P: AsRef<Path>>(root: P) -> Result<Self, DomainError> {
        let root = root.as_ref();
        std::fs::create_dir_all(root).map_err(|e| {
            DomainError::Config(format!(
                "Failed to create storage directory {}: {}",
                root.display(),
                e
            ))
        })?;
        let root = root.canonicalize().map_err(|e| {
            DomainError::Config(format!("Failed to resolve {}: {}", root.display(), e))
        })?;
        info!(?root, "Using local object storage");
        Ok(Self { root })
    }

    fn object_path(&self, key: &str) -> Result<PathBuf, DomainError> {
        validate_key(key)?;
        Ok(self.root.join(key))
    }
}

/// Keys become file names, so they must stay inside the root.
fn validate_key(key: &str) -> Result<(), DomainError> {
    let invalid = key.is_empty()
        || key == "."
        || key == ".."
        || key.contains(['/', '\\', '\0']);
    if invalid {
        Err(DomainError::InvalidKey(key.to_string()))
    } else {
        Ok(())
    }
}

#[async_trait]
impl ObjectStorage for FsObjectStorage {
    #[instrument(level = "debug", skip(self, content), fields(bytes = content.len()))]
    async fn put(&self, key: &str, content: Vec<u8>) -> Result<(), DomainError> {
        let path = self.object_path(key)?;
        tokio::fs::write(&path, content)
            .await
            .map_err(|e| DomainError::Storage(format!("Failed to write {}: {}", path.display(), e)))
    }

    async fn get(&self, key: &str) -> Result<String, DomainError> {
        let path = self.object_path(key)?;
        if !tokio::fs::try_exists(&path).await.unwrap_or(false) {
            return Err(DomainError::Storage(format!("No object stored under {}", key)));
        }
        Url::from_file_path(&path)
            .map(|url| url.to_string())
            .map_err(|_| DomainError::Storage(format!("Not a file URL: {}", path.display())))
    }

    #[instrument(level = "debug", skip(self))]
    async fn remove(&self, key: &str) -> Result<(), DomainError> {
        // put refuses such keys, so nothing can be stored under them
        if validate_key(key).is_err() {
            debug!(key, "Key cannot name a stored object");
            return Ok(());
        }
        let path = self.object_path(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(key, "Object was already absent");
                Ok(())
            }
            Err(e) => Err(DomainError::Storage(format!(
                "Failed to remove {}: {}",
                path.display(),
                e
            ))),
        }
    }
}
