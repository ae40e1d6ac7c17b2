// src/infrastructure/file_api.rs
use crate::application::NoteApi;
use crate::domain::{DomainError, Note, NoteInput};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::{debug, instrument};
use uuid::Uuid;

/// Notes API backed by a JSON file holding the records in listing order.
///
/// A missing or empty file is an empty collection. Writes are serialised
/// through a mutex so concurrent creates and deletes do not lose records.
#[derive(Debug)]
pub struct FileNoteApi {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileNoteApi {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read(&self) -> Result<Vec<Note>, DomainError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(vec![]),
            Err(e) => {
                return Err(DomainError::Api(format!(
                    "Failed to read {}: {}",
                    self.path.display(),
                    e
                )))
            }
        };
        if content.trim().is_empty() {
            return Ok(vec![]);
        }
        serde_json::from_str(&content).map_err(|e| {
            DomainError::Api(format!("Corrupt note file {}: {}", self.path.display(), e))
        })
    }

    async fn write(&self, notes: &[Note]) -> Result<(), DomainError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                DomainError::Api(format!("Failed to create {}: {}", parent.display(), e))
            })?;
        }
        let json = serde_json::to_string_pretty(notes)
            .map_err(|e| DomainError::Api(format!("Failed to serialize notes: {}", e)))?;
        tokio::fs::write(&self.path, json).await.map_err(|e| {
            DomainError::Api(format!("Failed to write {}: {}", self.path.display(), e))
        })
    }
}

#[async_trait]
impl NoteApi for FileNoteApi {
    #[instrument(level = "debug", skip(self))]
    async fn list_notes(&self) -> Result<Vec<Note>, DomainError> {
        self.read().await
    }

    #[instrument(level = "debug", skip(self))]
    async fn create_note(&self, input: NoteInput) -> Result<Note, DomainError> {
        let _guard = self.write_lock.lock().await;
        let mut notes = self.read().await?;
        let note = Note {
            id: Some(Uuid::new_v4().to_string()),
            ..Note::from(input)
        };
        notes.push(note.clone());
        self.write(&notes).await?;
        debug!(id = ?note.id, "Stored note");
        Ok(note)
    }

    #[instrument(level = "debug", skip(self))]
    async fn delete_note(&self, id: &str) -> Result<(), DomainError> {
        let _guard = self.write_lock.lock().await;
        let mut notes = self.read().await?;
        let before = notes.len();
        notes.retain(|n| n.id() != Some(id));
        if notes.len() == before {
            return Err(DomainError::NoteNotFound(id.to_string()));
        }
        self.write(&notes).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn given_missing_file_when_listing_then_returns_empty() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let api = FileNoteApi::new(dir.path().join("notes.json"));

        assert_eq!(api.list_notes().await, Ok(vec![]));
    }

    #[tokio::test]
    async fn given_corrupt_file_when_listing_then_returns_api_error() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("notes.json");
        std::fs::write(&path, "{not json").expect("Failed to write file");
        let api = FileNoteApi::new(&path);

        assert!(matches!(api.list_notes().await, Err(DomainError::Api(_))));
    }
}
