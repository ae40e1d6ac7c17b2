use anyhow::{Context, Result};
use cloudnotes::application::{Credentials, NotesManager, Session};
use cloudnotes::infrastructure::{FileNoteApi, FsObjectStorage};
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

pub type LocalManager = NotesManager<FileNoteApi, FsObjectStorage>;

/// Test fixture: a note file and an image directory in a temporary location
#[allow(dead_code)]
pub struct TestStore {
    _temp_dir: TempDir,
    pub notes_file: PathBuf,
    pub images_dir: PathBuf,
}

#[allow(dead_code)]
impl TestStore {
    pub fn new() -> Result<Self> {
        let temp_dir = tempfile::tempdir().context("Failed to create temporary directory")?;
        let notes_file = temp_dir.path().join("notes.json");
        let images_dir = temp_dir.path().join("images");

        Ok(Self {
            _temp_dir: temp_dir,
            notes_file,
            images_dir,
        })
    }

    /// Seed the note file with raw JSON records
    pub fn with_records(self, json: &str) -> Result<Self> {
        std::fs::write(&self.notes_file, json).context("Failed to seed note file")?;
        Ok(self)
    }

    /// Seed an image object
    pub fn with_image(self, key: &str, content: &[u8]) -> Result<Self> {
        std::fs::create_dir_all(&self.images_dir)?;
        std::fs::write(self.images_dir.join(key), content).context("Failed to seed image")?;
        Ok(self)
    }

    pub fn session() -> Arc<Session> {
        Arc::new(Session::new("tester", Credentials::Anonymous))
    }

    /// Manager over the file-backed collaborators of this store
    pub fn open_manager(&self) -> Result<LocalManager> {
        let api = FileNoteApi::new(&self.notes_file);
        let storage = FsObjectStorage::new(&self.images_dir)?;
        Ok(NotesManager::new(api, storage, Self::session()))
    }

    pub fn root(&self) -> PathBuf {
        self._temp_dir.path().to_path_buf()
    }
}

/// Records used across tests
#[allow(dead_code)]
pub mod records {
    pub const PLAIN: &str = r#"[{"id":"1","name":"a","description":"d1","image":""}]"#;
    pub const WITH_IMAGE: &str = r#"[{"id":"2","name":"b","description":"d2","image":"b.png"}]"#;
    pub const MIXED: &str = r#"[
        {"id":"1","name":"a","description":"d1","image":""},
        {"id":"2","name":"b","description":"d2","image":"b.png"},
        {"id":"3","name":"c","description":"d3"}
    ]"#;
}
