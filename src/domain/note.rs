// src/domain/note.rs
use serde::{Deserialize, Serialize};

/// A note as returned by the notes API.
///
/// `image` holds the storage key on the wire. Once the note has passed through
/// `NotesManager::load` it holds a display URL instead; the remote record
/// keeps the key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub image: Option<String>,
}

impl Note {
    /// True when `image` is set and non-empty.
    pub fn has_image(&self) -> bool {
        self.image.as_deref().is_some_and(|image| !image.is_empty())
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Key the note's image is stored under.
    pub fn storage_key(&self) -> &str {
        &self.name
    }
}

/// Payload of the create operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteInput {
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl From<NoteInput> for Note {
    fn from(input: NoteInput) -> Self {
        Self {
            id: None,
            name: input.name,
            description: input.description,
            image: input.image,
        }
    }
}
