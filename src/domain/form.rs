// src/domain/form.rs
use crate::domain::{DomainError, NoteInput};
use std::path::Path;

/// A file attached to the create form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub file_name: String,
    pub content: Vec<u8>,
}

impl Attachment {
    pub fn new(file_name: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content,
        }
    }

    /// Read an attachment from disk, naming it after the file.
    pub async fn from_path(path: &Path) -> Result<Self, DomainError> {
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| DomainError::InvalidInput(format!("Not a file: {}", path.display())))?
            .to_string();
        let content = tokio::fs::read(path).await.map_err(|e| {
            DomainError::InvalidInput(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Ok(Self { file_name, content })
    }
}

/// The create form: two required text fields and an optional `image` file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteForm {
    name: String,
    description: String,
    attachment: Option<Attachment>,
}

impl NoteForm {
    /// Build a form, rejecting blank required fields.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        attachment: Option<Attachment>,
    ) -> Result<Self, DomainError> {
        let name = name.into();
        let description = description.into();
        if name.trim().is_empty() {
            return Err(DomainError::InvalidInput("name is required".to_string()));
        }
        if description.trim().is_empty() {
            return Err(DomainError::InvalidInput(
                "description is required".to_string(),
            ));
        }
        Ok(Self {
            name,
            description,
            attachment,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Split into the record payload and the bytes to upload, if any.
    ///
    /// The image field carries the attachment's file name even when the
    /// content is empty; only non-empty content is returned for upload.
    pub fn into_parts(self) -> (NoteInput, Option<Vec<u8>>) {
        let (image, upload) = match self.attachment {
            Some(attachment) => {
                let upload = (!attachment.content.is_empty()).then_some(attachment.content);
                (Some(attachment.file_name), upload)
            }
            None => (None, None),
        };
        (
            NoteInput {
                name: self.name,
                description: self.description,
                image,
            },
            upload,
        )
    }
}
