// src/application/ports.rs
use crate::domain::{DomainError, Note, NoteInput};
use async_trait::async_trait;

/// The structured-query API that owns the note records.
#[async_trait]
pub trait NoteApi: Send + Sync {
    /// Fetch the whole collection, in the order the backend lists it.
    async fn list_notes(&self) -> Result<Vec<Note>, DomainError>;

    async fn create_note(&self, input: NoteInput) -> Result<Note, DomainError>;

    async fn delete_note(&self, id: &str) -> Result<(), DomainError>;
}

/// Object storage holding note images, addressed by note name.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    async fn put(&self, key: &str, content: Vec<u8>) -> Result<(), DomainError>;

    /// Return a URL the object can be displayed from.
    async fn get(&self, key: &str) -> Result<String, DomainError>;

    /// Remove the object. Removing a key that holds nothing is not an error.
    async fn remove(&self, key: &str) -> Result<(), DomainError>;
}

#[async_trait]
impl<T: NoteApi + ?Sized> NoteApi for Box<T> {
    async fn list_notes(&self) -> Result<Vec<Note>, DomainError> {
        (**self).list_notes().await
    }

    async fn create_note(&self, input: NoteInput) -> Result<Note, DomainError> {
        (**self).create_note(input).await
    }

    async fn delete_note(&self, id: &str) -> Result<(), DomainError> {
        (**self).delete_note(id).await
    }
}

#[async_trait]
impl<T: ObjectStorage + ?Sized> ObjectStorage for Box<T> {
    async fn put(&self, key: &str, content: Vec<u8>) -> Result<(), DomainError> {
        (**self).put(key, content).await
    }

    async fn get(&self, key: &str) -> Result<String, DomainError> {
        (**self).get(key).await
    }

    async fn remove(&self, key: &str) -> Result<(), DomainError> {
        (**self).remove(key).await
    }
}
