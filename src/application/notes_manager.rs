// src/application/notes_manager.rs
use crate::application::{FailurePolicy, NoteApi, NotesState, NotesView, ObjectStorage, Session};
use crate::domain::{DomainError, Note, NoteForm};
use futures::future::join_all;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

/// Keeps a local snapshot of the note collection in step with the notes API
/// and the image store.
///
/// Operations take `&self` and may overlap. Nothing serialises them, so an
/// overlapping load and delete can publish a view that matches no single
/// server state until the next load.
pub struct NotesManager<A: NoteApi, S: ObjectStorage> {
    api: A,
    storage: S,
    session: Arc<Session>,
    state: NotesState,
    policy: FailurePolicy,
    rollback_deletes: bool,
}

impl<A: NoteApi, S: ObjectStorage> NotesManager<A, S> {
    pub fn new(api: A, storage: S, session: Arc<Session>) -> Self {
        Self {
            api,
            storage,
            session,
            state: NotesState::new(),
            policy: FailurePolicy::default(),
            rollback_deletes: true,
        }
    }

    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Whether a failed remote delete puts the note back into the view
    pub fn with_rollback(mut self, rollback_deletes: bool) -> Self {
        self.rollback_deletes = rollback_deletes;
        self
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn sign_out(&self) {
        self.session.sign_out();
    }

    pub fn snapshot(&self) -> NotesView {
        self.state.snapshot()
    }

    pub fn notes(&self) -> Vec<Note> {
        self.state.notes()
    }

    pub fn subscribe(&self) -> watch::Receiver<NotesView> {
        self.state.subscribe()
    }

    /// Fetch the collection and resolve every image key to a display URL.
    ///
    /// Resolutions run concurrently and the view is published once, after
    /// all of them have settled. A note whose image cannot be resolved is
    /// published without an image.
    #[instrument(level = "debug", skip(self))]
    pub async fn load(&self) -> Result<Vec<Note>, DomainError> {
        let result = self.try_load().await;
        self.settle("load", result, || self.state.notes())
    }

    /// Upload the attachment (if it has content), create the record, reload.
    ///
    /// Returns the record as acknowledged by the API, or `None` when a
    /// failure was absorbed by the failure policy.
    #[instrument(level = "debug", skip(self, form), fields(name = %form.name()))]
    pub async fn create(&self, form: NoteForm) -> Result<Option<Note>, DomainError> {
        let result = self.try_create(form).await.map(Some);
        self.settle("create", result, || None)
    }

    /// Remove the note from the view at once, then from storage and the API.
    ///
    /// Storage removal is attempted whether or not the note has an image.
    /// If the record deletion fails and rollback is enabled, the note is put
    /// back where it was.
    #[instrument(level = "debug", skip(self, note), fields(id = ?note.id, name = %note.name))]
    pub async fn delete(&self, note: &Note) -> Result<(), DomainError> {
        let result = self.try_delete(note).await;
        self.settle("delete", result, || ())
    }

    async fn try_load(&self) -> Result<Vec<Note>, DomainError> {
        self.session.ensure_active()?;
        let listed = self.api.list_notes().await?;
        debug!(count = listed.len(), "Listed notes");

        let resolved = join_all(listed.into_iter().map(|note| self.resolve_image(note))).await;
        self.state.replace_notes(resolved.clone());
        info!(count = resolved.len(), "Loaded notes");
        Ok(resolved)
    }

    async fn resolve_image(&self, mut note: Note) -> Note {
        if !note.has_image() {
            return note;
        }
        match self.storage.get(note.storage_key()).await {
            Ok(url) => note.image = Some(url),
            Err(e) => {
                warn!(name = %note.name, error = %e, "Failed to resolve image, dropping it");
                note.image = None;
            }
        }
        note
    }

    async fn try_create(&self, form: NoteForm) -> Result<Note, DomainError> {
        self.session.ensure_active()?;
        let (input, upload) = form.into_parts();

        // The record must never point at an object that is not stored yet
        if let Some(content) = upload {
            debug!(key = %input.name, bytes = content.len(), "Uploading attachment");
            self.storage.put(&input.name, content).await?;
        }

        let created = self.api.create_note(input).await?;
        info!(id = ?created.id, "Created note");

        self.try_load().await?;
        Ok(created)
    }

    async fn try_delete(&self, note: &Note) -> Result<(), DomainError> {
        self.session.ensure_active()?;
        let id = note
            .id()
            .ok_or_else(|| DomainError::MissingId(note.name.clone()))?;

        let pending = self.state.begin_deletion(id, note);
        debug!(id, index = ?pending.index, "Removed note from view");

        let removed = self.storage.remove(note.storage_key()).await;
        let deleted = self.api.delete_note(id).await;

        match deleted {
            Ok(()) => {
                self.state.confirm_deletion(&pending);
                info!(id, "Deleted note");
                removed
            }
            Err(e) => {
                if self.rollback_deletes {
                    warn!(id, error = %e, "Remote delete failed, restoring note");
                    self.state.rollback_deletion(pending);
                } else {
                    warn!(id, error = %e, "Remote delete failed, view diverges until next load");
                    self.state.confirm_deletion(&pending);
                }
                Err(e)
            }
        }
    }

    fn settle<T>(
        &self,
        operation: &str,
        result: Result<T, DomainError>,
        fallback: impl FnOnce() -> T,
    ) -> Result<T, DomainError> {
        match result {
            Ok(value) => {
                self.state.clear_failure();
                Ok(value)
            }
            Err(e) => {
                warn!(operation, error = %e, policy = ?self.policy, "Operation failed");
                if self.policy.records() {
                    self.state.record_failure(format!("{operation} failed: {e}"));
                }
                if self.policy.returns_error() {
                    Err(e)
                } else {
                    Ok(fallback())
                }
            }
        }
    }
}
