// src/application/state.rs
use crate::domain::Note;
use serde::Serialize;
use tokio::sync::watch;
use tracing::trace;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    #[default]
    Uninitialized,
    Populated,
}

/// What a rendering layer sees. Every change is published as a whole.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NotesView {
    pub phase: Phase,
    pub notes: Vec<Note>,
    /// Ids removed locally whose remote deletion has not completed yet
    pub pending_deletions: Vec<String>,
    pub last_failure: Option<String>,
}

/// A note taken out of the view ahead of remote confirmation.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingDeletion {
    pub id: String,
    pub note: Note,
    /// Position the note had, `None` if it was not in the view
    pub index: Option<usize>,
}

/// Owned container for the note collection.
///
/// Backed by a `watch` channel: readers either take a snapshot or subscribe
/// and get notified after each publish.
#[derive(Debug)]
pub struct NotesState {
    tx: watch::Sender<NotesView>,
}

impl NotesState {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(NotesView::default());
        Self { tx }
    }

    pub fn subscribe(&self) -> watch::Receiver<NotesView> {
        self.tx.subscribe()
    }

    pub fn snapshot(&self) -> NotesView {
        self.tx.borrow().clone()
    }

    pub fn notes(&self) -> Vec<Note> {
        self.tx.borrow().notes.clone()
    }

    /// Replace the whole collection in one publish.
    pub fn replace_notes(&self, notes: Vec<Note>) {
        trace!(count = notes.len(), "Publishing note collection");
        self.tx.send_modify(|view| {
            view.notes = notes;
            view.phase = Phase::Populated;
        });
    }

    pub fn begin_deletion(&self, id: &str, note: &Note) -> PendingDeletion {
        let mut index = None;
        self.tx.send_modify(|view| {
            index = view.notes.iter().position(|n| n.id() == Some(id));
            view.notes.retain(|n| n.id() != Some(id));
            view.pending_deletions.push(id.to_string());
        });
        PendingDeletion {
            id: id.to_string(),
            note: note.clone(),
            index,
        }
    }

    pub fn confirm_deletion(&self, pending: &PendingDeletion) {
        self.tx.send_modify(|view| remove_pending(view, &pending.id));
    }

    /// Undo an optimistic removal.
    ///
    /// The note goes back to its former position, clamped to the current
    /// length. Nothing is inserted if the note was never in the view or a
    /// reload already brought it back.
    pub fn rollback_deletion(&self, pending: PendingDeletion) {
        self.tx.send_modify(|view| {
            remove_pending(view, &pending.id);
            let Some(index) = pending.index else {
                return;
            };
            if view.notes.iter().any(|n| n.id() == Some(pending.id.as_str())) {
                return;
            }
            let index = index.min(view.notes.len());
            view.notes.insert(index, pending.note);
        });
    }

    pub fn record_failure(&self, message: String) {
        self.tx.send_modify(|view| view.last_failure = Some(message));
    }

    pub fn clear_failure(&self) {
        self.tx.send_if_modified(|view| view.last_failure.take().is_some());
    }
}

impl Default for NotesState {
    fn default() -> Self {
        Self::new()
    }
}

fn remove_pending(view: &mut NotesView, id: &str) {
    if let Some(pos) = view.pending_deletions.iter().position(|p| p == id) {
        view.pending_deletions.remove(pos);
    }
}
