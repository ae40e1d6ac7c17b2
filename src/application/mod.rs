// src/application/mod.rs
pub mod failure;
pub mod notes_manager;
pub mod ports;
pub mod session;
pub mod state;

pub use failure::FailurePolicy;
pub use notes_manager::NotesManager;
pub use ports::{NoteApi, ObjectStorage};
pub use session::{Credentials, Session};
pub use state::{NotesState, NotesView, Phase};
