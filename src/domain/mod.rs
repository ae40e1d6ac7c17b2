// src/domain/mod.rs
pub mod error;
pub mod form;
pub mod note;

pub use error::DomainError;
pub use form::{Attachment, NoteForm};
pub use note::{Note, NoteInput};
