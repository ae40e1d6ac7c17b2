// src/util/testing.rs

use anyhow::Result;
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::Notify;
use tracing::{debug, info};
use tracing_subscriber::{
    filter::filter_fn,
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::application::{Credentials, NoteApi, ObjectStorage, Session};
use crate::domain::{DomainError, Note, NoteInput};

/// One collaborator call, as observed by the mocks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    ListNotes,
    CreateNote(NoteInput),
    DeleteNote(String),
    Put(String, Vec<u8>),
    Get(String),
    Remove(String),
}

/// Interaction trace shared by `MockNoteApi` and `MockObjectStorage`.
///
/// Both mocks append to the same trace, so ordering between API and storage
/// calls can be asserted.
#[derive(Debug, Clone, Default)]
pub struct Trace {
    calls: Arc<Mutex<Vec<Call>>>,
}

impl Trace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, call: Call) {
        lock(&self.calls).push(call);
    }

    pub fn calls(&self) -> Vec<Call> {
        lock(&self.calls).clone()
    }

    pub fn position(&self, call: &Call) -> Option<usize> {
        lock(&self.calls).iter().position(|c| c == call)
    }

    pub fn count(&self, predicate: impl Fn(&Call) -> bool) -> usize {
        lock(&self.calls).iter().filter(|c| predicate(c)).count()
    }

    pub fn clear(&self) {
        lock(&self.calls).clear();
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// An active session for tests.
pub fn test_session() -> Arc<Session> {
    Arc::new(Session::new("tester", Credentials::ApiKey("test-key".to_string())))
}

/// In-memory notes API with configurable failures.
///
/// # Examples
///
/// ```
/// use cloudnotes::util::testing::{MockNoteApi, Trace};
/// use cloudnotes::domain::Note;
///
/// let trace = Trace::new();
/// let api = MockNoteApi::builder()
///     .with_trace(&trace)
///     .with_note(Note {
///         id: Some("1".to_string()),
///         name: "a".to_string(),
///         description: "d1".to_string(),
///         image: None,
///     })
///     .build();
/// ```
pub struct MockNoteApi {
    notes: Mutex<Vec<Note>>,
    next_id: AtomicU64,
    fail_list: bool,
    fail_create: bool,
    fail_delete: HashSet<String>,
    trace: Trace,
}

impl MockNoteApi {
    pub fn builder() -> MockNoteApiBuilder {
        MockNoteApiBuilder::new()
    }

    /// Records currently held by the mock backend.
    pub fn stored_notes(&self) -> Vec<Note> {
        lock(&self.notes).clone()
    }
}

#[async_trait]
impl NoteApi for MockNoteApi {
    async fn list_notes(&self) -> Result<Vec<Note>, DomainError> {
        self.trace.record(Call::ListNotes);
        if self.fail_list {
            return Err(DomainError::Api("listNotes failed".to_string()));
        }
        Ok(lock(&self.notes).clone())
    }

    async fn create_note(&self, input: NoteInput) -> Result<Note, DomainError> {
        self.trace.record(Call::CreateNote(input.clone()));
        if self.fail_create {
            return Err(DomainError::Api("createNote failed".to_string()));
        }
        let id = self.next_id.fetch_add(1, Ordering::SeqCst).to_string();
        let note = Note {
            id: Some(id),
            ..Note::from(input)
        };
        lock(&self.notes).push(note.clone());
        Ok(note)
    }

    async fn delete_note(&self, id: &str) -> Result<(), DomainError> {
        self.trace.record(Call::DeleteNote(id.to_string()));
        if self.fail_delete.contains(id) {
            return Err(DomainError::Api(format!("deleteNote failed for {id}")));
        }
        let mut notes = lock(&self.notes);
        let before = notes.len();
        notes.retain(|n| n.id() != Some(id));
        if notes.len() == before {
            return Err(DomainError::NoteNotFound(id.to_string()));
        }
        Ok(())
    }
}

/// Builder for MockNoteApi
pub struct MockNoteApiBuilder {
    notes: Vec<Note>,
    next_id: u64,
    fail_list: bool,
    fail_create: bool,
    fail_delete: HashSet<String>,
    trace: Trace,
}

impl MockNoteApiBuilder {
    pub fn new() -> Self {
        Self {
            notes: vec![],
            next_id: 100,
            fail_list: false,
            fail_create: false,
            fail_delete: HashSet::new(),
            trace: Trace::new(),
        }
    }

    /// Add a record returned by list_notes
    pub fn with_note(mut self, note: Note) -> Self {
        self.notes.push(note);
        self
    }

    pub fn with_trace(mut self, trace: &Trace) -> Self {
        self.trace = trace.clone();
        self
    }

    /// First id handed out by create_note
    pub fn with_next_id(mut self, next_id: u64) -> Self {
        self.next_id = next_id;
        self
    }

    pub fn with_list_failure(mut self) -> Self {
        self.fail_list = true;
        self
    }

    pub fn with_create_failure(mut self) -> Self {
        self.fail_create = true;
        self
    }

    /// Configure delete_note to fail for a specific ID
    pub fn with_delete_failure(mut self, id: &str) -> Self {
        self.fail_delete.insert(id.to_string());
        self
    }

    pub fn build(self) -> MockNoteApi {
        MockNoteApi {
            notes: Mutex::new(self.notes),
            next_id: AtomicU64::new(self.next_id),
            fail_list: self.fail_list,
            fail_create: self.fail_create,
            fail_delete: self.fail_delete,
            trace: self.trace,
        }
    }
}

impl Default for MockNoteApiBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// In-memory object storage.
///
/// `get` answers with a configured URL, or `https://storage.test/{key}` when
/// none was configured. `remove` can be held back on a `Notify` gate to
/// observe state while a deletion is in flight.
pub struct MockObjectStorage {
    objects: Mutex<HashMap<String, Vec<u8>>>,
    urls: HashMap<String, String>,
    fail_put: bool,
    fail_get: HashSet<String>,
    fail_remove: bool,
    remove_gate: Option<Arc<Notify>>,
    trace: Trace,
}

impl MockObjectStorage {
    pub fn builder() -> MockObjectStorageBuilder {
        MockObjectStorageBuilder::new()
    }

    pub fn object(&self, key: &str) -> Option<Vec<u8>> {
        lock(&self.objects).get(key).cloned()
    }
}

#[async_trait]
impl ObjectStorage for MockObjectStorage {
    async fn put(&self, key: &str, content: Vec<u8>) -> Result<(), DomainError> {
        self.trace.record(Call::Put(key.to_string(), content.clone()));
        if self.fail_put {
            return Err(DomainError::Storage(format!("put failed for {key}")));
        }
        lock(&self.objects).insert(key.to_string(), content);
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<String, DomainError> {
        self.trace.record(Call::Get(key.to_string()));
        if self.fail_get.contains(key) {
            return Err(DomainError::Storage(format!("get failed for {key}")));
        }
        Ok(self
            .urls
            .get(key)
            .cloned()
            .unwrap_or_else(|| format!("https://storage.test/{key}")))
    }

    async fn remove(&self, key: &str) -> Result<(), DomainError> {
        self.trace.record(Call::Remove(key.to_string()));
        if let Some(gate) = &self.remove_gate {
            gate.notified().await;
        }
        if self.fail_remove {
            return Err(DomainError::Storage(format!("remove failed for {key}")));
        }
        lock(&self.objects).remove(key);
        Ok(())
    }
}

/// Builder for MockObjectStorage
pub struct MockObjectStorageBuilder {
    objects: HashMap<String, Vec<u8>>,
    urls: HashMap<String, String>,
    fail_put: bool,
    fail_get: HashSet<String>,
    fail_remove: bool,
    remove_gate: Option<Arc<Notify>>,
    trace: Trace,
}

impl MockObjectStorageBuilder {
    pub fn new() -> Self {
        Self {
            objects: HashMap::new(),
            urls: HashMap::new(),
            fail_put: false,
            fail_get: HashSet::new(),
            fail_remove: false,
            remove_gate: None,
            trace: Trace::new(),
        }
    }

    pub fn with_trace(mut self, trace: &Trace) -> Self {
        self.trace = trace.clone();
        self
    }

    pub fn with_object(mut self, key: &str, content: Vec<u8>) -> Self {
        self.objects.insert(key.to_string(), content);
        self
    }

    /// Configure the URL get returns for a key
    pub fn with_url(mut self, key: &str, url: &str) -> Self {
        self.urls.insert(key.to_string(), url.to_string());
        self
    }

    pub fn with_put_failure(mut self) -> Self {
        self.fail_put = true;
        self
    }

    pub fn with_get_failure(mut self, key: &str) -> Self {
        self.fail_get.insert(key.to_string());
        self
    }

    pub fn with_remove_failure(mut self) -> Self {
        self.fail_remove = true;
        self
    }

    /// Hold remove until the gate is notified
    pub fn with_remove_gate(mut self, gate: Arc<Notify>) -> Self {
        self.remove_gate = Some(gate);
        self
    }

    pub fn build(self) -> MockObjectStorage {
        MockObjectStorage {
            objects: Mutex::new(self.objects),
            urls: self.urls,
            fail_put: self.fail_put,
            fail_get: self.fail_get,
            fail_remove: self.fail_remove,
            remove_gate: self.remove_gate,
            trace: self.trace,
        }
    }
}

impl Default for MockObjectStorageBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn init_test_setup() -> Result<()> {
    // Set up logging first
    setup_test_logging();

    info!("Test Setup complete");
    Ok(())
}

fn setup_test_logging() {
    debug!("INIT: Attempting logger init from testing.rs");

    // Create a filter for noisy modules
    let noisy_modules = ["hyper", "reqwest", "mio", "want"];
    let module_filter = filter_fn(move |metadata| {
        !noisy_modules
            .iter()
            .any(|name| metadata.target().starts_with(name))
    });

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(module_filter)
            .with_filter(env_filter),
    );

    // Only set if we haven't already set a global subscriber
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else {
        subscriber.try_init().unwrap_or_else(|e| {
            eprintln!("Error: Failed to set up logging: {}", e);
        });
    }
}
