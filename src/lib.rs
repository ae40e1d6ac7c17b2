// src/lib.rs
pub mod application;
pub mod cli;
pub mod constants;
pub mod domain;
pub mod infrastructure;
pub mod ports;
pub mod util;

use crate::cli::args::{Args, Command};
use anyhow::{Context, Result};
use application::{FailurePolicy, NoteApi, NotesManager, ObjectStorage, Session};
use domain::{Attachment, DomainError, NoteForm};
use infrastructure::config::{ApiBackend, StorageBackend};
use infrastructure::{Config, FileNoteApi, FsObjectStorage, GraphQlNoteApi, HttpObjectStorage};
use ports::{HtmlPresenter, TextPresenter};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};
use url::Url;

/// Manager over whichever collaborators the configuration selects
pub type DynNotesManager = NotesManager<Box<dyn NoteApi>, Box<dyn ObjectStorage>>;

pub async fn run(args: Args) -> Result<()> {
    debug!(?args, "Starting cloudnotes with arguments");

    let config = resolve_config(&args)?;
    let session = Arc::new(config.session());
    let manager = build_manager(&config, session.clone())?;
    info!(user = session.user(), "Session started");

    let result = match args.command {
        Command::List { json } => list_notes(&manager, json).await,
        Command::Create {
            name,
            description,
            image,
        } => create_note(&manager, name, description, image.as_deref()).await,
        Command::Delete { note_id } => delete_note(&manager, &note_id).await,
        Command::View => view_notes(&manager).await,
    };

    report_failure(&manager, config.behavior.on_failure);
    manager.sign_out();
    result
}

/// Config file (explicit or default location) overlaid with CLI flags
pub fn resolve_config(args: &Args) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => {
            debug!(?path, "Using provided config path");
            Config::load(path)?
        }
        None => Config::load_or_default()?,
    };
    if let Some(endpoint) = &args.endpoint {
        config.use_endpoint(endpoint);
    }
    if let Some(dir) = &args.store {
        config.use_local_store(dir);
    }
    if let Some(policy) = args.on_failure {
        config.behavior.on_failure = policy;
    }
    Ok(config)
}

pub fn build_manager(config: &Config, session: Arc<Session>) -> Result<DynNotesManager> {
    let api: Box<dyn NoteApi> = match config.api.backend {
        ApiBackend::Graphql => {
            let endpoint = Url::parse(&config.api.endpoint)
                .with_context(|| format!("Invalid GraphQL endpoint: {:?}", config.api.endpoint))?;
            Box::new(GraphQlNoteApi::new(endpoint, session.clone(), config.api.timeout())?)
        }
        ApiBackend::File => Box::new(FileNoteApi::new(&config.api.file)),
    };

    let storage: Box<dyn ObjectStorage> = match config.storage.backend {
        StorageBackend::Http => {
            let base_url = Url::parse(&config.storage.base_url)
                .with_context(|| format!("Invalid storage URL: {:?}", config.storage.base_url))?;
            Box::new(HttpObjectStorage::new(base_url, session.clone(), config.api.timeout())?)
        }
        StorageBackend::Fs => Box::new(FsObjectStorage::new(&config.storage.directory)?),
    };

    Ok(NotesManager::new(api, storage, session)
        .with_failure_policy(config.behavior.on_failure)
        .with_rollback(config.behavior.rollback_deletes))
}

async fn list_notes(manager: &DynNotesManager, json: bool) -> Result<()> {
    let notes = manager.load().await?;
    let presenter = TextPresenter::new();
    if json {
        println!("{}", presenter.render_json(&notes)?);
    } else {
        print!("{}", presenter.render_list(&notes));
    }
    Ok(())
}

async fn create_note(
    manager: &DynNotesManager,
    name: String,
    description: String,
    image: Option<&Path>,
) -> Result<()> {
    let attachment = match image {
        Some(path) => Some(Attachment::from_path(path).await?),
        None => None,
    };
    let form = NoteForm::new(name, description, attachment)?;

    if let Some(note) = manager.create(form).await? {
        info!(id = ?note.id, name = %note.name, "Note created");
    }
    print!("{}", TextPresenter::new().render_list(&manager.notes()));
    Ok(())
}

async fn delete_note(manager: &DynNotesManager, note_id: &str) -> Result<()> {
    let notes = manager.load().await?;
    let note = notes
        .into_iter()
        .find(|n| n.id() == Some(note_id))
        .ok_or_else(|| DomainError::NoteNotFound(note_id.to_string()))?;

    info!(note_id, name = %note.name, "Deleting note");
    manager.delete(&note).await?;
    print!("{}", TextPresenter::new().render_list(&manager.notes()));
    Ok(())
}

async fn view_notes(manager: &DynNotesManager) -> Result<()> {
    manager.load().await?;
    let html = HtmlPresenter::new().render(&manager.snapshot());
    debug!(bytes = html.len(), "Generated HTML");

    let mut renderer = infrastructure::renderer::ContentRenderer::new();
    let temp_path = renderer.create_temp_file(&html)?;
    renderer.open_in_browser(&temp_path).await?;
    Ok(())
}

/// Under the notify policy a failure leaves the command successful, so it is
/// shown here instead.
fn report_failure(manager: &DynNotesManager, policy: FailurePolicy) {
    if policy != FailurePolicy::Notify {
        return;
    }
    if let Some(message) = manager.snapshot().last_failure {
        eprintln!("warning: {message}");
    }
}

#[cfg(test)]
mod tests {
    use crate::util::testing;
    #[ctor::ctor]
    fn init() {
        testing::init_test_setup().expect("Failed to initialize test setup");
    }
}
