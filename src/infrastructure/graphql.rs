// src/infrastructure/graphql.rs
use crate::application::{NoteApi, Session};
use crate::domain::{DomainError, Note, NoteInput};
use crate::infrastructure::auth::{authorize, http_client};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

pub const LIST_NOTES: &str = "query ListNotes {
  listNotes {
    items { id name description image }
  }
}";

pub const CREATE_NOTE: &str = "mutation CreateNote($input: CreateNoteInput!) {
  createNote(input: $input) { id name description image }
}";

pub const DELETE_NOTE: &str = "mutation DeleteNote($input: DeleteNoteInput!) {
  deleteNote(input: $input) { id }
}";

#[derive(Debug, Serialize)]
struct GraphQlRequest<'a> {
    query: &'a str,
    variables: Value,
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

impl<T> GraphQlResponse<T> {
    fn into_data(self) -> Result<T, DomainError> {
        if !self.errors.is_empty() {
            let messages: Vec<_> = self.errors.into_iter().map(|e| e.message).collect();
            return Err(DomainError::Api(messages.join("; ")));
        }
        self.data
            .ok_or_else(|| DomainError::Api("Response carried no data".to_string()))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListNotesData {
    list_notes: Option<NoteConnection>,
}

#[derive(Debug, Deserialize)]
struct NoteConnection {
    #[serde(default)]
    items: Vec<Option<Note>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateNoteData {
    create_note: Option<Note>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeleteNoteData {
    delete_note: Option<Value>,
}

/// Notes API spoken over GraphQL (`listNotes`, `createNote`, `deleteNote`).
pub struct GraphQlNoteApi {
    client: reqwest::Client,
    endpoint: Url,
    session: Arc<Session>,
}

impl GraphQlNoteApi {
    pub fn new(endpoint: Url, session: Arc<Session>, timeout: Duration) -> Result<Self, DomainError> {
        let client = http_client(timeout)
            .map_err(|e| DomainError::Config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            endpoint,
            session,
        })
    }

    async fn execute<T: DeserializeOwned>(&self, query: &str, variables: Value) -> Result<T, DomainError> {
        let credentials = self.session.credentials()?;
        let request = self
            .client
            .post(self.endpoint.clone())
            .json(&GraphQlRequest { query, variables });

        let response = authorize(request, credentials)
            .send()
            .await
            .map_err(|e| DomainError::Api(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DomainError::Api(format!("HTTP {}: {}", status, body.trim())));
        }

        let body = response
            .text()
            .await
            .map_err(|e| DomainError::Api(format!("Failed to read response: {}", e)))?;
        decode(&body)
    }
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, DomainError> {
    let envelope: GraphQlResponse<T> = serde_json::from_str(body)
        .map_err(|e| DomainError::Api(format!("Malformed response: {}", e)))?;
    envelope.into_data()
}

fn list_items(data: ListNotesData) -> Vec<Note> {
    data.list_notes
        .map(|connection| connection.items.into_iter().flatten().collect())
        .unwrap_or_default()
}

#[async_trait]
impl NoteApi for GraphQlNoteApi {
    #[instrument(level = "debug", skip(self))]
    async fn list_notes(&self) -> Result<Vec<Note>, DomainError> {
        let data: ListNotesData = self.execute(LIST_NOTES, json!({})).await?;
        let notes = list_items(data);
        debug!(count = notes.len(), "listNotes returned");
        Ok(notes)
    }

    #[instrument(level = "debug", skip(self))]
    async fn create_note(&self, input: NoteInput) -> Result<Note, DomainError> {
        let data: CreateNoteData = self
            .execute(CREATE_NOTE, json!({ "input": input }))
            .await?;
        data.create_note
            .ok_or_else(|| DomainError::Api("createNote returned null".to_string()))
    }

    #[instrument(level = "debug", skip(self))]
    async fn delete_note(&self, id: &str) -> Result<(), DomainError> {
        let data: DeleteNoteData = self
            .execute(DELETE_NOTE, json!({ "input": { "id": id } }))
            .await?;
        match data.delete_note {
            Some(_) => Ok(()),
            None => Err(DomainError::NoteNotFound(id.to_string())),
        }
    }
}
