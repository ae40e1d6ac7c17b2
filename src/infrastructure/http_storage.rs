// src/infrastructure/http_storage.rs
use crate::application::{ObjectStorage, Session};
use crate::domain::DomainError;
use crate::infrastructure::auth::{authorize, http_client};
use async_trait::async_trait;
use reqwest::StatusCode;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

/// Object store reached over plain HTTP verbs below a base URL.
pub struct HttpObjectStorage {
    client: reqwest::Client,
    base_url: Url,
    session: Arc<Session>,
}

impl HttpObjectStorage {
    pub fn new(base_url: Url, session: Arc<Session>, timeout: Duration) -> Result<Self, DomainError> {
        if base_url.cannot_be_a_base() {
            return Err(DomainError::Config(format!(
                "Storage URL cannot hold object paths: {}",
                base_url
            )));
        }
        let client = http_client(timeout)
            .map_err(|e| DomainError::Config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            base_url,
            session,
        })
    }

    /// URL of the object stored under `key`, key percent-encoded as one segment.
    ///
    /// Dot segments are refused: the URL path would collapse them onto the
    /// storage root.
    pub fn object_url(&self, key: &str) -> Result<Url, DomainError> {
        if key.is_empty() || key == "." || key == ".." {
            return Err(DomainError::InvalidKey(key.to_string()));
        }
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| DomainError::InvalidKey(key.to_string()))?
            .pop_if_empty()
            .push(key);
        Ok(url)
    }
}

#[async_trait]
impl ObjectStorage for HttpObjectStorage {
    #[instrument(level = "debug", skip(self, content), fields(bytes = content.len()))]
    async fn put(&self, key: &str, content: Vec<u8>) -> Result<(), DomainError> {
        let url = self.object_url(key)?;
        let request = self
            .client
            .put(url)
            .header(reqwest::header::CONTENT_TYPE, "application/octet-stream")
            .body(content);

        let response = authorize(request, self.session.credentials()?)
            .send()
            .await
            .map_err(|e| DomainError::Storage(format!("Upload of {} failed: {}", key, e)))?;

        if !response.status().is_success() {
            return Err(DomainError::Storage(format!(
                "Upload of {} rejected: HTTP {}",
                key,
                response.status()
            )));
        }
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<String, DomainError> {
        self.session.ensure_active()?;
        Ok(self.object_url(key)?.to_string())
    }

    #[instrument(level = "debug", skip(self))]
    async fn remove(&self, key: &str) -> Result<(), DomainError> {
        let url = match self.object_url(key) {
            Ok(url) => url,
            // put refuses such keys, and a DELETE would hit the base URL
            Err(DomainError::InvalidKey(_)) => {
                debug!(key, "Key cannot name a stored object");
                return Ok(());
            }
            Err(e) => return Err(e),
        };
        let request = self.client.delete(url);

        let response = authorize(request, self.session.credentials()?)
            .send()
            .await
            .map_err(|e| DomainError::Storage(format!("Removal of {} failed: {}", key, e)))?;

        match response.status() {
            status if status.is_success() => Ok(()),
            StatusCode::NOT_FOUND => {
                debug!(key, "Object was already absent");
                Ok(())
            }
            status => Err(DomainError::Storage(format!(
                "Removal of {} rejected: HTTP {}",
                key, status
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::testing::test_session;
    use rstest::rstest;

    fn storage(base: &str) -> HttpObjectStorage {
        HttpObjectStorage::new(
            Url::parse(base).expect("valid url"),
            test_session(),
            Duration::from_secs(1),
        )
        .expect("Storage should build")
    }

    #[rstest]
    #[case("https://bucket.test/public", "b", "https://bucket.test/public/b")]
    #[case("https://bucket.test/public/", "b", "https://bucket.test/public/b")]
    #[case("https://bucket.test/", "my note", "https://bucket.test/my%20note")]
    #[case("https://bucket.test/", "a/b", "https://bucket.test/a%2Fb")]
    fn test_object_url(#[case] base: &str, #[case] key: &str, #[case] expected: &str) {
        let url = storage(base).object_url(key).expect("Should build url");
        assert_eq!(url.as_str(), expected);
    }

    #[rstest]
    #[case("https://bucket.test/public/", "")]
    #[case("https://bucket.test/public/", ".")]
    #[case("https://bucket.test/public/", "..")]
    #[case("https://bucket.test/public", "..")]
    fn test_object_url_rejects_root_aliases(#[case] base: &str, #[case] key: &str) {
        let result = storage(base).object_url(key);
        assert_eq!(result, Err(DomainError::InvalidKey(key.to_string())));
    }

    #[tokio::test]
    async fn given_dot_segment_name_when_getting_then_refuses_root_url() {
        let result = storage("https://bucket.test/public").get("..").await;
        assert_eq!(result, Err(DomainError::InvalidKey("..".to_string())));
    }

    #[tokio::test]
    async fn given_dot_segment_name_when_removing_then_sends_nothing_and_succeeds() {
        let result = storage("https://bucket.test/public").remove("..").await;
        assert_eq!(result, Ok(()));
    }

    #[tokio::test]
    async fn given_key_when_getting_then_returns_object_url() {
        let url = storage("https://bucket.test/public").get("b").await;
        assert_eq!(url, Ok("https://bucket.test/public/b".to_string()));
    }

    #[test]
    fn given_opaque_url_when_building_then_fails() {
        let result = HttpObjectStorage::new(
            Url::parse("mailto:someone@example.com").expect("valid url"),
            test_session(),
            Duration::from_secs(1),
        );
        assert!(matches!(result, Err(DomainError::Config(_))));
    }
}
