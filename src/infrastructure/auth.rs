// src/infrastructure/auth.rs
use crate::application::Credentials;
use reqwest::RequestBuilder;

pub(crate) const API_KEY_HEADER: &str = "x-api-key";

/// Attach the session's credentials to an outgoing request.
pub(crate) fn authorize(request: RequestBuilder, credentials: &Credentials) -> RequestBuilder {
    match credentials {
        Credentials::ApiKey(key) => request.header(API_KEY_HEADER, key),
        Credentials::Bearer(token) => request.bearer_auth(token),
        Credentials::Anonymous => request,
    }
}

pub(crate) fn http_client(timeout: std::time::Duration) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(concat!("cloudnotes/", env!("CARGO_PKG_VERSION")))
        .build()
}
