use std::future::Future;

use reqwest::header::HeaderMap;
use scribe::{NewNoteRequest, Note, NoteQueryRequest, SearchResponse};
use serde::Serialize;
use tracing::debug;

use crate::{error::ClientError, models::config::HttpClientConfig};

/// Note persistence and similarity search, as consumed by the dashboard.
/// The auth token is passed with each call rather than read from ambient
/// state.
pub trait NoteBackend: Send + Sync + 'static {
    /// Persist `text` as a new note. Backends may acknowledge with the
    /// created note or with an empty body.
    fn add_note(
        &self,
        text: &str,
        token: Option<&str>,
    ) -> impl Future<Output = Result<Option<Note>, ClientError>> + Send;

    fn query_notes(
        &self,
        query: &str,
        token: Option<&str>,
    ) -> impl Future<Output = Result<SearchResponse, ClientError>> + Send;
}

#[derive(Clone)]
pub struct HttpBackend {
    config: HttpClientConfig,
    client: reqwest::Client,
}

impl HttpBackend {
    pub fn new(config: HttpClientConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let header_map = HeaderMap::try_from(&config.headers)?;
        let client = reqwest::Client::builder()
            .default_headers(header_map)
            .build()?;
        Ok(Self { config, client })
    }

    /// Send a JSON body and return the raw body of a successful response.
    async fn post<Request: Serialize>(
        &self,
        endpoint: &str,
        token: Option<&str>,
        request: &Request,
    ) -> Result<Vec<u8>, ClientError> {
        let base_url = self.config.base_url.trim_end_matches('/');
        let url = format!("{base_url}{endpoint}");
        let mut builder = self
            .client
            .post(&url)
            .query(&self.config.params)
            .json(request);
        if let Some(token) = token {
            builder = builder.bearer_auth(token);
        }
        debug!("POST {url}");
        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|err| format!("{err:?}"));
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.bytes().await?.to_vec())
    }
}

impl NoteBackend for HttpBackend {
    async fn add_note(&self, text: &str, token: Option<&str>) -> Result<Option<Note>, ClientError> {
        let request = NewNoteRequest::builder().text(text.to_string()).build();
        let body = self.post("/notes", token, &request).await?;
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }
        Ok(Some(serde_json::from_slice(&body)?))
    }

    async fn query_notes(
        &self,
        query: &str,
        token: Option<&str>,
    ) -> Result<SearchResponse, ClientError> {
        let request = NoteQueryRequest::builder().query(query.to_string()).build();
        let body = self.post("/notes/query", token, &request).await?;
        let response: SearchResponse = serde_json::from_slice(&body)?;
        if !response.is_consistent() {
            return Err(ClientError::CountMismatch {
                count: response.count,
                len: response.results.len(),
            });
        }
        Ok(response)
    }
}
