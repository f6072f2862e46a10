//! HTTP client for the external media store.
//!
//! Provides a thin typed client over the store's REST surface: binary file
//! buckets, document collections with query support, and the account
//! endpoint. The store is consumed as-is; nothing here reimplements it.
//!
//! The client deliberately sets no request timeout: a hung upstream call
//! hangs until the underlying transport gives up, and nothing is retried.

pub mod account;
pub mod documents;
pub mod error;
pub mod files;
pub mod id;
pub mod query;

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use pixloft_core::config::StoreSettings;
use pixloft_core::Config;
use reqwest::Client;
use serde::de::DeserializeOwned;

pub use documents::{Document, DocumentPage};
pub use error::{StoreError, StoreResult};
pub use files::{FileRecord, FileView, NewFile};
pub use id::StoreId;
pub use query::Query;

/// Characters escaped inside a URL path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'/')
    .add(b'%');

pub(crate) fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, PATH_SEGMENT).to_string()
}

/// Shape of the store's JSON error bodies, parsed best-effort.
#[derive(Debug, serde::Deserialize)]
struct StoreErrorBody {
    message: Option<String>,
    #[serde(rename = "type")]
    error_type: Option<String>,
}

/// Typed client for the external media store.
#[derive(Clone, Debug)]
pub struct StoreClient {
    client: Client,
    settings: StoreSettings,
}

impl StoreClient {
    pub fn new(settings: StoreSettings) -> StoreResult<Self> {
        // No .timeout() here: upstream calls are allowed to hang until the
        // transport gives up.
        let client = Client::builder().build()?;

        Ok(Self { client, settings })
    }

    /// Create a client from the environment (STORE_* variables).
    pub fn from_env() -> Result<Self, anyhow::Error> {
        let config = Config::from_env()?;
        Ok(Self::new(config.store().clone())?)
    }

    pub fn settings(&self) -> &StoreSettings {
        &self.settings
    }

    pub(crate) fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.settings.endpoint, path)
    }

    fn apply_headers(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let request = request.header("X-Store-Project", self.settings.project_id.as_str());
        match &self.settings.api_key {
            Some(key) => request.header("X-Store-Key", key.as_str()),
            None => request,
        }
    }

    /// GET request with query parameters. Deserializes the JSON response.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> StoreResult<T> {
        let url = self.build_url(path);
        let mut request = self.client.get(&url);
        request = self.apply_headers(request);

        if !query.is_empty() {
            request = request.query(query);
        }

        let response = Self::check_response(request.send().await?).await?;
        Ok(response.json().await?)
    }

    /// POST a JSON body and deserialize the response.
    pub(crate) async fn post_json<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> StoreResult<T> {
        let url = self.build_url(path);
        let request = self.apply_headers(self.client.post(&url).json(body));

        let response = Self::check_response(request.send().await?).await?;
        Ok(response.json().await?)
    }

    /// PATCH a JSON body and deserialize the response.
    pub(crate) async fn patch_json<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> StoreResult<T> {
        let url = self.build_url(path);
        let request = self.apply_headers(self.client.patch(&url).json(body));

        let response = Self::check_response(request.send().await?).await?;
        Ok(response.json().await?)
    }

    /// POST a multipart form and deserialize the response.
    pub(crate) async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> StoreResult<T> {
        let url = self.build_url(path);
        let request = self.apply_headers(self.client.post(&url).multipart(form));

        let response = Self::check_response(request.send().await?).await?;
        Ok(response.json().await?)
    }

    /// DELETE request. Returns Ok(()) on success.
    pub(crate) async fn delete_empty(&self, path: &str) -> StoreResult<()> {
        let url = self.build_url(path);
        let request = self.apply_headers(self.client.delete(&url));

        Self::check_response(request.send().await?).await?;
        Ok(())
    }

    /// Raw client for requests that bypass the JSON helpers (streaming reads).
    pub(crate) fn http_client(&self) -> &Client {
        &self.client
    }

    /// Map non-success statuses to typed errors, reading the error body
    /// best-effort.
    pub(crate) async fn check_response(
        response: reqwest::Response,
    ) -> StoreResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = Self::read_error_message(response).await;
        Err(match status.as_u16() {
            404 => StoreError::NotFound(message),
            401 | 403 => StoreError::PermissionDenied(message),
            code => StoreError::Api {
                status: code,
                message,
            },
        })
    }

    async fn read_error_message(response: reqwest::Response) -> String {
        let raw = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());

        match serde_json::from_str::<StoreErrorBody>(&raw) {
            Ok(body) => match (body.message, body.error_type) {
                (Some(message), Some(error_type)) => format!("{} ({})", message, error_type),
                (Some(message), None) => message,
                _ => raw,
            },
            Err(_) => raw,
        }
    }
}
