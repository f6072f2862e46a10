//! File bucket operations.

use bytes::Bytes;
use futures::Stream;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::{encode_segment, StoreClient, StoreId, StoreResult};

/// A file to upload.
#[derive(Debug, Clone)]
pub struct NewFile {
    pub filename: String,
    pub content_type: String,
    pub data: Vec<u8>,
    /// Store permission strings, e.g. `read("any")`.
    pub permissions: Vec<String>,
}

impl NewFile {
    /// File readable by anyone, which share links and the image proxy need.
    pub fn public_read(
        filename: impl Into<String>,
        content_type: impl Into<String>,
        data: Vec<u8>,
    ) -> Self {
        Self {
            filename: filename.into(),
            content_type: content_type.into(),
            data,
            permissions: vec![r#"read("any")"#.to_string()],
        }
    }
}

/// The store's record of an uploaded file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileRecord {
    #[serde(rename = "$id")]
    pub id: String,
    pub name: String,
    #[serde(rename = "mimeType", default)]
    pub mime_type: String,
    #[serde(rename = "sizeOriginal", default)]
    pub size_original: u64,
}

/// An open streaming read of a stored file.
///
/// Holds the upstream response so the body can be piped onward chunk by
/// chunk instead of being buffered whole.
#[derive(Debug)]
pub struct FileView {
    status: StatusCode,
    content_type: Option<String>,
    response: reqwest::Response,
}

impl FileView {
    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    pub fn into_byte_stream(self) -> impl Stream<Item = Result<Bytes, reqwest::Error>> {
        self.response.bytes_stream()
    }
}

impl StoreClient {
    fn files_path(&self) -> String {
        format!(
            "/storage/buckets/{}/files",
            encode_segment(&self.settings().bucket_id)
        )
    }

    fn file_path(&self, file_id: &str) -> String {
        format!("{}/{}", self.files_path(), encode_segment(file_id))
    }

    /// Upload a file. Pass `StoreId::unique()` to let the store mint the id.
    pub async fn create_file(&self, file_id: &StoreId, file: NewFile) -> StoreResult<FileRecord> {
        let part = reqwest::multipart::Part::bytes(file.data)
            .file_name(file.filename)
            .mime_str(&file.content_type)?;

        let mut form = reqwest::multipart::Form::new()
            .text("fileId", file_id.to_string())
            .part("file", part);
        for permission in file.permissions {
            form = form.text("permissions[]", permission);
        }

        self.post_multipart(&self.files_path(), form).await
    }

    /// Public view URL for a file. The project id rides along as a query
    /// parameter so the URL works without headers.
    pub fn file_view_url(&self, file_id: &str) -> String {
        format!(
            "{}/view?project={}",
            self.build_url(&self.file_path(file_id)),
            encode_segment(&self.settings().project_id)
        )
    }

    /// Start a streaming read of a file's bytes.
    ///
    /// On a non-success upstream status this returns the mapped store error;
    /// on success the caller gets the live response to pipe onward.
    pub async fn open_file(&self, file_id: &str) -> StoreResult<FileView> {
        let url = self.file_view_url(file_id);
        let response = self.http_client().get(&url).send().await?;
        let response = Self::check_response(response).await?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());

        Ok(FileView {
            status,
            content_type,
            response,
        })
    }

    pub async fn delete_file(&self, file_id: &str) -> StoreResult<()> {
        self.delete_empty(&self.file_path(file_id)).await
    }
}
