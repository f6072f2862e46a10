//! Document collection operations.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::{encode_segment, Query, StoreClient, StoreId, StoreResult};

/// A document as the store returns it: system fields plus the payload
/// attributes flattened alongside them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document<T> {
    #[serde(rename = "$id")]
    pub id: String,
    #[serde(rename = "$createdAt", default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "$updatedAt", default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub data: T,
}

/// One page of a document listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentPage<T> {
    pub total: u64,
    pub documents: Vec<Document<T>>,
}

#[derive(Serialize)]
struct CreateDocumentBody<'a, T: Serialize> {
    #[serde(rename = "documentId")]
    document_id: &'a str,
    data: &'a T,
}

#[derive(Serialize)]
struct UpdateDocumentBody<'a, T: Serialize> {
    data: &'a T,
}

impl StoreClient {
    fn documents_path(&self, collection_id: &str) -> String {
        format!(
            "/databases/{}/collections/{}/documents",
            encode_segment(&self.settings().database_id),
            encode_segment(collection_id)
        )
    }

    fn document_path(&self, collection_id: &str, document_id: &str) -> String {
        format!(
            "{}/{}",
            self.documents_path(collection_id),
            encode_segment(document_id)
        )
    }

    /// Create a document. Pass `StoreId::unique()` to let the store mint the
    /// document id.
    pub async fn create_document<T>(
        &self,
        collection_id: &str,
        document_id: &StoreId,
        data: &T,
    ) -> StoreResult<Document<T>>
    where
        T: Serialize + DeserializeOwned,
    {
        let body = CreateDocumentBody {
            document_id: document_id.as_str(),
            data,
        };
        self.post_json(&self.documents_path(collection_id), &body)
            .await
    }

    /// List documents matching the given queries.
    pub async fn list_documents<T: DeserializeOwned>(
        &self,
        collection_id: &str,
        queries: &[Query],
    ) -> StoreResult<DocumentPage<T>> {
        let params: Vec<(&str, String)> = queries
            .iter()
            .map(|query| ("queries[]", query.as_str().to_string()))
            .collect();

        self.get_json(&self.documents_path(collection_id), &params)
            .await
    }

    /// Patch a document; only the attributes present in `data` are written.
    pub async fn update_document<T, P>(
        &self,
        collection_id: &str,
        document_id: &str,
        data: &P,
    ) -> StoreResult<Document<T>>
    where
        T: DeserializeOwned,
        P: Serialize,
    {
        let body = UpdateDocumentBody { data };
        self.patch_json(&self.document_path(collection_id, document_id), &body)
            .await
    }

    pub async fn delete_document(&self, collection_id: &str, document_id: &str) -> StoreResult<()> {
        self.delete_empty(&self.document_path(collection_id, document_id))
            .await
    }
}
