//! Media library flows: upload, deletion, and page fetching.
//!
//! Every image lives in the store twice: as a binary file in the bucket and
//! as a metadata document pointing at it through `fileId`. The flows here
//! keep the two in step in a fixed order (file first), and log instead of
//! compensating when the second step fails.

use pixloft_core::config::Config;
use pixloft_core::error::AppError;
use pixloft_core::models::{MediaItem, MediaRecord, PageCursor};
use pixloft_core::validation::UploadValidator;
use pixloft_store::{DocumentPage, NewFile, Query, StoreClient, StoreId};

use crate::pagination::{Completion, GalleryController, PageOutcome};

/// An image handed in for upload.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub owner_id: String,
    pub filename: String,
    pub content_type: String,
    pub data: Vec<u8>,
    /// Explicit display name; derived from the filename when absent.
    pub display_name: Option<String>,
}

/// Store-backed media operations.
#[derive(Debug, Clone)]
pub struct MediaLibrary {
    store: StoreClient,
    validator: UploadValidator,
    public_base_url: String,
}

impl MediaLibrary {
    pub fn new(
        store: StoreClient,
        max_image_size_bytes: usize,
        public_base_url: impl Into<String>,
    ) -> Self {
        Self {
            store,
            validator: UploadValidator::new(max_image_size_bytes),
            public_base_url: public_base_url.into(),
        }
    }

    pub fn from_config(store: StoreClient, config: &Config) -> Self {
        Self::new(
            store,
            config.max_image_size_bytes(),
            config.public_base_url(),
        )
    }

    pub fn store(&self) -> &StoreClient {
        &self.store
    }

    /// Share link for a stored image, pointing at the public image proxy.
    pub fn image_url(&self, file_id: &str) -> String {
        format!(
            "{}/image/{}",
            self.public_base_url.trim_end_matches('/'),
            file_id
        )
    }

    /// Upload an image: validate, store the file, then write its metadata
    /// document.
    ///
    /// The file goes first so the metadata never points at nothing. If the
    /// metadata write fails the uploaded file is left in place and the error
    /// surfaces; there is no rollback.
    #[tracing::instrument(
        skip(self, upload),
        fields(filename = %upload.filename, size = upload.data.len())
    )]
    pub async fn upload_image(&self, upload: ImageUpload) -> Result<MediaItem, AppError> {
        let display_name = self.validator.validate(
            &upload.filename,
            &upload.content_type,
            upload.data.len(),
            upload.display_name.as_deref(),
        )?;

        let file = self
            .store
            .create_file(
                &StoreId::unique(),
                NewFile::public_read(upload.filename, upload.content_type, upload.data),
            )
            .await?;

        let record = MediaRecord {
            file_id: file.id.clone(),
            user_id: upload.owner_id.clone(),
            name: display_name.clone(),
        };
        let collection_id = self.store.settings().media_collection_id.clone();
        if let Err(err) = self
            .store
            .create_document(&collection_id, &StoreId::unique(), &record)
            .await
        {
            tracing::warn!(
                file_id = %file.id,
                error = %err,
                "metadata write failed after file upload, file left in place"
            );
            return Err(err.into());
        }

        tracing::info!(file_id = %file.id, name = %display_name, "image uploaded");
        Ok(MediaItem::new(file.id, upload.owner_id, display_name))
    }

    /// Delete an image: the file first, then whatever metadata document
    /// still points at it.
    ///
    /// A file-delete failure aborts before anything is removed. A missing
    /// metadata document is not an error once the file is gone.
    #[tracing::instrument(skip(self))]
    pub async fn delete_image(&self, file_id: &str) -> Result<(), AppError> {
        self.store.delete_file(file_id).await?;

        let collection_id = self.store.settings().media_collection_id.clone();
        let queries = [Query::equal("fileId", file_id), Query::limit(1)];
        let page: DocumentPage<MediaRecord> =
            self.store.list_documents(&collection_id, &queries).await?;

        match page.documents.into_iter().next() {
            Some(document) => {
                self.store
                    .delete_document(&collection_id, &document.id)
                    .await?;
                tracing::info!(document_id = %document.id, "image deleted");
            }
            None => {
                tracing::warn!("no metadata document matched deleted file");
            }
        }
        Ok(())
    }

    /// Fetch one page of the owner's media, oldest first (store order).
    pub async fn list_page(&self, cursor: &PageCursor) -> Result<Vec<MediaItem>, AppError> {
        let collection_id = self.store.settings().media_collection_id.clone();
        let queries = [
            Query::equal("userId", &cursor.owner_id),
            Query::limit(cursor.limit),
            Query::offset(cursor.offset),
        ];
        let page: DocumentPage<MediaRecord> =
            self.store.list_documents(&collection_id, &queries).await?;

        Ok(page
            .documents
            .into_iter()
            .map(|document| document.data.into_item())
            .collect())
    }

    /// Drive the controller through one page load.
    ///
    /// Returns `Ok(None)` when the controller declined to start a fetch
    /// (already loading, or exhausted). On fetch failure the controller is
    /// told before the error propagates, so its list is already cleared.
    pub async fn load_next_page(
        &self,
        controller: &mut GalleryController,
    ) -> Result<Option<Completion>, AppError> {
        let Some(request) = controller.begin_page() else {
            return Ok(None);
        };

        match self.list_page(&request.cursor).await {
            Ok(items) => {
                Ok(Some(controller.complete_page(request.epoch, PageOutcome::Loaded(items))))
            }
            Err(err) => {
                tracing::error!(
                    error = %err,
                    offset = request.cursor.offset,
                    "gallery page fetch failed"
                );
                controller.complete_page(request.epoch, PageOutcome::Failed);
                Err(err)
            }
        }
    }
}
