//! Text post flows.
//!
//! Posts are plain documents in their own collection. Unlike media they
//! carry their own `createdAt` attribute (documents are listed newest
//! first) and a short client-minted slug used in share links.

use chrono::Utc;

use pixloft_core::config::Config;
use pixloft_core::error::AppError;
use pixloft_core::models::{NewPost, Post, PostPatch, PostRecord};
use pixloft_core::validation::{validate_post_input, ValidationError};
use pixloft_store::{Document, DocumentPage, Query, StoreClient, StoreId};

/// Store-backed post operations.
#[derive(Debug, Clone)]
pub struct PostsService {
    store: StoreClient,
    page_size: usize,
}

impl PostsService {
    pub fn new(store: StoreClient, page_size: usize) -> Self {
        Self { store, page_size }
    }

    pub fn from_config(store: StoreClient, config: &Config) -> Self {
        Self::new(store, config.posts_page_size())
    }

    fn collection_id(&self) -> String {
        self.store.settings().posts_collection_id.clone()
    }

    /// Create a post owned by `owner_id`, stamping the creation time and
    /// minting the share slug client-side.
    #[tracing::instrument(skip(self, input), fields(title = %input.title))]
    pub async fn create_post(&self, owner_id: &str, input: NewPost) -> Result<Post, AppError> {
        validate_post_input(&input.title, &input.content)?;

        let record = PostRecord {
            title: input.title,
            content: input.content,
            user_id: owner_id.to_string(),
            created_at: Utc::now(),
            slug: StoreId::generate().to_string(),
        };
        let document = self
            .store
            .create_document(&self.collection_id(), &StoreId::unique(), &record)
            .await?;

        let post = into_post(document);
        tracing::info!(post_id = %post.id, slug = %post.slug, "post created");
        Ok(post)
    }

    /// One page of the owner's posts, newest first.
    pub async fn list_posts(&self, owner_id: &str, offset: usize) -> Result<Vec<Post>, AppError> {
        let queries = [
            Query::equal("userId", owner_id),
            Query::order_desc("createdAt"),
            Query::limit(self.page_size),
            Query::offset(offset),
        ];
        let page: DocumentPage<PostRecord> = self
            .store
            .list_documents(&self.collection_id(), &queries)
            .await?;

        Ok(page.documents.into_iter().map(into_post).collect())
    }

    /// Look a post up by its share slug.
    pub async fn get_post_by_slug(&self, slug: &str) -> Result<Option<Post>, AppError> {
        let queries = [Query::equal("slug", slug), Query::limit(1)];
        let page: DocumentPage<PostRecord> = self
            .store
            .list_documents(&self.collection_id(), &queries)
            .await?;

        Ok(page.documents.into_iter().next().map(into_post))
    }

    /// Apply a partial update. Absent fields stay untouched; provided
    /// fields must not be blank.
    pub async fn update_post(&self, post_id: &str, patch: PostPatch) -> Result<Post, AppError> {
        if patch.is_empty() {
            return Err(AppError::InvalidInput("Nothing to update".to_string()));
        }
        if let Some(title) = &patch.title {
            if title.trim().is_empty() {
                return Err(ValidationError::EmptyTitle.into());
            }
        }
        if let Some(content) = &patch.content {
            if content.trim().is_empty() {
                return Err(ValidationError::EmptyContent.into());
            }
        }

        let document: Document<PostRecord> = self
            .store
            .update_document(&self.collection_id(), post_id, &patch)
            .await?;
        Ok(into_post(document))
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete_post(&self, post_id: &str) -> Result<(), AppError> {
        self.store
            .delete_document(&self.collection_id(), post_id)
            .await?;
        tracing::info!("post deleted");
        Ok(())
    }
}

fn into_post(document: Document<PostRecord>) -> Post {
    let Document { id, data, .. } = document;
    data.into_post(id)
}
