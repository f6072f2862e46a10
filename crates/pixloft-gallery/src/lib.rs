//! Gallery domain logic: incremental pagination, the local item cache,
//! account sessions, and the upload/delete/post flows against the store.

pub mod cache;
pub mod media;
pub mod pagination;
pub mod posts;
pub mod session;

pub use cache::{merge_by_id, GalleryCache};
pub use media::{ImageUpload, MediaLibrary};
pub use pagination::{
    Completion, GalleryController, GalleryState, MergePolicy, PageOutcome, PageRequest,
};
pub use posts::PostsService;
pub use session::{Session, SessionState};
