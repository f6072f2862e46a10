//! Pixloft Core Library
//!
//! This crate provides the domain models, error types, configuration, and
//! upload validation shared across all Pixloft components.

pub mod config;
pub mod error;
pub mod models;
pub mod validation;

// Re-export commonly used types
pub use config::{AppSettings, Config, GallerySettings, ProxySettings, StoreSettings};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use models::{Account, MediaItem, MediaRecord, NewPost, PageCursor, Post, PostPatch, PostRecord};
pub use validation::{UploadValidator, ValidationError};
