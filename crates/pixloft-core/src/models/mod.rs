//! Data models for the application
//!
//! This module contains the data structures used throughout the application,
//! organized by domain. Wire payload shapes (the attribute names the store
//! persists) live next to the domain types they map to.

mod account;
mod media;
mod page;
mod post;

// Re-export all models for convenient imports
pub use account::*;
pub use media::*;
pub use page::*;
pub use post::*;
