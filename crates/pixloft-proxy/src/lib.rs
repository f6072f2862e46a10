//! Public image proxy.
//!
//! Streams stored images to share-link visitors so the media store, its
//! endpoint, and its credentials never appear in a link. The HTTP surface
//! is deliberately small: the image route, a health probe, and the OpenAPI
//! document.

pub mod api_doc;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod setup;
pub mod state;
pub mod telemetry;

pub use error::{ErrorResponse, HttpAppError};
pub use state::AppState;
