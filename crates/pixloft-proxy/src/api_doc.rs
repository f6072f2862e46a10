//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Pixloft Image Proxy",
        version = "0.1.0",
        description = "Streams stored gallery images to share-link visitors. Links carry only an opaque file id; the media store stays private behind this service."
    ),
    paths(handlers::image::fetch_image, handlers::health::health_check),
    components(schemas(error::ErrorResponse, handlers::health::HealthResponse)),
    tags(
        (name = "images", description = "Image streaming"),
        (name = "health", description = "Service health")
    )
)]
pub struct ApiDoc;
