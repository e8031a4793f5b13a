//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Videogate API",
        version = "0.1.0",
        description = "Gateway that resolves video ids and streams the video from the storage service"
    ),
    paths(handlers::root::root, handlers::video::stream_video),
    components(schemas(error::ErrorResponse)),
    tags(
        (name = "videos", description = "Video streaming"),
        (name = "meta", description = "Service metadata")
    )
)]
pub struct ApiDoc;
