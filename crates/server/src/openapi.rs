use utoipa::OpenApi;

use crate::api::handlers::{media, progress};
use crate::models::{ProgressObservation, SyncOutcome, SyncResponse, WatchProgress};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Media Gateway API",
        version = "1.0.0"
    ),
    tags(
        (name = "media", description = "Aggregated metadata, stream and page endpoints"),
        (name = "progress", description = "Watch progress endpoints")
    ),
    paths(
        media::get_media,
        progress::get_progress,
        progress::put_progress
    ),
    components(schemas(
        providers::MediaMetadata,
        providers::MediaType,
        providers::Episode,
        providers::Chapter,
        providers::VideoStream,
        providers::Subtitle,
        providers::MangaPage,
        WatchProgress,
        ProgressObservation,
        SyncOutcome,
        SyncResponse
    ))
)]
pub struct ApiDoc;
