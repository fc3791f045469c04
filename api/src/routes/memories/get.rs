use super::common::{GalleryQuery, GalleryResponse};
use crate::auth::AuthUser;
use crate::response::{Reply, from_service_error, ok};
use axum::{
    extract::{Query, State},
    http::StatusCode,
};
use db::models::memory::MemoryFilter;
use services::memory::MemoryService;
use util::state::AppState;

/// GET /api/memories?event=&album=
///
/// Public gallery, newest first. With a bearer token each item's `liked`
/// reflects the caller.
pub async fn gallery(
    State(app_state): State<AppState>,
    Query(query): Query<GalleryQuery>,
    auth: Option<AuthUser>,
) -> Reply<GalleryResponse> {
    let filter = MemoryFilter {
        event_id: query.event,
        album: query.album.filter(|a| !a.trim().is_empty()),
    };
    let viewer = auth.map(|AuthUser(claims)| claims.context());

    match MemoryService::gallery(app_state.db(), viewer, filter).await {
        Ok(gallery) => ok(StatusCode::OK, gallery.into(), "Gallery retrieved successfully"),
        Err(e) => from_service_error(e),
    }
}
