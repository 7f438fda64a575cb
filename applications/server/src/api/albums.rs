/// Albums API routes
use crate::{
    error::{Result, ServerError},
    middleware::AuthenticatedUser,
    state::AppState,
};
use axum::{
    extract::{rejection::JsonRejection, Multipart, Path, State},
    http::{HeaderName, HeaderValue, StatusCode},
    response::IntoResponse,
    Json,
};
use melodia_core::{types::AlbumId, AlbumPayloadValidator};
use serde_json::{json, Value};

/// Response header telling clients the like count came from cache
pub const DATA_SOURCE_HEADER: &str = "x-data-source";

/// Multipart field holding the cover image
pub const COVER_FIELD: &str = "cover";

/// POST /albums
pub async fn post_album(
    State(app_state): State<AppState>,
    payload: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let Json(payload) = payload?;
    let album = AlbumPayloadValidator::validate(&payload)?;

    let album_id = app_state.store.add_album(&album.name, album.year).await?;
    if let Some(cover_url) = album.cover_url.as_deref() {
        app_state.store.add_cover_album(&album_id, cover_url).await?;
    }

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "status": "success",
            "data": { "albumId": album_id },
        })),
    ))
}

/// GET /albums
pub async fn get_albums(State(app_state): State<AppState>) -> Result<Json<Value>> {
    let albums = app_state.store.get_albums().await?;

    Ok(Json(json!({
        "status": "success",
        "data": { "albums": albums },
    })))
}

/// GET /albums/:id
pub async fn get_album(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
) -> Result<Json<Value>> {
    let album = app_state.store.get_album_by_id(&AlbumId::new(id)).await?;

    Ok(Json(json!({
        "status": "success",
        "data": { "album": album },
    })))
}

/// PUT /albums/:id
/// Overwrites name and year; both must be supplied
pub async fn put_album(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    payload: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>> {
    let Json(payload) = payload?;
    let album = AlbumPayloadValidator::validate(&payload)?;

    app_state
        .store
        .edit_album_by_id(&AlbumId::new(id), &album.name, album.year)
        .await?;

    Ok(Json(json!({
        "status": "success",
        "message": "Album updated",
    })))
}

/// DELETE /albums/:id
pub async fn delete_album(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
) -> Result<Json<Value>> {
    app_state.store.delete_album_by_id(&AlbumId::new(id)).await?;

    Ok(Json(json!({
        "status": "success",
        "message": "Album deleted",
    })))
}

/// POST /albums/:id/covers
/// Upload a cover image as multipart field `cover`
pub async fn post_album_cover(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse> {
    let album_id = AlbumId::new(id);

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(COVER_FIELD) {
            continue;
        }

        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);

        // Reject before buffering the body
        crate::services::CoverStorage::validate_content_type(content_type.as_deref())?;
        let data = field.bytes().await?;

        let stored = app_state
            .covers
            .store(file_name.as_deref(), content_type.as_deref(), &data)
            .await?;

        if let Err(e) = app_state.store.add_cover_album(&album_id, &stored.url).await {
            // Don't leave an orphaned file behind for an unknown album
            if let Err(io) = tokio::fs::remove_file(&stored.path).await {
                tracing::warn!("Failed to remove orphaned cover {:?}: {}", stored.path, io);
            }
            return Err(e.into());
        }

        return Ok((
            StatusCode::CREATED,
            Json(json!({
                "status": "success",
                "message": "Cover uploaded",
            })),
        ));
    }

    Err(ServerError::BadRequest(format!(
        "Missing multipart field \"{}\"",
        COVER_FIELD
    )))
}

/// POST /albums/:id/likes
/// Toggle the caller's like on an album
pub async fn post_album_like(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<impl IntoResponse> {
    let action = app_state
        .store
        .post_like_album(&AlbumId::new(id), auth.user_id())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "status": "success",
            "message": action.message(),
        })),
    ))
}

/// GET /albums/:id/likes
pub async fn get_album_likes(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse> {
    let likes = app_state.store.get_album_likes(&AlbumId::new(id)).await?;

    let mut response = Json(json!({
        "status": "success",
        "data": { "likes": likes.count },
    }))
    .into_response();

    if likes.from_cache {
        response.headers_mut().insert(
            HeaderName::from_static(DATA_SOURCE_HEADER),
            HeaderValue::from_static("cache"),
        );
    }

    Ok(response)
}
