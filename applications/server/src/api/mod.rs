/// API route modules
pub mod albums;
pub mod health;

use crate::{services::cover_storage::COVERS_ROUTE, state::AppState};
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    services::ServeDir,
    trace::{DefaultMakeSpan, TraceLayer},
};

/// Build the full application router
pub fn create_router(app_state: AppState) -> Router {
    let covers = ServeDir::new(app_state.covers.base_path());
    // Uploads may exceed axum's default body limit
    let cover_body_limit = DefaultBodyLimit::max(app_state.covers.upload_body_limit());

    Router::new()
        .route("/health", get(health::health))
        .route(
            "/albums",
            post(albums::post_album).get(albums::get_albums),
        )
        .route(
            "/albums/:id",
            get(albums::get_album)
                .put(albums::put_album)
                .delete(albums::delete_album),
        )
        .route(
            "/albums/:id/covers",
            post(albums::post_album_cover).layer(cover_body_limit),
        )
        .route(
            "/albums/:id/likes",
            post(albums::post_album_like).get(albums::get_album_likes),
        )
        .nest_service(COVERS_ROUTE, covers)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(true)),
        )
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}
