//! Common test utilities and fixtures
#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Request, Response},
    Router,
};
use melodia_server::{api, services::CoverStorage, state::AppState};
use melodia_storage::{AlbumRecordStore, MemoryCache, SqliteSongLookup};
use sqlx::SqlitePool;
use std::{sync::Arc, time::Duration};
use tempfile::TempDir;
use tower::util::ServiceExt;

pub const PUBLIC_URL: &str = "http://localhost:5000";

/// Upload limit used by the test app, kept small to exercise rejection
pub const MAX_COVER_BYTES: usize = 1024;

/// Router plus the resources backing it
pub struct TestApp {
    pub router: Router,
    pub pool: SqlitePool,
    pub temp_dir: TempDir,
}

impl TestApp {
    /// Build the full router over a temp-file database and cover directory
    pub async fn new() -> Self {
        Self::with_max_cover_bytes(MAX_COVER_BYTES).await
    }

    pub async fn with_max_cover_bytes(max_cover_bytes: usize) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let db_url = format!("sqlite://{}", temp_dir.path().join("test.db").display());

        let pool = melodia_storage::create_pool(&db_url, 5)
            .await
            .expect("Failed to create pool");
        melodia_storage::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        let store = AlbumRecordStore::new(
            pool.clone(),
            Arc::new(SqliteSongLookup::new(pool.clone())),
            Arc::new(MemoryCache::new(1_000, Duration::from_secs(60))),
        );

        let covers = CoverStorage::new(temp_dir.path().join("covers"), PUBLIC_URL, max_cover_bytes);
        covers.initialize().await.expect("Failed to init covers");

        let router = api::create_router(AppState::new(Arc::new(store), Arc::new(covers)));

        Self {
            router,
            pool,
            temp_dir,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("Router failed")
    }

    /// Create an album through the API and return its id
    pub async fn create_album(&self, name: &str, year: i32) -> String {
        let response = self
            .send(json_request(
                "POST",
                "/albums",
                serde_json::json!({ "name": name, "year": year }),
            ))
            .await;
        let body = body_json(response).await;
        body["data"]["albumId"]
            .as_str()
            .expect("albumId missing")
            .to_string()
    }
}

pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Build a multipart/form-data request with a single file field
pub fn multipart_request(
    uri: &str,
    field: &str,
    file_name: &str,
    content_type: &str,
    data: &[u8],
) -> Request<Body> {
    let boundary = "melodia-test-boundary";
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
            field, file_name
        )
        .as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", content_type).as_bytes());
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{}--\r\n", boundary).as_bytes());

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", boundary),
        )
        .body(Body::from(body))
        .unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    serde_json::from_slice(&bytes).expect("Body is not JSON")
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body")
        .to_vec()
}
