//! Test helpers and fixtures for storage integration tests
//!
//! These helpers create test databases using REAL SQLite files (NOT in-memory)
//! to match production behavior and properly test migrations and constraints.
#![allow(dead_code)]

use async_trait::async_trait;
use melodia_core::{error::Result, types::*, CacheStore, SongLookup};
use melodia_storage::{AlbumRecordStore, MemoryCache, SqliteSongLookup};
use sqlx::SqlitePool;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;

/// Test database wrapper that cleans up on drop
pub struct TestDb {
    pub pool: SqlitePool,
    _temp_dir: TempDir,
}

impl TestDb {
    /// Create a new test database with migrations applied
    pub async fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("test.db");
        let db_url = format!("sqlite://{}", db_path.display());

        let pool = melodia_storage::create_pool(&db_url, 5)
            .await
            .expect("Failed to create pool");

        melodia_storage::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        Self {
            pool,
            _temp_dir: temp_dir,
        }
    }

    /// Get the pool reference
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Record store wired to the real song table and a fresh memory cache
    pub fn store(&self) -> AlbumRecordStore {
        AlbumRecordStore::new(
            self.pool.clone(),
            Arc::new(SqliteSongLookup::new(self.pool.clone())),
            Arc::new(MemoryCache::new(1_000, Duration::from_secs(60))),
        )
    }

    /// Record store with a caller-provided cache
    pub fn store_with_cache(&self, cache: Arc<dyn CacheStore>) -> AlbumRecordStore {
        AlbumRecordStore::new(
            self.pool.clone(),
            Arc::new(SqliteSongLookup::new(self.pool.clone())),
            cache,
        )
    }

    /// Record store with a caller-provided song lookup
    pub fn store_with_songs(&self, songs: Arc<dyn SongLookup>) -> AlbumRecordStore {
        AlbumRecordStore::new(
            self.pool.clone(),
            songs,
            Arc::new(MemoryCache::new(1_000, Duration::from_secs(60))),
        )
    }
}

/// Test fixture: Create a test album directly in the table
pub async fn create_test_album(pool: &SqlitePool, name: &str, year: i32) -> AlbumId {
    let id = AlbumId::generate();
    sqlx::query("INSERT INTO albums (id, name, year) VALUES (?, ?, ?)")
        .bind(id.as_str())
        .bind(name)
        .bind(year)
        .execute(pool)
        .await
        .expect("Failed to create test album");
    id
}

/// Test fixture: Create a test song, optionally attached to an album
pub async fn create_test_song(
    pool: &SqlitePool,
    title: &str,
    performer: &str,
    album_id: Option<&AlbumId>,
) -> SongId {
    let id = SongId::generate();
    sqlx::query("INSERT INTO songs (id, title, performer, album_id) VALUES (?, ?, ?, ?)")
        .bind(id.as_str())
        .bind(title)
        .bind(performer)
        .bind(album_id.map(|a| a.as_str().to_string()))
        .execute(pool)
        .await
        .expect("Failed to create test song");
    id
}

/// Count raw like rows for a (album, user) pair
pub async fn count_like_rows(pool: &SqlitePool, album_id: &AlbumId, user_id: &UserId) -> i64 {
    sqlx::query_scalar(
        "SELECT COUNT(*) FROM user_album_likes WHERE album_id = ? AND user_id = ?",
    )
    .bind(album_id.as_str())
    .bind(user_id.as_str())
    .fetch_one(pool)
    .await
    .expect("Failed to count like rows")
}

/// Cache double that records every call and delegates to a memory cache
#[derive(Default)]
pub struct RecordingCache {
    entries: Mutex<std::collections::HashMap<String, String>>,
    pub deleted: Mutex<Vec<String>>,
    pub stored: Mutex<Vec<(String, String)>>,
}

impl RecordingCache {
    pub fn deleted_keys(&self) -> Vec<String> {
        self.deleted.lock().unwrap().clone()
    }

    pub fn stored_entries(&self) -> Vec<(String, String)> {
        self.stored.lock().unwrap().clone()
    }

    /// Put a raw value in place, bypassing the recorder
    pub fn seed(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }
}

#[async_trait]
impl CacheStore for RecordingCache {
    async fn get(&self, key: &str) -> Result<String> {
        self.entries
            .lock()
            .unwrap()
            .get(key)
            .cloned()
            .ok_or_else(|| melodia_core::MelodiaError::CacheMiss(key.to_string()))
    }

    async fn set(&self, key: &str, value: String) -> Result<()> {
        self.stored
            .lock()
            .unwrap()
            .push((key.to_string(), value.clone()));
        self.entries.lock().unwrap().insert(key.to_string(), value);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.deleted.lock().unwrap().push(key.to_string());
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }
}
