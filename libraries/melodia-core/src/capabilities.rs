//! Capabilities consumed by the album record store
//!
//! The store does not own a cache engine or the song catalog. It is handed
//! implementations of these traits at construction time, which keeps the
//! store testable against in-memory doubles.

use crate::error::Result;
use crate::types::{AlbumId, SongSummary};
use async_trait::async_trait;

/// Cache key holding the like count of an album
pub fn album_likes_cache_key(album_id: &AlbumId) -> String {
    format!("albumLikes:{}", album_id.as_str())
}

/// Key-value cache with string keys and values
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Fetch a value
    ///
    /// # Errors
    /// Returns `MelodiaError::CacheMiss` when the key is absent, or another
    /// error when the cache itself fails. Callers treat both as a miss.
    async fn get(&self, key: &str) -> Result<String>;

    /// Store a value, replacing any previous one
    async fn set(&self, key: &str, value: String) -> Result<()>;

    /// Remove a value; removing an absent key is not an error
    async fn delete(&self, key: &str) -> Result<()>;
}

/// Lookup of the songs that belong to an album
#[async_trait]
pub trait SongLookup: Send + Sync {
    /// Get the songs of an album, empty if it has none
    async fn get_songs_by_album_id(&self, album_id: &AlbumId) -> Result<Vec<SongSummary>>;
}
