use crate::{album_likes, albums};
use melodia_core::{
    album_likes_cache_key,
    error::{MelodiaError, Result},
    types::*,
    CacheStore, SongLookup,
};
use sqlx::SqlitePool;
use std::sync::Arc;
use tracing::{debug, warn};

/// Persistence for albums and album likes
///
/// The relational store is the source of truth. The cache only holds the
/// aggregate like count per album and is invalidated after every toggle.
#[derive(Clone)]
pub struct AlbumRecordStore {
    pool: SqlitePool,
    songs: Arc<dyn SongLookup>,
    cache: Arc<dyn CacheStore>,
}

impl AlbumRecordStore {
    pub fn new(pool: SqlitePool, songs: Arc<dyn SongLookup>, cache: Arc<dyn CacheStore>) -> Self {
        Self { pool, songs, cache }
    }

    /// Insert a new album under a freshly generated id
    pub async fn add_album(&self, name: &str, year: i32) -> Result<AlbumId> {
        let id = AlbumId::generate();

        let inserted = albums::insert(&self.pool, &id, name, year)
            .await?
            .ok_or_else(|| MelodiaError::invariant("Failed to add album"))?;

        debug!("Added album {}", inserted);
        Ok(inserted)
    }

    pub async fn get_albums(&self) -> Result<Vec<Album>> {
        albums::get_all(&self.pool).await
    }

    /// Get an album with its songs attached
    pub async fn get_album_by_id(&self, id: &AlbumId) -> Result<AlbumDetail> {
        let album = albums::get_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| MelodiaError::not_found("Album", id.as_str()))?;

        let songs = self.songs.get_songs_by_album_id(id).await?;

        Ok(AlbumDetail { album, songs })
    }

    /// Overwrite both name and year
    pub async fn edit_album_by_id(&self, id: &AlbumId, name: &str, year: i32) -> Result<()> {
        let updated = albums::update(&self.pool, id, name, year).await?;
        if updated == 0 {
            return Err(MelodiaError::not_found("Album", id.as_str()));
        }
        Ok(())
    }

    pub async fn delete_album_by_id(&self, id: &AlbumId) -> Result<()> {
        let deleted = albums::delete(&self.pool, id).await?;
        if deleted == 0 {
            return Err(MelodiaError::not_found("Album", id.as_str()));
        }

        // Like rows went with the album; drop the stale count too
        self.cache.delete(&album_likes_cache_key(id)).await?;
        Ok(())
    }

    pub async fn add_cover_album(&self, id: &AlbumId, cover_url: &str) -> Result<()> {
        let updated = albums::update_cover(&self.pool, id, cover_url).await?;
        if updated == 0 {
            return Err(MelodiaError::not_found("Album", id.as_str()));
        }
        Ok(())
    }

    /// Like the album if `user_id` has not liked it yet, otherwise unlike it
    pub async fn post_like_album(&self, album_id: &AlbumId, user_id: &UserId) -> Result<LikeAction> {
        if !albums::exists(&self.pool, album_id).await? {
            return Err(MelodiaError::not_found("Album", album_id.as_str()));
        }

        let action = album_likes::toggle(&self.pool, album_id, user_id).await?;
        debug!("User {} {:?} album {}", user_id, action, album_id);

        self.cache.delete(&album_likes_cache_key(album_id)).await?;
        Ok(action)
    }

    /// Read-through like count
    pub async fn get_album_likes(&self, album_id: &AlbumId) -> Result<AlbumLikes> {
        let key = album_likes_cache_key(album_id);

        match self.cache.get(&key).await {
            Ok(cached) => match cached.parse::<u64>() {
                Ok(count) => {
                    debug!("Like count for {} served from cache", album_id);
                    return Ok(AlbumLikes {
                        count,
                        from_cache: true,
                    });
                }
                Err(_) => warn!("Ignoring malformed cached like count {:?} for {}", cached, key),
            },
            Err(e) => debug!("Like count cache miss for {}: {}", album_id, e),
        }

        if !albums::exists(&self.pool, album_id).await? {
            return Err(MelodiaError::not_found("Album", album_id.as_str()));
        }

        let count = album_likes::count_by_album(&self.pool, album_id).await?;
        self.cache.set(&key, count.to_string()).await?;

        Ok(AlbumLikes {
            count,
            from_cache: false,
        })
    }
}
