use async_trait::async_trait;
use melodia_core::{error::Result, types::*, SongLookup};
use sqlx::SqlitePool;

#[derive(Debug, sqlx::FromRow)]
struct SongSummaryRow {
    id: String,
    title: String,
    performer: String,
}

impl From<SongSummaryRow> for SongSummary {
    fn from(row: SongSummaryRow) -> Self {
        SongSummary {
            id: SongId::new(row.id),
            title: row.title,
            performer: row.performer,
        }
    }
}

/// Get all songs of an album
pub async fn get_by_album_id(pool: &SqlitePool, album_id: &AlbumId) -> Result<Vec<SongSummary>> {
    let rows = sqlx::query_as::<_, SongSummaryRow>(
        "SELECT id, title, performer
         FROM songs
         WHERE album_id = ?
         ORDER BY rowid",
    )
    .bind(album_id.as_str())
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(SongSummary::from).collect())
}

/// `SongLookup` backed by the `songs` table
#[derive(Debug, Clone)]
pub struct SqliteSongLookup {
    pool: SqlitePool,
}

impl SqliteSongLookup {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SongLookup for SqliteSongLookup {
    async fn get_songs_by_album_id(&self, album_id: &AlbumId) -> Result<Vec<SongSummary>> {
        get_by_album_id(&self.pool, album_id).await
    }
}
