use melodia_core::{error::Result, types::*};
use sqlx::SqlitePool;

#[derive(Debug, sqlx::FromRow)]
struct AlbumRow {
    id: String,
    name: String,
    year: i32,
    cover_url: Option<String>,
}

impl From<AlbumRow> for Album {
    fn from(row: AlbumRow) -> Self {
        Album {
            id: AlbumId::new(row.id),
            name: row.name,
            year: row.year,
            cover_url: row.cover_url,
        }
    }
}

pub async fn get_all(pool: &SqlitePool) -> Result<Vec<Album>> {
    let rows = sqlx::query_as::<_, AlbumRow>(
        "SELECT id, name, year, cover_url
         FROM albums
         ORDER BY rowid",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(Album::from).collect())
}

pub async fn get_by_id(pool: &SqlitePool, id: &AlbumId) -> Result<Option<Album>> {
    let row = sqlx::query_as::<_, AlbumRow>(
        "SELECT id, name, year, cover_url
         FROM albums
         WHERE id = ?",
    )
    .bind(id.as_str())
    .fetch_optional(pool)
    .await?;

    Ok(row.map(Album::from))
}

pub async fn exists(pool: &SqlitePool, id: &AlbumId) -> Result<bool> {
    let found: Option<i64> = sqlx::query_scalar("SELECT 1 FROM albums WHERE id = ?")
        .bind(id.as_str())
        .fetch_optional(pool)
        .await?;

    Ok(found.is_some())
}

/// Insert an album, returning the id the database reports back
pub async fn insert(
    pool: &SqlitePool,
    id: &AlbumId,
    name: &str,
    year: i32,
) -> Result<Option<AlbumId>> {
    let returned: Option<String> = sqlx::query_scalar(
        "INSERT INTO albums (id, name, year)
         VALUES (?, ?, ?)
         RETURNING id",
    )
    .bind(id.as_str())
    .bind(name)
    .bind(year)
    .fetch_optional(pool)
    .await?;

    Ok(returned.filter(|id| !id.is_empty()).map(AlbumId::new))
}

/// Overwrite name and year, returning the number of rows touched
pub async fn update(pool: &SqlitePool, id: &AlbumId, name: &str, year: i32) -> Result<u64> {
    let result = sqlx::query("UPDATE albums SET name = ?, year = ? WHERE id = ?")
        .bind(name)
        .bind(year)
        .bind(id.as_str())
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

pub async fn update_cover(pool: &SqlitePool, id: &AlbumId, cover_url: &str) -> Result<u64> {
    let result = sqlx::query("UPDATE albums SET cover_url = ? WHERE id = ?")
        .bind(cover_url)
        .bind(id.as_str())
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

pub async fn delete(pool: &SqlitePool, id: &AlbumId) -> Result<u64> {
    let result = sqlx::query("DELETE FROM albums WHERE id = ?")
        .bind(id.as_str())
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}
