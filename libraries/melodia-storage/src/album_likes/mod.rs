use melodia_core::{error::Result, types::*, MelodiaError};
use sqlx::SqlitePool;

#[derive(Debug, sqlx::FromRow)]
struct AlbumLikeRow {
    id: String,
    user_id: String,
    album_id: String,
}

impl From<AlbumLikeRow> for AlbumLike {
    fn from(row: AlbumLikeRow) -> Self {
        AlbumLike {
            id: AlbumLikeId::new(row.id),
            user_id: UserId::new(row.user_id),
            album_id: AlbumId::new(row.album_id),
        }
    }
}

pub async fn find(
    pool: &SqlitePool,
    album_id: &AlbumId,
    user_id: &UserId,
) -> Result<Option<AlbumLike>> {
    let row = sqlx::query_as::<_, AlbumLikeRow>(
        "SELECT id, user_id, album_id
         FROM user_album_likes
         WHERE album_id = ? AND user_id = ?",
    )
    .bind(album_id.as_str())
    .bind(user_id.as_str())
    .fetch_optional(pool)
    .await?;

    Ok(row.map(AlbumLike::from))
}

pub async fn count_by_album(pool: &SqlitePool, album_id: &AlbumId) -> Result<u64> {
    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM user_album_likes WHERE album_id = ?")
            .bind(album_id.as_str())
            .fetch_one(pool)
            .await?;

    Ok(u64::try_from(count).unwrap_or_default())
}

/// Flip the like of `user_id` on `album_id`
///
/// Runs as one transaction: an existing row is removed, otherwise a new row
/// is inserted. The UNIQUE (user_id, album_id) constraint keeps concurrent
/// toggles from producing duplicate rows.
pub async fn toggle(
    pool: &SqlitePool,
    album_id: &AlbumId,
    user_id: &UserId,
) -> Result<LikeAction> {
    let mut tx = pool.begin().await?;

    let removed: Option<String> = sqlx::query_scalar(
        "DELETE FROM user_album_likes
         WHERE album_id = ? AND user_id = ?
         RETURNING id",
    )
    .bind(album_id.as_str())
    .bind(user_id.as_str())
    .fetch_optional(&mut *tx)
    .await?;

    let action = if removed.is_some() {
        LikeAction::Unliked
    } else {
        let like_id = AlbumLikeId::generate();
        let inserted: Option<String> = sqlx::query_scalar(
            "INSERT INTO user_album_likes (id, user_id, album_id)
             VALUES (?, ?, ?)
             ON CONFLICT (user_id, album_id) DO NOTHING
             RETURNING id",
        )
        .bind(like_id.as_str())
        .bind(user_id.as_str())
        .bind(album_id.as_str())
        .fetch_optional(&mut *tx)
        .await?;

        if inserted.is_none() {
            // Dropping the transaction rolls it back
            return Err(MelodiaError::not_found("Album like", album_id.as_str()));
        }
        LikeAction::Liked
    };

    tx.commit().await?;
    Ok(action)
}
