//! Integration tests for the album likes vertical slice
//!
//! Tests toggle semantics at the table level:
//! - Absent -> Present -> Absent
//! - Counting per album
//! - The (user_id, album_id) uniqueness constraint

mod test_helpers;

use melodia_core::types::*;
use melodia_storage::album_likes;
use test_helpers::*;

#[tokio::test]
async fn test_toggle_alternates() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let album = create_test_album(pool, "Kind of Blue", 1959).await;
    let user = UserId::new("user-1");

    assert_eq!(
        album_likes::toggle(pool, &album, &user).await.unwrap(),
        LikeAction::Liked
    );
    let like = album_likes::find(pool, &album, &user)
        .await
        .unwrap()
        .expect("Like row should exist");
    assert_eq!(like.album_id, album);
    assert_eq!(like.user_id, user);

    assert_eq!(
        album_likes::toggle(pool, &album, &user).await.unwrap(),
        LikeAction::Unliked
    );
    assert!(album_likes::find(pool, &album, &user)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_count_by_album() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let album = create_test_album(pool, "Album", 2000).await;
    let other = create_test_album(pool, "Other", 2000).await;

    for user in ["a", "b", "c"] {
        album_likes::toggle(pool, &album, &UserId::new(user))
            .await
            .unwrap();
    }
    album_likes::toggle(pool, &other, &UserId::new("a"))
        .await
        .unwrap();

    assert_eq!(album_likes::count_by_album(pool, &album).await.unwrap(), 3);
    assert_eq!(album_likes::count_by_album(pool, &other).await.unwrap(), 1);
    assert_eq!(
        album_likes::count_by_album(pool, &AlbumId::new("nope"))
            .await
            .unwrap(),
        0
    );
}

#[tokio::test]
async fn test_pair_is_unique() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let album = create_test_album(pool, "Album", 2000).await;
    album_likes::toggle(pool, &album, &UserId::new("u"))
        .await
        .unwrap();

    let duplicate = sqlx::query(
        "INSERT INTO user_album_likes (id, user_id, album_id) VALUES ('dup', 'u', ?)",
    )
    .bind(album.as_str())
    .execute(pool)
    .await;

    assert!(duplicate.is_err(), "Second like row for a pair must be rejected");
}

#[tokio::test]
async fn test_like_rows_cascade_with_album() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let album = create_test_album(pool, "Album", 2000).await;
    let user = UserId::new("u");
    album_likes::toggle(pool, &album, &user).await.unwrap();

    sqlx::query("DELETE FROM albums WHERE id = ?")
        .bind(album.as_str())
        .execute(pool)
        .await
        .unwrap();

    assert_eq!(count_like_rows(pool, &album, &user).await, 0);
}
