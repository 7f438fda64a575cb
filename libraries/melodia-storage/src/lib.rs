//! Melodia Storage
//!
//! `SQLite` persistence for albums, songs and album likes.
//!
//! # Architecture
//!
//! - **Vertical Slicing**: Each table owns its own queries (`albums`, `album_likes`, `songs`)
//! - **Record Store**: `AlbumRecordStore` composes the slices with the injected
//!   song lookup and like-count cache
//! - **Typed Rows**: Rows are decoded into `FromRow` structs and converted to
//!   domain types at the slice boundary
//!
//! # Example
//!
//! ```rust,no_run
//! use melodia_storage::{create_pool, run_migrations, AlbumRecordStore, MemoryCache, SqliteSongLookup};
//! use std::{sync::Arc, time::Duration};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = create_pool("sqlite://melodia.db", 5).await?;
//! run_migrations(&pool).await?;
//!
//! let store = AlbumRecordStore::new(
//!     pool.clone(),
//!     Arc::new(SqliteSongLookup::new(pool)),
//!     Arc::new(MemoryCache::new(10_000, Duration::from_secs(1800))),
//! );
//!
//! let album_id = store.add_album("Abbey Road", 1969).await?;
//! let album = store.get_album_by_id(&album_id).await?;
//! # Ok(())
//! # }
//! ```

mod cache;
mod error;
mod store;

// Vertical slices
pub mod album_likes;
pub mod albums;
pub mod songs;

pub use cache::MemoryCache;
pub use error::StorageError;
pub use songs::SqliteSongLookup;
pub use store::AlbumRecordStore;

use sqlx::migrate::Migrator;
use sqlx::sqlite::SqlitePool;

// Embed migrations into binary
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Create the schema if it does not exist yet
///
/// # Errors
///
/// Returns an error if the migration fails to run
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), StorageError> {
    MIGRATOR.run(pool).await?;
    Ok(())
}

/// Create a new `SQLite` pool
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (e.g., `<sqlite://melodia.db>`)
/// * `max_connections` - Upper bound on pooled connections
///
/// # Errors
///
/// Returns an error if the connection fails
pub async fn create_pool(
    database_url: &str,
    max_connections: u32,
) -> Result<SqlitePool, StorageError> {
    use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
    use std::str::FromStr;

    tracing::debug!("Creating pool with URL: {}", database_url);

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(std::time::Duration::from_secs(30));

    // SQLite creates the file but not its directory
    if let Some(parent) = options.get_filename().parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

    tracing::info!("Database pool ready ({} max connections)", max_connections);

    Ok(pool)
}
