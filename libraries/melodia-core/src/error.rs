/// Core error types for Melodia
use thiserror::Error;

/// Result type alias using `MelodiaError`
pub type Result<T> = std::result::Result<T, MelodiaError>;

/// Core error type for Melodia
#[derive(Error, Debug)]
pub enum MelodiaError {
    /// Caller-correctable input problem, or a store anomaly on insert
    #[error("{0}")]
    Invariant(String),

    /// Entity not found, or a mutation that matched no row
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Entity kind, e.g. "Album"
        entity: String,
        /// Identifier that was looked up
        id: String,
    },

    /// Database errors (for storage implementations)
    #[error("Database error: {0}")]
    Database(String),

    /// Key absent from the cache
    #[error("Cache miss: {0}")]
    CacheMiss(String),
}

impl MelodiaError {
    /// Create an invariant error
    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::Invariant(msg.into())
    }

    /// Create a not found error
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }
}

#[cfg(feature = "sqlx-support")]
impl From<sqlx::Error> for MelodiaError {
    fn from(err: sqlx::Error) -> Self {
        Self::Database(err.to_string())
    }
}
