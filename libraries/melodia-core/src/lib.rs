//! Melodia Core
//!
//! Domain types, capability traits, and error handling for the Melodia
//! album catalog.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Album`, `AlbumLike`, `SongSummary`, `AlbumLikes`
//! - **Capabilities**: `CacheStore` and `SongLookup`, injected into the record store
//! - **Validation**: `AlbumPayloadValidator` for incoming album payloads
//! - **Error Handling**: Unified `MelodiaError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use melodia_core::validation::AlbumPayloadValidator;
//! use serde_json::json;
//!
//! let payload = AlbumPayloadValidator::validate(&json!({
//!     "name": "Abbey Road",
//!     "year": 1969
//! }))
//! .unwrap();
//!
//! assert_eq!(payload.name, "Abbey Road");
//! assert_eq!(payload.year, 1969);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod capabilities;
pub mod error;
pub mod types;
pub mod validation;

// Re-export commonly used types
pub use capabilities::{album_likes_cache_key, CacheStore, SongLookup};
pub use error::{MelodiaError, Result};
pub use validation::{AlbumPayload, AlbumPayloadValidator};

pub use types::{
    Album, AlbumDetail, AlbumId, AlbumLike, AlbumLikeId, AlbumLikes, LikeAction, SongId,
    SongSummary, UserId,
};
