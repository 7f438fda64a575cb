//! Core domain types for Melodia

mod album;
mod ids;
mod like;
mod song;

pub use album::{Album, AlbumDetail};
pub use ids::{generate_id, AlbumId, AlbumLikeId, SongId, UserId, ID_LENGTH};
pub use like::{AlbumLike, AlbumLikes, LikeAction};
pub use song::SongSummary;
