//! Album like types

use super::{AlbumId, AlbumLikeId, UserId};
use serde::{Deserialize, Serialize};

/// One user's like of one album
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbumLike {
    pub id: AlbumLikeId,
    pub user_id: UserId,
    pub album_id: AlbumId,
}

/// Outcome of a like toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LikeAction {
    Liked,
    Unliked,
}

impl LikeAction {
    pub fn message(&self) -> &'static str {
        match self {
            LikeAction::Liked => "Album liked",
            LikeAction::Unliked => "Album unliked",
        }
    }
}

/// Like count for an album, tagged with where it came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbumLikes {
    pub count: u64,
    pub from_cache: bool,
}
