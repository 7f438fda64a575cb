//! Song types

use super::SongId;
use serde::{Deserialize, Serialize};

/// The song fields exposed on an album detail
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongSummary {
    pub id: SongId,
    pub title: String,
    pub performer: String,
}
