/// Shared application state
use crate::services::CoverStorage;
use melodia_storage::AlbumRecordStore;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<AlbumRecordStore>,
    pub covers: Arc<CoverStorage>,
}

impl AppState {
    pub fn new(store: Arc<AlbumRecordStore>, covers: Arc<CoverStorage>) -> Self {
        Self { store, covers }
    }
}
