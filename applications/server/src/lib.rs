//! Melodia Server Library
//!
//! HTTP API for the album catalog: album CRUD, cover uploads and likes.
//!
//! This library exposes the core components for testing purposes.

pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod services;
pub mod state;

// Re-export commonly used types for convenience
pub use api::create_router;
pub use config::ServerConfig;
pub use error::{Result, ServerError};
pub use services::cover_storage::CoverStorage;
pub use state::AppState;
