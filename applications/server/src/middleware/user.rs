/// Caller identity supplied by the upstream gateway
use crate::error::ServerError;
use axum::{extract::FromRequestParts, http::request::Parts};
use melodia_core::UserId;

/// Header carrying the id of the already-authenticated caller
pub const USER_ID_HEADER: &str = "x-user-id";

/// Authenticated caller, usable as an extractor in handlers
///
/// Authentication happens in front of this service; the gateway forwards
/// the verified user id in `X-User-Id`.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub UserId);

impl AuthenticatedUser {
    pub fn user_id(&self) -> &UserId {
        &self.0
    }
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|h| h.to_str().ok())
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| {
                tracing::warn!("Request without {} header", USER_ID_HEADER);
                ServerError::Unauthorized("Missing user identity".to_string())
            })?;

        Ok(AuthenticatedUser(UserId::new(user_id)))
    }
}
