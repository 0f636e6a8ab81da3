use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::cookie::CookieJar;
use uuid::Uuid;

use super::services::{carried_token, require};
use crate::{error::AppError, state::AppState};

/// Owner resolved from the `sessionId` cookie. Handlers taking this extractor never run
/// for requests without a recognized session.
#[derive(Debug, Clone, Copy)]
pub struct SessionOwner(pub Uuid);

#[async_trait]
impl FromRequestParts<AppState> for SessionOwner {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let owner_id = require(state.owners.as_ref(), carried_token(&jar)).await?;
        Ok(SessionOwner(owner_id))
    }
}
