use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::{
    repo::OwnerRepo,
    repo_types::{NewOwner, Owner},
    token::{SessionToken, SESSION_COOKIE, SESSION_MAX_AGE_DAYS},
};
use crate::error::AppError;

/// Token carried by the request, if present and well-formed.
pub fn carried_token(jar: &CookieJar) -> Option<SessionToken> {
    jar.get(SESSION_COOKIE)
        .and_then(|cookie| SessionToken::parse(cookie.value()))
}

/// Reuses a well-formed carried token untouched, otherwise mints one and adds it to the jar
/// so the response sets the cookie.
pub fn issue_or_reuse(jar: CookieJar, secure: bool) -> (CookieJar, SessionToken) {
    if let Some(token) = carried_token(&jar) {
        return (jar, token);
    }
    let token = SessionToken::generate();
    debug!("issued new session token");
    (jar.add(session_cookie(token, secure)), token)
}

pub fn session_cookie(token: SessionToken, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token.to_string()))
        .path("/")
        .max_age(Duration::days(SESSION_MAX_AGE_DAYS))
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .build()
}

/// Binds a new owner to `token`. Duplicate emails and already-bound tokens are conflicts
/// and leave storage untouched.
pub async fn register(
    owners: &dyn OwnerRepo,
    token: SessionToken,
    new_owner: NewOwner,
) -> Result<Owner, AppError> {
    if owners.find_by_email(&new_owner.email).await?.is_some() {
        warn!(email = %new_owner.email, "email already registered");
        return Err(AppError::Conflict("User already exists".into()));
    }

    if owners.find_by_token(token).await?.is_some() {
        warn!("session already bound to an owner");
        return Err(AppError::Conflict("Session already registered".into()));
    }

    match owners.create(token, &new_owner).await? {
        Some(owner) => {
            info!(owner_id = %owner.id, email = %owner.email, "owner registered");
            Ok(owner)
        }
        None => {
            // lost a race against a concurrent registration
            warn!(email = %new_owner.email, "owner insert hit a uniqueness conflict");
            Err(AppError::Conflict("User already exists".into()))
        }
    }
}

/// Resolves the carried token to its owner id or rejects with `Unauthorized`.
pub async fn require(
    owners: &dyn OwnerRepo,
    carried: Option<SessionToken>,
) -> Result<Uuid, AppError> {
    let Some(token) = carried else {
        warn!("missing or malformed session cookie");
        return Err(AppError::Unauthorized);
    };

    match owners.find_by_token(token).await? {
        Some(owner) => Ok(owner.id),
        None => {
            warn!("unknown session token");
            Err(AppError::Unauthorized)
        }
    }
}
