use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use axum_extra::extract::cookie::CookieJar;
use tracing::instrument;

use super::{dto::RegisterOwnerRequest, services};
use crate::{error::AppError, state::AppState};

pub fn owner_routes() -> Router<AppState> {
    Router::new().route("/owners", post(register_owner))
}

/// POST /owners
/// The session cookie is attached before the body is looked at, so even a rejected
/// registration leaves the client with an identity to retry with.
#[instrument(skip(state, jar, payload))]
pub async fn register_owner(
    State(state): State<AppState>,
    jar: CookieJar,
    payload: Result<Json<RegisterOwnerRequest>, JsonRejection>,
) -> Response {
    let (jar, token) = services::issue_or_reuse(jar, state.config.session.cookie_secure);

    let outcome = async {
        let Json(payload) = payload?;
        let new_owner = payload.validate()?;
        services::register(state.owners.as_ref(), token, new_owner).await?;
        Ok::<_, AppError>(StatusCode::CREATED)
    }
    .await;

    (jar, outcome).into_response()
}
