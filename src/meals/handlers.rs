use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::instrument;
use uuid::Uuid;

use super::{
    dto::{MealListResponse, MealPayload, MealResponse, MealView},
    services,
};
use crate::{error::AppError, session::extractors::SessionOwner, state::AppState};

pub fn meal_routes() -> Router<AppState> {
    Router::new()
        .route("/meals", get(list_meals).post(create_meal))
        .route(
            "/meals/:id",
            get(get_meal).put(update_meal).delete(delete_meal),
        )
}

/// POST /meals
/// The new id is not echoed; clients re-list to discover it.
#[instrument(skip(state, payload))]
pub async fn create_meal(
    State(state): State<AppState>,
    SessionOwner(owner_id): SessionOwner,
    payload: Result<Json<MealPayload>, JsonRejection>,
) -> Result<StatusCode, AppError> {
    let Json(payload) = payload?;
    let input = payload.validate()?;
    services::create_meal(state.meals.as_ref(), owner_id, input).await?;
    Ok(StatusCode::CREATED)
}

/// GET /meals
#[instrument(skip(state))]
pub async fn list_meals(
    State(state): State<AppState>,
    SessionOwner(owner_id): SessionOwner,
) -> Result<Json<MealListResponse>, AppError> {
    let meals = services::list_meals(state.meals.as_ref(), owner_id).await?;
    Ok(Json(MealListResponse {
        meals: meals.into_iter().map(MealView::from).collect(),
    }))
}

/// GET /meals/:id
#[instrument(skip(state, id))]
pub async fn get_meal(
    State(state): State<AppState>,
    SessionOwner(owner_id): SessionOwner,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<MealResponse>, AppError> {
    let Path(meal_id) = id?;
    let meal = services::get_meal(state.meals.as_ref(), owner_id, meal_id).await?;
    Ok(Json(MealResponse { meal: meal.into() }))
}

/// PUT /meals/:id
#[instrument(skip(state, id, payload))]
pub async fn update_meal(
    State(state): State<AppState>,
    SessionOwner(owner_id): SessionOwner,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<MealPayload>, JsonRejection>,
) -> Result<StatusCode, AppError> {
    let Path(meal_id) = id?;
    let Json(payload) = payload?;
    let input = payload.validate()?;
    services::update_meal(state.meals.as_ref(), owner_id, meal_id, input).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /meals/:id
#[instrument(skip(state, id))]
pub async fn delete_meal(
    State(state): State<AppState>,
    SessionOwner(owner_id): SessionOwner,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let Path(meal_id) = id?;
    services::delete_meal(state.meals.as_ref(), owner_id, meal_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
