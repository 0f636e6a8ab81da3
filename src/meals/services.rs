use tracing::{info, warn};
use uuid::Uuid;

use super::{
    repo::MealRepo,
    repo_types::{MealInput, MealRecord},
};
use crate::error::AppError;

fn not_found(owner_id: Uuid, meal_id: Uuid) -> AppError {
    warn!(%owner_id, %meal_id, "meal not found for owner");
    AppError::NotFound("Meal not found".into())
}

pub async fn create_meal(
    meals: &dyn MealRepo,
    owner_id: Uuid,
    input: MealInput,
) -> Result<MealRecord, AppError> {
    let meal = meals.insert(owner_id, &input).await?;
    info!(%owner_id, meal_id = %meal.id, "meal created");
    Ok(meal)
}

pub async fn list_meals(meals: &dyn MealRepo, owner_id: Uuid) -> Result<Vec<MealRecord>, AppError> {
    Ok(meals.list_by_owner(owner_id).await?)
}

/// A meal owned by someone else is reported exactly like a missing one.
pub async fn get_meal(
    meals: &dyn MealRepo,
    owner_id: Uuid,
    meal_id: Uuid,
) -> Result<MealRecord, AppError> {
    meals
        .find_by_owner(owner_id, meal_id)
        .await?
        .ok_or_else(|| not_found(owner_id, meal_id))
}

/// Full replace of the mutable fields. Looks the meal up before writing, and a write that
/// touches no row (deleted in between) is still `NotFound`.
pub async fn update_meal(
    meals: &dyn MealRepo,
    owner_id: Uuid,
    meal_id: Uuid,
    input: MealInput,
) -> Result<(), AppError> {
    get_meal(meals, owner_id, meal_id).await?;

    if !meals.update(owner_id, meal_id, &input).await? {
        return Err(not_found(owner_id, meal_id));
    }
    info!(%owner_id, %meal_id, "meal updated");
    Ok(())
}

/// Same lookup-then-act shape as `update_meal`; a second delete of the same id is `NotFound`.
pub async fn delete_meal(meals: &dyn MealRepo, owner_id: Uuid, meal_id: Uuid) -> Result<(), AppError> {
    get_meal(meals, owner_id, meal_id).await?;

    if !meals.delete(owner_id, meal_id).await? {
        return Err(not_found(owner_id, meal_id));
    }
    info!(%owner_id, %meal_id, "meal deleted");
    Ok(())
}
