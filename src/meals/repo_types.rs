use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// Meal record in the database.
#[derive(Debug, Clone, FromRow)]
pub struct MealRecord {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub description: String,
    pub is_on_diet: bool,
    pub occurred_at: i64, // epoch millis of the meal itself
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// Validated mutable fields; create and update both take the full set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MealInput {
    pub name: String,
    pub description: String,
    pub is_on_diet: bool,
    pub occurred_at: i64,
}
